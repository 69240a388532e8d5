use crate::game::{EventLog, Game, GameSettings, Stage};
use crate::r#match::{Fixture, FixtureResolution};
use crate::season::PositionedTeamSeason;
use crate::team::{RealTeam, Team};
use crate::utils::RandomSource;
use serde::{Deserialize, Serialize};

/// A qualifier's path through the knockout rounds. The run either climbs
/// quarter-final, semi-final and final, or ends at the first round that
/// is not won. Elimination is terminal, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CupRun {
    pub game_id: u32,
    pub season: u32,
    pub team_id: u32,
    pub stage: Stage,
    /// Real clubs already faced in this run, excluded from later draws.
    pub used_real_team_ids: Vec<u32>,
    pub eliminated: bool,
    pub completed: bool,
}

impl CupRun {
    pub fn is_over(&self) -> bool {
        self.eliminated || self.completed
    }
}

/// Builds and advances a cup run: one fixed 1v1 fixture per round against
/// a drawn real club, outside the league pairing tables.
pub struct CupBracketBuilder;

impl CupBracketBuilder {
    /// The champion goes down the cup route when they hold the required
    /// number of titles but the season produced no outright winner.
    pub fn qualifies(
        settings: &GameSettings,
        champion: &PositionedTeamSeason,
        champion_titles: u32,
    ) -> bool {
        champion.team_season.score < settings.victory_score
            && champion_titles >= settings.cup_titles_required
    }

    pub fn begin(game: &Game, season: u32, team: &Team, events: &mut dyn EventLog) -> CupRun {
        events.append(
            game.id,
            format!("{} qualify for the {}", team.name, Stage::CupQuarterFinal),
        );

        CupRun {
            game_id: game.id,
            season,
            team_id: team.id,
            stage: Stage::CupQuarterFinal,
            used_real_team_ids: Vec::new(),
            eliminated: false,
            completed: false,
        }
    }

    /// Draws the round's opponent uniformly from the strongest real clubs
    /// not already faced in this run. `None` once the pool is exhausted.
    pub fn draw_opponent<'a>(
        run: &CupRun,
        real_teams: &'a [RealTeam],
        pool_size: usize,
        random: &mut dyn RandomSource,
    ) -> Option<&'a RealTeam> {
        let mut pool: Vec<&RealTeam> = real_teams
            .iter()
            .filter(|real_team| !run.used_real_team_ids.contains(&real_team.id))
            .collect();

        pool.sort_by(|a, b| b.strength.cmp(&a.strength).then(a.id.cmp(&b.id)));
        pool.truncate(pool_size);

        if pool.is_empty() {
            return None;
        }

        let index = random.roll(0, pool.len() as i32 - 1) as usize;
        Some(pool[index])
    }

    /// Creates the run's fixture against the drawn opponent and books the
    /// opponent as used.
    pub fn next_fixture(
        run: &mut CupRun,
        team: &Team,
        opponent: &RealTeam,
        fixture_id: String,
        events: &mut dyn EventLog,
    ) -> Fixture {
        assert!(!run.is_over(), "cup run {} is already over", run.team_id);

        run.used_real_team_ids.push(opponent.id);

        events.append(
            run.game_id,
            format!("{} drawn against {} in the {}", team.name, opponent.name, run.stage),
        );

        Fixture::against_real(
            fixture_id,
            run.game_id,
            run.season,
            run.stage,
            run.team_id,
            opponent.id,
        )
    }

    /// Applies a resolved round. A win climbs to the next round, and a
    /// won final records the game's overall winner. Anything else ends
    /// the run.
    pub fn advance(
        run: &mut CupRun,
        game: &mut Game,
        team: &Team,
        resolution: &FixtureResolution,
        events: &mut dyn EventLog,
    ) {
        assert!(!run.is_over(), "cup run {} is already over", run.team_id);
        assert!(run.stage.is_cup_stage(), "cup run at non-cup stage {}", run.stage);

        if resolution.winner_team_id != Some(run.team_id) {
            run.eliminated = true;
            events.append(
                run.game_id,
                format!("{}'s cup run ends at the {}", team.name, run.stage),
            );
            return;
        }

        match run.stage {
            Stage::CupQuarterFinal => {
                run.stage = Stage::CupSemiFinal;
                events.append(
                    run.game_id,
                    format!("{} through to the {}", team.name, run.stage),
                );
            }
            Stage::CupSemiFinal => {
                run.stage = Stage::CupFinal;
                events.append(
                    run.game_id,
                    format!("{} through to the {}", team.name, run.stage),
                );
            }
            Stage::CupFinal => {
                run.completed = true;
                game.record_winner(run.team_id);
                events.append(
                    run.game_id,
                    format!("{} win the cup final and take the title", team.name),
                );
            }
            _ => unreachable!(),
        }
    }
}
