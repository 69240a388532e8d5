use crate::game::EventLog;
use crate::lineup::{LineupScorer, SegmentScores};
use crate::r#match::FixtureResolution;
use crate::player::Player;
use crate::team::Team;
use crate::utils::RandomSource;

pub const MIN_MATCH_ROLL: i32 = 1;
pub const MAX_MATCH_ROLL: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSide {
    Home,
    Away,
}

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub winner: Option<MatchSide>,
    pub home_score: SegmentScores,
    pub away_score: SegmentScores,
}

impl MatchOutcome {
    pub fn to_resolution(&self, home_team_id: u32, away_team_id: u32) -> FixtureResolution {
        FixtureResolution {
            draw: self.winner.is_none(),
            sim_win: false,
            winner_team_id: match self.winner {
                Some(MatchSide::Home) => Some(home_team_id),
                Some(MatchSide::Away) => Some(away_team_id),
                None => None,
            },
            home_score: self.home_score,
            away_score: self.away_score,
        }
    }
}

/// Resolves a head-to-head fixture from both lineups.
///
/// Each side's base segment scores get an independent 1..=12 roll per
/// segment, rolled home DEF, MID, FWD then away DEF, MID, FWD. Segments
/// are then compared crosswise: home defence against away attack, home
/// attack against away defence, midfields head to head. The match goes to
/// whichever side takes the majority of the three comparisons.
pub struct MatchResolver;

impl MatchResolver {
    pub fn resolve(
        home: &Team,
        home_players: &[Player],
        away: &Team,
        away_players: &[Player],
        random: &mut dyn RandomSource,
        events: &mut dyn EventLog,
    ) -> MatchOutcome {
        let home_base = LineupScorer::score(home_players, home.captain_boost);
        let away_base = LineupScorer::score(away_players, away.captain_boost);

        let home_score = Self::with_rolls(home_base, random);
        let away_score = Self::with_rolls(away_base, random);

        let majority = (home_score.def - away_score.fwd).signum()
            + (home_score.mid - away_score.mid).signum()
            + (home_score.fwd - away_score.def).signum();

        let winner = if majority > 0 {
            Some(MatchSide::Home)
        } else if majority < 0 {
            Some(MatchSide::Away)
        } else {
            None
        };

        let breakdown = format!(
            "DEF {}-{}, MID {}-{}, FWD {}-{}",
            home_score.def,
            away_score.def,
            home_score.mid,
            away_score.mid,
            home_score.fwd,
            away_score.fwd
        );

        let message = match winner {
            Some(MatchSide::Home) => {
                format!("{} beat {} ({})", home.name, away.name, breakdown)
            }
            Some(MatchSide::Away) => {
                format!("{} beat {} ({})", away.name, home.name, breakdown)
            }
            None => format!("{} and {} drew ({})", home.name, away.name, breakdown),
        };

        events.append(home.game_id, message);

        MatchOutcome {
            winner,
            home_score,
            away_score,
        }
    }

    fn with_rolls(base: SegmentScores, random: &mut dyn RandomSource) -> SegmentScores {
        SegmentScores {
            def: base.def + random.roll(MIN_MATCH_ROLL, MAX_MATCH_ROLL),
            mid: base.mid + random.roll(MIN_MATCH_ROLL, MAX_MATCH_ROLL),
            fwd: base.fwd + random.roll(MIN_MATCH_ROLL, MAX_MATCH_ROLL),
        }
    }
}
