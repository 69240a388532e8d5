use crate::game::{GameSettings, Stage};
use crate::season::PositionedTeamSeason;
use crate::team::Team;
use serde::{Deserialize, Serialize};

/// One running game world: a handful of managed teams playing recurring
/// seasons until somebody wins outright or through the cup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: u32,
    pub name: String,
    /// Canonical phase every team has reached. Individual teams may run
    /// ahead of it via `Team::effective_stage`.
    pub stage: Stage,
    pub settings: GameSettings,
    pub winner_team_id: Option<u32>,
}

impl Game {
    pub fn new(id: u32, name: String) -> Self {
        Game {
            id,
            name,
            stage: Stage::NotStarted,
            settings: GameSettings::default(),
            winner_team_id: None,
        }
    }

    /// Moves the canonical stage forward once every team has marked itself
    /// ready, resetting the flags and pulling each team's effective stage
    /// level with the new phase. Returns the stage entered, if any.
    pub fn try_advance_stage(&mut self, teams: &mut [&mut Team]) -> Option<Stage> {
        if teams.is_empty() || teams.iter().any(|team| !team.ready) {
            return None;
        }

        let next = self.stage.next()?;
        self.stage = next;

        for team in teams.iter_mut() {
            team.ready = false;
            team.effective_stage = next;
        }

        Some(next)
    }

    /// The runaway champion, if the top of the table has hit the victory
    /// threshold. Standings must be ordered best-to-worst.
    pub fn outright_winner(&self, standings: &[PositionedTeamSeason]) -> Option<u32> {
        standings
            .first()
            .filter(|row| row.team_season.score >= self.settings.victory_score)
            .map(|row| row.team_season.team_id)
    }

    pub fn record_winner(&mut self, team_id: u32) {
        self.winner_team_id = Some(team_id);
    }

    pub fn is_finished(&self) -> bool {
        self.winner_team_id.is_some()
    }
}
