use crate::game::Stage;
use serde::{Deserialize, Serialize};

pub const MIN_IMPROVEMENT_LEVEL: u8 = 1;
pub const MAX_IMPROVEMENT_LEVEL: u8 = 8;

/// A managed team within a game. Finances, improvements and readiness are
/// mutated between stages by the surrounding domain layer; the engine only
/// reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub game_id: u32,
    pub name: String,
    pub manager: String,
    pub cash: i32,
    /// Set when the manager has finished their actions for the current
    /// stage. Cleared whenever the game stage advances.
    pub ready: bool,
    /// The stage this team has locally progressed to. Runs one step ahead
    /// of `Game::stage` after `mark_ready`, never behind it.
    pub effective_stage: Stage,
    pub training_level: u8,
    pub scouting_level: u8,
    pub stadium_level: u8,
    /// Multiplier applied to the captain's stars, raised by league titles.
    pub captain_boost: u8,
}

impl Team {
    pub fn new(id: u32, game_id: u32, name: String, manager: String) -> Self {
        Team {
            id,
            game_id,
            name,
            manager,
            cash: 0,
            ready: false,
            effective_stage: Stage::NotStarted,
            training_level: MIN_IMPROVEMENT_LEVEL,
            scouting_level: MIN_IMPROVEMENT_LEVEL,
            stadium_level: MIN_IMPROVEMENT_LEVEL,
            captain_boost: 1,
        }
    }

    /// Marks the team done with the current game stage and lets it run
    /// ahead to the next phase locally.
    pub fn mark_ready(&mut self, game_stage: Stage) {
        self.ready = true;
        self.effective_stage = game_stage.next().unwrap_or(game_stage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_team_defaults() {
        let team = Team::new(3, 1, String::from("The Gaffers"), String::from("Sam"));

        assert!(!team.ready);
        assert_eq!(team.effective_stage, Stage::NotStarted);
        assert_eq!(team.captain_boost, 1);
        assert_eq!(team.training_level, MIN_IMPROVEMENT_LEVEL);
        assert_eq!(team.scouting_level, MIN_IMPROVEMENT_LEVEL);
        assert_eq!(team.stadium_level, MIN_IMPROVEMENT_LEVEL);
        assert_eq!(team.cash, 0);
    }

    #[test]
    fn test_mark_ready_moves_effective_stage_forward() {
        let mut team = Team::new(3, 1, String::from("The Gaffers"), String::from("Sam"));

        team.mark_ready(Stage::Training);

        assert!(team.ready);
        assert_eq!(team.effective_stage, Stage::Scouting);
    }

    #[test]
    fn test_mark_ready_at_terminal_stage_stays_put() {
        let mut team = Team::new(3, 1, String::from("The Gaffers"), String::from("Sam"));

        team.mark_ready(Stage::SuperCup);

        assert_eq!(team.effective_stage, Stage::SuperCup);
    }
}
