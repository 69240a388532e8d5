use crate::player::PlayerPosition;
use serde::{Deserialize, Serialize};

pub const MIN_OVERALL: u8 = 1;
pub const MAX_OVERALL: u8 = 7;

/// A drafted fantasy player. The engine treats players as immutable value
/// inputs per call; squad ownership and between-stage mutation live with
/// the storage collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    /// The real-world club the player was drafted from. Shared clubs feed
    /// the lineup chemistry bonus.
    pub real_team_id: u32,
    /// Star rating in [1, 7].
    pub overall: u8,
    /// Ceiling for training growth, never below `overall`.
    pub potential: u8,
    pub position: PlayerPosition,
    /// Lineup slot 1..=11 when fielded, `None` when benched.
    pub slot: Option<u8>,
    pub captain: bool,
    pub injured: bool,
}

impl Player {
    pub fn new(
        id: u32,
        name: String,
        real_team_id: u32,
        overall: u8,
        position: PlayerPosition,
    ) -> Self {
        Player {
            id,
            name,
            real_team_id,
            overall,
            potential: overall.max(MIN_OVERALL),
            position,
            slot: None,
            captain: false,
            injured: false,
        }
    }

    /// Chemistry contributed by this player to the player behind them in
    /// the next lineup slot: shared real club or shared position is worth
    /// a point, anything else nothing.
    pub fn chemistry_with(&self, next: &Player) -> i32 {
        if self.real_team_id == next.real_team_id || self.position == next.position {
            1
        } else {
            0
        }
    }

    pub fn can_train(&self) -> bool {
        self.overall < self.potential.min(MAX_OVERALL)
    }
}
