use serde::{Deserialize, Serialize};

/// Per-game tuning knobs. These are configuration, not rules: the engine
/// reads them but never hardcodes their values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    /// A season score at or above this ends the game outright.
    pub victory_score: i32,
    /// League titles needed before the champion is sent down the cup route.
    pub cup_titles_required: u32,
    /// How many of the strongest unused real teams form a cup draw pool.
    pub cup_pool_size: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            victory_score: 100,
            cup_titles_required: 3,
            cup_pool_size: 8,
        }
    }
}
