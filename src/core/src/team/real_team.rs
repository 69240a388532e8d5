use serde::{Deserialize, Serialize};

/// A real-world club. Supplies draftable players, lineup chemistry links
/// and the opposition pool for cup draws and simulated rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealTeam {
    pub id: u32,
    pub name: String,
    /// Rough quality on the same 1..=7 scale as player stars.
    pub strength: u8,
}

impl RealTeam {
    pub fn new(id: u32, name: String, strength: u8) -> Self {
        RealTeam { id, name, strength }
    }
}
