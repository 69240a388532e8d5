use chrono::{NaiveDateTime, Utc};
use gaffer_core::EventLog;
use log::info;
use serde::Serialize;

/// One line of game narration with the wall-clock moment it was written.
#[derive(Debug, Clone, Serialize)]
pub struct GameEvent {
    pub game_id: u32,
    pub message: String,
    pub logged_at: NaiveDateTime,
}

/// Narration sink that keeps every appended message and echoes it to the
/// logger as it arrives. Workers resolving rounds in parallel each fill
/// their own instance, which is then merged back into the main one.
#[derive(Debug, Default, Serialize)]
pub struct MemoryEventLog {
    events: Vec<GameEvent>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        MemoryEventLog::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn for_game(&self, game_id: u32) -> Vec<&GameEvent> {
        self.events
            .iter()
            .filter(|event| event.game_id == game_id)
            .collect()
    }

    /// Absorbs another log's events. They were already echoed when first
    /// appended, so merging is silent.
    pub fn merge(&mut self, other: MemoryEventLog) {
        self.events.extend(other.events);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventLog for MemoryEventLog {
    fn append(&mut self, game_id: u32, message: String) {
        info!("[game {}] {}", game_id, message);

        self.events.push(GameEvent {
            game_id,
            message,
            logged_at: Utc::now().naive_utc(),
        });
    }
}
