/// Append-only narration sink. Match, sim and cup resolvers report their
/// outcomes here as free text tagged with the game id; where the messages
/// end up (memory, terminal, storage) is the collaborator's business.
pub trait EventLog {
    fn append(&mut self, game_id: u32, message: String);
}

/// Sink that drops every message.
pub struct NullEventLog;

impl EventLog for NullEventLog {
    fn append(&mut self, _game_id: u32, _message: String) {}
}
