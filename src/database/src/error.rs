use thiserror::Error;

/// Failures surfaced by the in-memory store. Lookup misses carry the key
/// that missed; write conflicts carry the key that collided.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("game {0} not found")]
    GameNotFound(u32),

    #[error("team {0} not found")]
    TeamNotFound(u32),

    #[error("real team {0} not found")]
    RealTeamNotFound(u32),

    #[error("game {0} has not started a season")]
    SeasonNotFound(u32),

    #[error("team season {0} not found")]
    TeamSeasonNotFound(String),

    #[error("fixture {0} not found")]
    FixtureNotFound(String),

    #[error("fixture {0} already resolved")]
    FixtureAlreadyResolved(String),

    #[error("team season {0} already exists")]
    DuplicateTeamSeason(String),

    #[error("fixture {0} already exists")]
    DuplicateFixture(String),
}
