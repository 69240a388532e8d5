pub mod cup;
pub mod game;
pub mod lineup;
pub mod r#match;
pub mod player;
pub mod schedule;
pub mod season;
pub mod team;

pub mod utils;

// Re-export game items
pub use game::{
    EventLog, Game, GameSettings, NullEventLog, Stage, MATCH_STAGES,
};

// Re-export squad items
pub use player::{Player, PlayerPosition, MAX_OVERALL, MIN_OVERALL};
pub use team::{RealTeam, Team, MAX_IMPROVEMENT_LEVEL, MIN_IMPROVEMENT_LEVEL};

// Re-export lineup items
pub use lineup::{
    LineupScorer, SegmentScores,
    GOALKEEPER_POSITION, MAX_DEF_POSITION, MAX_LINEUP_POSITION, MAX_MID_POSITION,
};

// Re-export schedule items
pub use schedule::{FixtureScheduler, Pairing};

// Re-export match items
pub use r#match::{
    Fixture, FixtureResolution,
    MatchOutcome, MatchResolver, MatchSide,
    SimOutcome, SimResolver,
    MAX_MATCH_ROLL, MIN_MATCH_ROLL,
};

// Re-export season items
pub use season::{
    LeagueTableRanker, PositionedTeamSeason, Season, TeamSeason,
    RolloverResult, SeasonRollover, TeamAward,
    DRAW_POINTS, PRIZE_MONEY_STEP, WIN_POINTS,
};

// Re-export cup items
pub use cup::{CupBracketBuilder, CupRun};

pub use utils::*;
