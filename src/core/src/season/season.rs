use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const WIN_POINTS: i32 = 6;
pub const DRAW_POINTS: i32 = 2;

/// One numbered season of a game. Immutable once the next season starts;
/// the current season is always the highest number for the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub game_id: u32,
    pub number: u32,
    pub started_at: NaiveDateTime,
}

impl Season {
    pub fn new(game_id: u32, number: u32, started_at: NaiveDateTime) -> Self {
        Season {
            game_id,
            number,
            started_at,
        }
    }
}

/// One team's scoring record within one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSeason {
    pub id: String,
    pub game_id: u32,
    pub season: u32,
    pub team_id: u32,
    /// Cumulative score. Opens at the starting baseline and only grows.
    pub score: i32,
    /// Season-opening baseline: the squad star sum in season one, the
    /// previous season's final score afterwards. Doubles as the handicap
    /// key when the table ties.
    pub starting_score: i32,
}

impl TeamSeason {
    /// Row identifier, also how collaborators address a team's season.
    pub fn key(game_id: u32, season: u32, team_id: u32) -> String {
        format!("{}-{}-{}", game_id, season, team_id)
    }

    pub fn new(game_id: u32, season: u32, team_id: u32, starting_score: i32) -> Self {
        TeamSeason {
            id: Self::key(game_id, season, team_id),
            game_id,
            season,
            team_id,
            score: starting_score,
            starting_score,
        }
    }

    pub fn add_points(&mut self, points: i32) {
        debug_assert!(points >= 0, "season scores never decrease");
        self.score += points;
    }

    /// Points gathered on top of the baseline this season.
    pub fn earned(&self) -> i32 {
        self.score - self.starting_score
    }
}

/// A `TeamSeason` stamped with its league rank. Derived on every read by
/// the ranker, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionedTeamSeason {
    pub position: u8,
    pub team_season: TeamSeason,
}
