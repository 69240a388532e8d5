use crate::game::Stage;
use crate::lineup::SegmentScores;
use crate::season::{DRAW_POINTS, WIN_POINTS};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Outcome fields written onto a fixture exactly once.
///
/// `draw` and `winner_team_id` are mutually exclusive. `sim_win` marks a
/// win credited by the sim resolver without a live opposing lineup. A
/// lost simulated tie carries neither flag and no winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureResolution {
    pub draw: bool,
    pub sim_win: bool,
    pub winner_team_id: Option<u32>,
    pub home_score: SegmentScores,
    pub away_score: SegmentScores,
}

/// A scheduled meeting. Either two managed teams (`away_team_id` set) or
/// a simulated tie against a real club (`real_team_id` set), never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: String,
    pub game_id: u32,
    pub season: u32,
    pub stage: Stage,
    pub home_team_id: u32,
    pub away_team_id: Option<u32>,
    pub real_team_id: Option<u32>,
    pub played_at: Option<NaiveDateTime>,
    pub resolution: Option<FixtureResolution>,
}

impl Fixture {
    pub fn versus(
        id: String,
        game_id: u32,
        season: u32,
        stage: Stage,
        home_team_id: u32,
        away_team_id: u32,
    ) -> Self {
        assert_ne!(home_team_id, away_team_id, "a team cannot host itself");

        Fixture {
            id,
            game_id,
            season,
            stage,
            home_team_id,
            away_team_id: Some(away_team_id),
            real_team_id: None,
            played_at: None,
            resolution: None,
        }
    }

    pub fn against_real(
        id: String,
        game_id: u32,
        season: u32,
        stage: Stage,
        home_team_id: u32,
        real_team_id: u32,
    ) -> Self {
        Fixture {
            id,
            game_id,
            season,
            stage,
            home_team_id,
            away_team_id: None,
            real_team_id: Some(real_team_id),
            played_at: None,
            resolution: None,
        }
    }

    pub fn is_sim(&self) -> bool {
        self.real_team_id.is_some()
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == Some(team_id)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// Writes the outcome. A fixture resolves exactly once; a second
    /// resolution or a winner from outside the fixture is a bug upstream.
    pub fn resolve(&mut self, resolution: FixtureResolution, played_at: NaiveDateTime) {
        assert!(
            self.resolution.is_none(),
            "fixture {} already resolved",
            self.id
        );

        if let Some(winner) = resolution.winner_team_id {
            assert!(
                self.involves(winner),
                "winner {} does not play in fixture {}",
                winner,
                self.id
            );
            assert!(!resolution.draw, "fixture {} cannot draw with a winner", self.id);
        }

        self.played_at = Some(played_at);
        self.resolution = Some(resolution);
    }

    /// League points this fixture earned the team: 6 for a win, 2 for a
    /// draw, nothing for a loss or while unresolved.
    pub fn points_for(&self, team_id: u32) -> i32 {
        if !self.involves(team_id) {
            return 0;
        }

        match &self.resolution {
            Some(resolution) if resolution.winner_team_id == Some(team_id) => WIN_POINTS,
            Some(resolution) if resolution.draw => DRAW_POINTS,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn played_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, 17)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap()
    }

    fn resolution(winner: Option<u32>, draw: bool) -> FixtureResolution {
        FixtureResolution {
            draw,
            sim_win: false,
            winner_team_id: winner,
            home_score: SegmentScores::default(),
            away_score: SegmentScores::default(),
        }
    }

    #[test]
    fn test_versus_fixture_shape() {
        let fixture = Fixture::versus(String::from("1-1-m1-10"), 1, 1, Stage::Match1, 10, 20);

        assert!(!fixture.is_sim());
        assert!(fixture.involves(10));
        assert!(fixture.involves(20));
        assert!(!fixture.involves(30));
        assert!(!fixture.is_resolved());
    }

    #[test]
    fn test_sim_fixture_references_real_club_only() {
        let fixture =
            Fixture::against_real(String::from("1-1-m2-10"), 1, 1, Stage::Match2, 10, 500);

        assert!(fixture.is_sim());
        assert_eq!(fixture.away_team_id, None);
        assert_eq!(fixture.real_team_id, Some(500));
        assert!(fixture.involves(10));
        assert!(!fixture.involves(500));
    }

    #[test]
    #[should_panic(expected = "cannot host itself")]
    fn test_self_pairing_is_rejected() {
        Fixture::versus(String::from("bad"), 1, 1, Stage::Match1, 10, 10);
    }

    #[test]
    fn test_resolve_records_outcome_and_timestamp() {
        let mut fixture = Fixture::versus(String::from("1-1-m1-10"), 1, 1, Stage::Match1, 10, 20);

        fixture.resolve(resolution(Some(20), false), played_at());

        assert!(fixture.is_resolved());
        assert_eq!(fixture.played_at, Some(played_at()));
        assert_eq!(
            fixture.resolution.as_ref().unwrap().winner_team_id,
            Some(20)
        );
    }

    #[test]
    #[should_panic(expected = "already resolved")]
    fn test_resolving_twice_panics() {
        let mut fixture = Fixture::versus(String::from("1-1-m1-10"), 1, 1, Stage::Match1, 10, 20);

        fixture.resolve(resolution(Some(10), false), played_at());
        fixture.resolve(resolution(Some(20), false), played_at());
    }

    #[test]
    #[should_panic(expected = "does not play in fixture")]
    fn test_foreign_winner_panics() {
        let mut fixture = Fixture::versus(String::from("1-1-m1-10"), 1, 1, Stage::Match1, 10, 20);

        fixture.resolve(resolution(Some(30), false), played_at());
    }

    #[test]
    fn test_points_for_win_draw_loss() {
        let mut won = Fixture::versus(String::from("a"), 1, 1, Stage::Match1, 10, 20);
        won.resolve(resolution(Some(10), false), played_at());

        assert_eq!(won.points_for(10), WIN_POINTS);
        assert_eq!(won.points_for(20), 0);

        let mut drawn = Fixture::versus(String::from("b"), 1, 1, Stage::Match2, 10, 20);
        drawn.resolve(resolution(None, true), played_at());

        assert_eq!(drawn.points_for(10), DRAW_POINTS);
        assert_eq!(drawn.points_for(20), DRAW_POINTS);
    }

    #[test]
    fn test_points_for_unresolved_or_uninvolved() {
        let fixture = Fixture::versus(String::from("a"), 1, 1, Stage::Match1, 10, 20);

        assert_eq!(fixture.points_for(10), 0);
        assert_eq!(fixture.points_for(99), 0);
    }

    #[test]
    fn test_lost_sim_carries_no_winner_and_no_points() {
        let mut fixture =
            Fixture::against_real(String::from("c"), 1, 1, Stage::Match3, 10, 500);

        fixture.resolve(resolution(None, false), played_at());

        assert_eq!(fixture.points_for(10), 0);
        assert!(fixture.is_resolved());
    }
}
