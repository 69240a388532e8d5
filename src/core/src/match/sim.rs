use crate::game::EventLog;
use crate::r#match::{MAX_MATCH_ROLL, MIN_MATCH_ROLL};
use crate::season::{DRAW_POINTS, WIN_POINTS};
use crate::team::{RealTeam, Team};
use crate::utils::RandomSource;

const WIN_THRESHOLD: i32 = 10;
const DRAW_THRESHOLD: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimOutcome {
    Win,
    Draw,
    Loss,
}

impl SimOutcome {
    pub fn points(&self) -> i32 {
        match self {
            SimOutcome::Win => WIN_POINTS,
            SimOutcome::Draw => DRAW_POINTS,
            SimOutcome::Loss => 0,
        }
    }
}

/// Resolves a simulated round for a team without a live opponent that
/// stage: one 1..=12 roll against thresholds shifted by the team's
/// starting strength.
pub struct SimResolver;

impl SimResolver {
    pub fn resolve(
        team: &Team,
        starting_score: i32,
        opponent_name: &str,
        random: &mut dyn RandomSource,
        events: &mut dyn EventLog,
    ) -> SimOutcome {
        let roll = random.roll(MIN_MATCH_ROLL, MAX_MATCH_ROLL);
        let bonus = Self::roll_bonus(starting_score);

        let outcome = if roll >= WIN_THRESHOLD - bonus {
            SimOutcome::Win
        } else if roll >= DRAW_THRESHOLD - bonus {
            SimOutcome::Draw
        } else {
            SimOutcome::Loss
        };

        let message = match outcome {
            SimOutcome::Win => format!(
                "{} saw off {} in a simulated tie (rolled {}, needed {})",
                team.name,
                opponent_name,
                roll,
                WIN_THRESHOLD - bonus
            ),
            SimOutcome::Draw => format!(
                "{} held {} to a simulated draw (rolled {})",
                team.name, opponent_name, roll
            ),
            SimOutcome::Loss => format!(
                "{} fell to {} in a simulated tie (rolled {})",
                team.name, opponent_name, roll
            ),
        };

        events.append(team.game_id, message);

        outcome
    }

    /// Threshold shift earned by prior strength: one point in the team's
    /// favour per full twenty starting-score points above twenty, one
    /// against per full twenty below.
    pub fn roll_bonus(starting_score: i32) -> i32 {
        (starting_score - 20).div_euclid(20)
    }

    /// Flavour opponent for a simulated round. The strongest real clubs
    /// take turns by match number, so the narration stays varied but
    /// reproducible.
    pub fn flavour_opponent(real_teams: &[RealTeam], match_number: u8) -> Option<&RealTeam> {
        if real_teams.is_empty() {
            return None;
        }

        let mut ranked: Vec<&RealTeam> = real_teams.iter().collect();
        ranked.sort_by(|a, b| b.strength.cmp(&a.strength).then(a.id.cmp(&b.id)));

        let index = usize::from(match_number.saturating_sub(1)) % ranked.len();
        Some(ranked[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::NullEventLog;
    use crate::utils::SequenceRandom;

    fn team() -> Team {
        Team::new(10, 3, String::from("Dynamo Kebab"), String::from("Sam"))
    }

    fn resolve_with_roll(starting_score: i32, roll: i32) -> SimOutcome {
        let mut random = SequenceRandom::new(&[roll]);
        let mut events = NullEventLog;

        SimResolver::resolve(&team(), starting_score, "Catenaccio FC", &mut random, &mut events)
    }

    #[test]
    fn test_roll_bonus_bands() {
        assert_eq!(SimResolver::roll_bonus(-5), -2);
        assert_eq!(SimResolver::roll_bonus(0), -1);
        assert_eq!(SimResolver::roll_bonus(19), -1);
        assert_eq!(SimResolver::roll_bonus(20), 0);
        assert_eq!(SimResolver::roll_bonus(39), 0);
        assert_eq!(SimResolver::roll_bonus(40), 1);
        assert_eq!(SimResolver::roll_bonus(65), 2);
    }

    #[test]
    fn test_weak_start_shifts_thresholds_against_the_team() {
        // Starting 19 carries a -1 bonus: win from 11, draw from 9.
        assert_eq!(resolve_with_roll(19, 11), SimOutcome::Win);
        assert_eq!(resolve_with_roll(19, 10), SimOutcome::Draw);
        assert_eq!(resolve_with_roll(19, 9), SimOutcome::Draw);
        assert_eq!(resolve_with_roll(19, 8), SimOutcome::Loss);
        assert_eq!(resolve_with_roll(19, 1), SimOutcome::Loss);
    }

    #[test]
    fn test_neutral_band_thresholds() {
        // Starting 20 sits at the band boundary: win from 10, draw from 8.
        assert_eq!(resolve_with_roll(20, 11), SimOutcome::Win);
        assert_eq!(resolve_with_roll(20, 10), SimOutcome::Win);
        assert_eq!(resolve_with_roll(20, 9), SimOutcome::Draw);
        assert_eq!(resolve_with_roll(20, 8), SimOutcome::Draw);
        assert_eq!(resolve_with_roll(20, 7), SimOutcome::Loss);
        assert_eq!(resolve_with_roll(20, 1), SimOutcome::Loss);
    }

    #[test]
    fn test_strong_start_shifts_thresholds_towards_the_team() {
        // Starting 40 earns +1: win from 9, draw from 7.
        assert_eq!(resolve_with_roll(40, 9), SimOutcome::Win);
        assert_eq!(resolve_with_roll(40, 8), SimOutcome::Draw);
        assert_eq!(resolve_with_roll(40, 7), SimOutcome::Draw);
        assert_eq!(resolve_with_roll(40, 6), SimOutcome::Loss);
    }

    #[test]
    fn test_points_mapping() {
        assert_eq!(SimOutcome::Win.points(), 6);
        assert_eq!(SimOutcome::Draw.points(), 2);
        assert_eq!(SimOutcome::Loss.points(), 0);
    }

    #[test]
    fn test_narration_reports_the_outcome() {
        struct RecordingLog(Vec<(u32, String)>);

        impl EventLog for RecordingLog {
            fn append(&mut self, game_id: u32, message: String) {
                self.0.push((game_id, message));
            }
        }

        let mut random = SequenceRandom::new(&[12]);
        let mut events = RecordingLog(Vec::new());

        let outcome =
            SimResolver::resolve(&team(), 20, "Catenaccio FC", &mut random, &mut events);

        assert_eq!(outcome, SimOutcome::Win);
        let (game_id, message) = &events.0[0];
        assert_eq!(*game_id, 3);
        assert!(message.contains("Dynamo Kebab"));
        assert!(message.contains("Catenaccio FC"));
        assert!(message.contains("rolled 12"));
    }

    #[test]
    fn test_flavour_opponents_rotate_by_strength() {
        let clubs = vec![
            RealTeam::new(1, String::from("Mid Table FC"), 5),
            RealTeam::new(2, String::from("Galacticos"), 7),
            RealTeam::new(3, String::from("Steady United"), 6),
        ];

        let picks: Vec<u32> = (1..=5)
            .map(|n| SimResolver::flavour_opponent(&clubs, n).unwrap().id)
            .collect();

        // Strength order 2, 3, 1, then wrapping.
        assert_eq!(picks, vec![2, 3, 1, 2, 3]);
    }

    #[test]
    fn test_flavour_opponent_empty_pool() {
        assert!(SimResolver::flavour_opponent(&[], 1).is_none());
    }
}
