use crate::game::Stage;
use crate::team::Team;
use log::error;
use serde::{Deserialize, Serialize};

/// One head-to-head meeting in a stage schedule, by team id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub home_team_id: u32,
    pub away_team_id: u32,
}

type StagePairs = &'static [(usize, usize)];

const NO_PAIRS: StagePairs = &[];

// Pairing tables per team count, one row per match stage. Entries index
// into the canonical id-sorted team list. Across the five stages every
// pair of teams meets at least once, and a team missing from a row plays
// a simulated round that stage. Domain data, not derivable.

const TABLE_1: [StagePairs; 5] = [NO_PAIRS; 5];

const TABLE_2: [StagePairs; 5] = [
    &[(0, 1)],
    &[(1, 0)],
    &[(0, 1)],
    &[(1, 0)],
    &[(0, 1)],
];

const TABLE_3: [StagePairs; 5] = [
    &[(0, 1)],
    &[(2, 0)],
    &[(1, 2)],
    &[(1, 0)],
    &[(0, 2)],
];

const TABLE_4: [StagePairs; 5] = [
    &[(0, 1), (2, 3)],
    &[(2, 0), (3, 1)],
    &[(0, 3), (1, 2)],
    &[(1, 0), (3, 2)],
    &[(3, 0), (2, 1)],
];

const TABLE_5: [StagePairs; 5] = [
    &[(1, 4), (2, 3)],
    &[(0, 1), (4, 2)],
    &[(2, 0), (3, 4)],
    &[(0, 3), (1, 2)],
    &[(4, 0), (3, 1)],
];

const TABLE_6: [StagePairs; 5] = [
    &[(5, 0), (1, 4), (2, 3)],
    &[(5, 3), (0, 1), (2, 4)],
    &[(5, 1), (0, 2), (3, 4)],
    &[(5, 4), (0, 3), (1, 2)],
    &[(5, 2), (0, 4), (1, 3)],
];

/// Produces the head-to-head schedule for a match stage from the fixed
/// per-team-count tables. Cup rounds are built by the cup bracket, not
/// through here.
pub struct FixtureScheduler;

impl FixtureScheduler {
    pub fn fixtures_for_stage(teams: &[Team], stage: Stage) -> Vec<Pairing> {
        let Some(match_number) = stage.match_number() else {
            error!("fixture schedule requested for non-match stage {}", stage);
            return Vec::new();
        };

        let Some(pairs) = Self::stage_pairs(teams.len(), match_number) else {
            error!("no fixture schedule for {} teams", teams.len());
            return Vec::new();
        };

        let order = Self::canonical_order(teams);

        pairs
            .iter()
            .map(|&(home, away)| Pairing {
                home_team_id: order[home],
                away_team_id: order[away],
            })
            .collect()
    }

    /// True when the team sits out the stage's head-to-head schedule and
    /// plays a simulated round instead. A lone team never sims: the game
    /// cannot proceed past setup with fewer than two teams.
    pub fn has_sim(team_id: u32, teams: &[Team], stage: Stage) -> bool {
        if teams.len() < 2 || !teams.iter().any(|team| team.id == team_id) {
            return false;
        }

        let Some(match_number) = stage.match_number() else {
            return false;
        };

        let Some(pairs) = Self::stage_pairs(teams.len(), match_number) else {
            return false;
        };

        let order = Self::canonical_order(teams);

        !pairs
            .iter()
            .any(|&(home, away)| order[home] == team_id || order[away] == team_id)
    }

    /// Stable id-sorted ordering the pairing tables index into, so the
    /// same team set always yields the same schedule.
    fn canonical_order(teams: &[Team]) -> Vec<u32> {
        let mut ids: Vec<u32> = teams.iter().map(|team| team.id).collect();
        ids.sort_unstable();
        ids
    }

    fn stage_pairs(team_count: usize, match_number: u8) -> Option<StagePairs> {
        let table: &[StagePairs; 5] = match team_count {
            1 => &TABLE_1,
            2 => &TABLE_2,
            3 => &TABLE_3,
            4 => &TABLE_4,
            5 => &TABLE_5,
            6 => &TABLE_6,
            _ => return None,
        };

        Some(table[usize::from(match_number - 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MATCH_STAGES;
    use std::collections::HashSet;

    fn league(count: usize) -> Vec<Team> {
        // Ids descending on purpose: the scheduler must canonicalise.
        (1..=count as u32)
            .rev()
            .map(|n| {
                Team::new(
                    n * 10,
                    1,
                    format!("Team {}", n),
                    format!("Manager {}", n),
                )
            })
            .collect()
    }

    #[test]
    fn test_each_stage_partitions_the_team_set() {
        for count in 2..=6 {
            let teams = league(count);

            for stage in MATCH_STAGES {
                let pairings = FixtureScheduler::fixtures_for_stage(&teams, stage);

                let mut paired = HashSet::new();
                for pairing in &pairings {
                    assert!(paired.insert(pairing.home_team_id));
                    assert!(paired.insert(pairing.away_team_id));
                }

                for team in &teams {
                    let in_pairing = paired.contains(&team.id);
                    let in_sim = FixtureScheduler::has_sim(team.id, &teams, stage);

                    assert!(
                        in_pairing != in_sim,
                        "team {} with {} teams at {} must be paired or simmed, not both",
                        team.id,
                        count,
                        stage
                    );
                }
            }
        }
    }

    #[test]
    fn test_round_robin_coverage_across_stages() {
        for count in 2..=6 {
            let teams = league(count);
            let mut met = HashSet::new();

            for stage in MATCH_STAGES {
                for pairing in FixtureScheduler::fixtures_for_stage(&teams, stage) {
                    let low = pairing.home_team_id.min(pairing.away_team_id);
                    let high = pairing.home_team_id.max(pairing.away_team_id);
                    assert_ne!(low, high, "a team cannot meet itself");
                    met.insert((low, high));
                }
            }

            assert_eq!(met.len(), count * (count - 1) / 2, "{} teams", count);
        }
    }

    #[test]
    fn test_schedule_ignores_input_order() {
        let reversed = league(5);
        let mut sorted = reversed.clone();
        sorted.sort_by_key(|team| team.id);

        for stage in MATCH_STAGES {
            assert_eq!(
                FixtureScheduler::fixtures_for_stage(&reversed, stage),
                FixtureScheduler::fixtures_for_stage(&sorted, stage)
            );
        }
    }

    #[test]
    fn test_two_teams_meet_every_stage_with_alternating_venue() {
        let teams = league(2);

        let opener = FixtureScheduler::fixtures_for_stage(&teams, MATCH_STAGES[0]);
        assert_eq!(
            opener,
            vec![Pairing {
                home_team_id: 10,
                away_team_id: 20,
            }]
        );

        let second = FixtureScheduler::fixtures_for_stage(&teams, MATCH_STAGES[1]);
        assert_eq!(
            second,
            vec![Pairing {
                home_team_id: 20,
                away_team_id: 10,
            }]
        );

        for stage in MATCH_STAGES {
            assert_eq!(FixtureScheduler::fixtures_for_stage(&teams, stage).len(), 1);
        }
    }

    #[test]
    fn test_three_team_league_sims_rotate() {
        let teams = league(3);

        let simmed: Vec<u32> = MATCH_STAGES
            .iter()
            .map(|&stage| {
                teams
                    .iter()
                    .map(|team| team.id)
                    .find(|&id| FixtureScheduler::has_sim(id, &teams, stage))
                    .unwrap()
            })
            .collect();

        assert_eq!(simmed, vec![30, 20, 10, 30, 20]);
    }

    #[test]
    fn test_even_team_counts_never_sim() {
        for count in [2, 4, 6] {
            let teams = league(count);

            for stage in MATCH_STAGES {
                for team in &teams {
                    assert!(!FixtureScheduler::has_sim(team.id, &teams, stage));
                }
            }
        }
    }

    #[test]
    fn test_single_team_gets_nothing() {
        let teams = league(1);

        assert!(FixtureScheduler::fixtures_for_stage(&teams, MATCH_STAGES[0]).is_empty());
        assert!(!FixtureScheduler::has_sim(10, &teams, MATCH_STAGES[0]));
    }

    #[test]
    fn test_unsupported_team_count_falls_back_to_empty() {
        let teams = league(7);

        assert!(FixtureScheduler::fixtures_for_stage(&teams, MATCH_STAGES[2]).is_empty());
        assert!(!FixtureScheduler::has_sim(10, &teams, MATCH_STAGES[2]));
    }

    #[test]
    fn test_non_match_stage_has_no_schedule() {
        let teams = league(4);

        assert!(FixtureScheduler::fixtures_for_stage(&teams, Stage::Training).is_empty());
        assert!(FixtureScheduler::fixtures_for_stage(&teams, Stage::CupFinal).is_empty());
        assert!(!FixtureScheduler::has_sim(10, &teams, Stage::Training));
    }

    #[test]
    fn test_unknown_team_never_sims() {
        let teams = league(3);

        assert!(!FixtureScheduler::has_sim(999, &teams, MATCH_STAGES[0]));
    }
}
