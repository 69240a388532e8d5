use crate::player::Player;
use serde::{Deserialize, Serialize};

pub const GOALKEEPER_POSITION: u8 = 1;
pub const MAX_DEF_POSITION: u8 = 5;
pub const MAX_MID_POSITION: u8 = 9;
pub const MAX_LINEUP_POSITION: u8 = 11;

/// Star totals for the three scoring segments of a lineup. The goalkeeper
/// slot belongs to none of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentScores {
    pub def: i32,
    pub mid: i32,
    pub fwd: i32,
}

impl SegmentScores {
    pub fn total(&self) -> i32 {
        self.def + self.mid + self.fwd
    }
}

/// Computes per-segment star totals for a fielded lineup.
///
/// Slots 2..=5 score into defence, 6..=9 into midfield and 10..=11 into
/// attack. Each occupied slot contributes its star rating, a chemistry
/// point when the player in front of it shares a real club or a position,
/// and the captain's stars are multiplied by the team's captain boost.
pub struct LineupScorer;

impl LineupScorer {
    pub fn score(players: &[Player], captain_boost: u8) -> SegmentScores {
        let mut slots: [Option<&Player>; (MAX_LINEUP_POSITION + 1) as usize] =
            [None; (MAX_LINEUP_POSITION + 1) as usize];

        // Injured players leave their slot empty and break the chemistry
        // chain, exactly like an unfilled slot.
        for player in players {
            if player.injured {
                continue;
            }

            if let Some(slot) = player.slot {
                if (GOALKEEPER_POSITION..=MAX_LINEUP_POSITION).contains(&slot) {
                    slots[slot as usize] = Some(player);
                }
            }
        }

        let mut scores = SegmentScores::default();
        let boost = i32::from(captain_boost).max(1);

        for slot in (GOALKEEPER_POSITION + 1)..=MAX_LINEUP_POSITION {
            let Some(player) = slots[slot as usize] else {
                continue;
            };

            let stars = i32::from(player.overall);
            let mut contribution = stars;

            if player.captain {
                contribution += (boost - 1) * stars;
            }

            // Chemistry is computed once per adjacent pair and credited to
            // the rear player's segment.
            if let Some(previous) = slots[(slot - 1) as usize] {
                contribution += previous.chemistry_with(player);
            }

            match slot {
                2..=MAX_DEF_POSITION => scores.def += contribution,
                6..=MAX_MID_POSITION => scores.mid += contribution,
                _ => scores.fwd += contribution,
            }
        }

        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerPosition;

    fn fielded(
        id: u32,
        real_team_id: u32,
        overall: u8,
        position: PlayerPosition,
        slot: u8,
    ) -> Player {
        let mut player = Player::new(id, format!("Player {}", id), real_team_id, overall, position);
        player.slot = Some(slot);
        player
    }

    #[test]
    fn test_empty_lineup_scores_nothing() {
        assert_eq!(LineupScorer::score(&[], 3), SegmentScores::default());
    }

    #[test]
    fn test_lone_captain_gets_boosted_stars_and_no_chemistry() {
        let mut striker = fielded(1, 5, 5, PlayerPosition::Forward, 10);
        striker.captain = true;

        let scores = LineupScorer::score(&[striker], 3);

        assert_eq!(
            scores,
            SegmentScores {
                def: 0,
                mid: 0,
                fwd: 5 + 2 * 5,
            }
        );
    }

    #[test]
    fn test_goalkeeper_scores_no_segment() {
        let keeper = fielded(1, 5, 7, PlayerPosition::Goalkeeper, 1);

        assert_eq!(LineupScorer::score(&[keeper], 1), SegmentScores::default());
    }

    #[test]
    fn test_captain_boost_is_lost_on_the_goalkeeper() {
        let mut keeper = fielded(1, 5, 7, PlayerPosition::Goalkeeper, 1);
        keeper.captain = true;

        assert_eq!(LineupScorer::score(&[keeper], 4), SegmentScores::default());
    }

    #[test]
    fn test_goalkeeper_feeds_chemistry_into_defence() {
        let keeper = fielded(1, 5, 7, PlayerPosition::Goalkeeper, 1);
        let defender = fielded(2, 5, 4, PlayerPosition::Defender, 2);

        let scores = LineupScorer::score(&[keeper, defender], 1);

        assert_eq!(
            scores,
            SegmentScores {
                def: 4 + 1,
                mid: 0,
                fwd: 0,
            }
        );
    }

    #[test]
    fn test_shared_club_chemistry_counted_once() {
        let first = fielded(1, 7, 4, PlayerPosition::Defender, 2);
        let second = fielded(2, 7, 4, PlayerPosition::Forward, 3);

        let scores = LineupScorer::score(&[first, second], 1);

        // 4 + (4 + 1): one chemistry point for the pair, not two.
        assert_eq!(scores.def, 9);
    }

    #[test]
    fn test_boundary_chemistry_credits_the_rear_segment() {
        let defender = fielded(1, 3, 3, PlayerPosition::Defender, 5);
        let midfielder = fielded(2, 3, 4, PlayerPosition::Midfielder, 6);

        let scores = LineupScorer::score(&[defender, midfielder], 1);

        assert_eq!(scores.def, 3);
        assert_eq!(scores.mid, 4 + 1);
        assert_eq!(scores.fwd, 0);
    }

    #[test]
    fn test_gap_breaks_the_chemistry_chain() {
        let first = fielded(1, 7, 4, PlayerPosition::Defender, 2);
        let third = fielded(2, 7, 4, PlayerPosition::Defender, 4);

        let scores = LineupScorer::score(&[first, third], 1);

        assert_eq!(scores.def, 8);
    }

    #[test]
    fn test_injured_player_is_an_empty_slot() {
        let first = fielded(1, 7, 4, PlayerPosition::Defender, 2);
        let mut second = fielded(2, 7, 5, PlayerPosition::Defender, 3);
        second.injured = true;
        let third = fielded(3, 7, 4, PlayerPosition::Defender, 4);

        let scores = LineupScorer::score(&[first, second, third], 1);

        // The injured defender neither scores nor links slots 2 and 4.
        assert_eq!(scores.def, 8);
    }

    #[test]
    fn test_out_of_range_slot_is_ignored() {
        let stray = fielded(1, 7, 6, PlayerPosition::Forward, 12);

        assert_eq!(LineupScorer::score(&[stray], 1), SegmentScores::default());
    }

    #[test]
    fn test_full_lineup_segment_totals() {
        let mut players = vec![fielded(1, 1, 5, PlayerPosition::Goalkeeper, 1)];

        for slot in 2..=5 {
            players.push(fielded(slot as u32, 2, 3, PlayerPosition::Defender, slot));
        }
        for slot in 6..=9 {
            players.push(fielded(slot as u32, 3, 4, PlayerPosition::Midfielder, slot));
        }
        for slot in 10..=11 {
            players.push(fielded(slot as u32, 4, 5, PlayerPosition::Forward, slot));
        }

        let scores = LineupScorer::score(&players, 1);

        // Defence: 4 x 3 stars, chemistry within slots 3..=5.
        assert_eq!(scores.def, 12 + 3);
        // Midfield: 4 x 4 stars, chemistry within slots 7..=9 plus the
        // boundary pair at slot 6 (different club and position, so none).
        assert_eq!(scores.mid, 16 + 3);
        // Attack: 2 x 5 stars, chemistry at slot 11 only.
        assert_eq!(scores.fwd, 10 + 1);
    }
}
