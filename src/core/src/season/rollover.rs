use crate::player::Player;
use crate::season::{PositionedTeamSeason, Season, TeamSeason};
use chrono::NaiveDateTime;

pub const PRIZE_MONEY_STEP: i32 = 100;

/// Season-end adjustments for one team, applied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamAward {
    pub team_id: u32,
    pub prize_money: i32,
    /// 1 for the champion, 0 for everyone else.
    pub captain_boost_increment: u8,
}

/// Everything the next season starts from.
#[derive(Debug, Clone)]
pub struct RolloverResult {
    pub season: Season,
    pub team_seasons: Vec<TeamSeason>,
    pub awards: Vec<TeamAward>,
}

/// Closes a finished season and opens the next one. Pure: the caller
/// persists the new records and applies the awards.
pub struct SeasonRollover;

impl SeasonRollover {
    /// The season-one baseline: the squad's star sum.
    pub fn initial_starting_score(players: &[Player]) -> i32 {
        players
            .iter()
            .map(|player| i32::from(player.overall))
            .sum()
    }

    /// Prize money scales linearly with the finishing position; even the
    /// bottom of the table gets one step.
    pub fn prize_money(team_count: usize, position: u8) -> i32 {
        let rank_value = team_count as i32 - i32::from(position) + 1;
        rank_value.max(0) * PRIZE_MONEY_STEP
    }

    /// Each team's new baseline is its final score from the finished
    /// season, so strength carries over and keeps building towards the
    /// victory threshold. The champion's captain boost grows by one.
    pub fn roll(
        finished: &Season,
        standings: &[PositionedTeamSeason],
        started_at: NaiveDateTime,
    ) -> RolloverResult {
        let season = Season::new(finished.game_id, finished.number + 1, started_at);

        let team_seasons = standings
            .iter()
            .map(|row| {
                TeamSeason::new(
                    finished.game_id,
                    season.number,
                    row.team_season.team_id,
                    row.team_season.score,
                )
            })
            .collect();

        let awards = standings
            .iter()
            .map(|row| TeamAward {
                team_id: row.team_season.team_id,
                prize_money: Self::prize_money(standings.len(), row.position),
                captain_boost_increment: u8::from(row.position == 1),
            })
            .collect();

        RolloverResult {
            season,
            team_seasons,
            awards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerPosition;
    use chrono::NaiveDate;

    fn started_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn standings() -> Vec<PositionedTeamSeason> {
        [(20u32, 58i32), (10, 52), (30, 47)]
            .iter()
            .enumerate()
            .map(|(index, &(team_id, score))| {
                let mut team_season = TeamSeason::new(1, 3, team_id, 40);
                team_season.score = score;
                PositionedTeamSeason {
                    position: (index + 1) as u8,
                    team_season,
                }
            })
            .collect()
    }

    #[test]
    fn test_initial_starting_score_is_the_squad_star_sum() {
        let players: Vec<Player> = [4u8, 6, 3, 5]
            .iter()
            .enumerate()
            .map(|(index, &overall)| {
                Player::new(
                    index as u32 + 1,
                    format!("Player {}", index + 1),
                    1,
                    overall,
                    PlayerPosition::Midfielder,
                )
            })
            .collect();

        assert_eq!(SeasonRollover::initial_starting_score(&players), 18);
        assert_eq!(SeasonRollover::initial_starting_score(&[]), 0);
    }

    #[test]
    fn test_prize_money_scales_with_position() {
        assert_eq!(SeasonRollover::prize_money(4, 1), 400);
        assert_eq!(SeasonRollover::prize_money(4, 2), 300);
        assert_eq!(SeasonRollover::prize_money(4, 4), 100);
        assert_eq!(SeasonRollover::prize_money(2, 1), 200);
    }

    #[test]
    fn test_roll_carries_final_scores_into_new_baselines() {
        let finished = Season::new(1, 3, started_at());

        let result = SeasonRollover::roll(&finished, &standings(), started_at());

        assert_eq!(result.season.number, 4);
        assert_eq!(result.season.game_id, 1);

        assert_eq!(result.team_seasons.len(), 3);
        let champion = &result.team_seasons[0];
        assert_eq!(champion.team_id, 20);
        assert_eq!(champion.starting_score, 58);
        assert_eq!(champion.score, 58);
        assert_eq!(champion.id, "1-4-20");
    }

    #[test]
    fn test_roll_awards_champion_boost_and_scaled_prizes() {
        let finished = Season::new(1, 3, started_at());

        let result = SeasonRollover::roll(&finished, &standings(), started_at());

        assert_eq!(
            result.awards,
            vec![
                TeamAward {
                    team_id: 20,
                    prize_money: 300,
                    captain_boost_increment: 1,
                },
                TeamAward {
                    team_id: 10,
                    prize_money: 200,
                    captain_boost_increment: 0,
                },
                TeamAward {
                    team_id: 30,
                    prize_money: 100,
                    captain_boost_increment: 0,
                },
            ]
        );
    }
}
