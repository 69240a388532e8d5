use crate::r#match::Fixture;
use crate::season::{PositionedTeamSeason, TeamSeason};
use itertools::Itertools;
use std::cmp::Ordering;

/// Ranks a season's teams under the league tie-break policy.
pub struct LeagueTableRanker;

impl LeagueTableRanker {
    /// Orders best to worst and stamps 1-based positions. Pure: the
    /// inputs are untouched and the returned rows are copies, so calling
    /// it twice on the same data yields the same table.
    pub fn rank(team_seasons: &[TeamSeason], fixtures: &[Fixture]) -> Vec<PositionedTeamSeason> {
        let mut ordered: Vec<&TeamSeason> = team_seasons.iter().collect();
        ordered.sort_by(|a, b| Self::compare(a, b, fixtures));

        ordered
            .into_iter()
            .enumerate()
            .map(|(index, team_season)| PositionedTeamSeason {
                position: (index + 1) as u8,
                team_season: team_season.clone(),
            })
            .collect()
    }

    /// Successive tie-breaks, most significant first: cumulative score,
    /// then the head-to-head winner, then the lower starting score, then
    /// the drawn meeting's aggregate segment totals, then reverse
    /// lexicographic id to keep the order total.
    fn compare(a: &TeamSeason, b: &TeamSeason, fixtures: &[Fixture]) -> Ordering {
        let by_score = b.score.cmp(&a.score);
        if by_score != Ordering::Equal {
            return by_score;
        }

        let meeting = Self::first_meeting(a.team_id, b.team_id, fixtures);

        if let Some(resolution) = meeting.and_then(|fixture| fixture.resolution.as_ref()) {
            if resolution.winner_team_id == Some(a.team_id) {
                return Ordering::Less;
            }
            if resolution.winner_team_id == Some(b.team_id) {
                return Ordering::Greater;
            }
        }

        // The handicap rule: whoever started weaker ranks higher.
        let by_start = a.starting_score.cmp(&b.starting_score);
        if by_start != Ordering::Equal {
            return by_start;
        }

        if let Some(fixture) = meeting {
            if let Some(resolution) = &fixture.resolution {
                if resolution.draw {
                    let (a_total, b_total) = if fixture.home_team_id == a.team_id {
                        (resolution.home_score.total(), resolution.away_score.total())
                    } else {
                        (resolution.away_score.total(), resolution.home_score.total())
                    };

                    let by_total = b_total.cmp(&a_total);
                    if by_total != Ordering::Equal {
                        return by_total;
                    }
                }
            }
        }

        b.id.cmp(&a.id)
    }

    /// The earliest resolved meeting between two teams this season.
    /// Counts where teams meet more than once defer to the first meeting
    /// in stage order.
    fn first_meeting<'a>(first: u32, second: u32, fixtures: &'a [Fixture]) -> Option<&'a Fixture> {
        fixtures
            .iter()
            .filter(|fixture| {
                fixture.is_resolved()
                    && ((fixture.home_team_id == first && fixture.away_team_id == Some(second))
                        || (fixture.home_team_id == second
                            && fixture.away_team_id == Some(first)))
            })
            .min_by_key(|fixture| fixture.stage)
    }

    /// Display-only grouping for season views: by identifier, then
    /// starting score, then computed position. Presentation order, not
    /// the ranking.
    pub fn order_teams_in_season(
        positioned: &[PositionedTeamSeason],
    ) -> Vec<PositionedTeamSeason> {
        positioned
            .iter()
            .cloned()
            .sorted_by(|a, b| {
                a.team_season
                    .id
                    .cmp(&b.team_season.id)
                    .then_with(|| {
                        a.team_season
                            .starting_score
                            .cmp(&b.team_season.starting_score)
                    })
                    .then_with(|| a.position.cmp(&b.position))
            })
            .collect()
    }
}
