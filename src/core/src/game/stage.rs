use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The five head-to-head rounds of a season, in playing order.
pub const MATCH_STAGES: [Stage; 5] = [
    Stage::Match1,
    Stage::Match2,
    Stage::Match3,
    Stage::Match4,
    Stage::Match5,
];

/// Phase of a game. Variant order is chronological, so the derived `Ord`
/// sorts fixtures and stages into season order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stage {
    NotStarted,
    Training,
    Scouting,
    Investments,
    DeadlineDay,
    Match1,
    Match2,
    Match3,
    Match4,
    Match5,
    CupQuarterFinal,
    CupSemiFinal,
    CupFinal,
    SuperCup,
}

impl Stage {
    /// The following phase in the canonical sequence. The cup rounds are
    /// only entered when a team actually qualifies; callers that skip them
    /// start the next season at `Training` instead.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::NotStarted => Some(Stage::Training),
            Stage::Training => Some(Stage::Scouting),
            Stage::Scouting => Some(Stage::Investments),
            Stage::Investments => Some(Stage::DeadlineDay),
            Stage::DeadlineDay => Some(Stage::Match1),
            Stage::Match1 => Some(Stage::Match2),
            Stage::Match2 => Some(Stage::Match3),
            Stage::Match3 => Some(Stage::Match4),
            Stage::Match4 => Some(Stage::Match5),
            Stage::Match5 => Some(Stage::CupQuarterFinal),
            Stage::CupQuarterFinal => Some(Stage::CupSemiFinal),
            Stage::CupSemiFinal => Some(Stage::CupFinal),
            Stage::CupFinal => Some(Stage::SuperCup),
            Stage::SuperCup => None,
        }
    }

    pub fn is_match_stage(&self) -> bool {
        MATCH_STAGES.contains(self)
    }

    pub fn is_cup_stage(&self) -> bool {
        matches!(
            self,
            Stage::CupQuarterFinal | Stage::CupSemiFinal | Stage::CupFinal
        )
    }

    /// 1-based round number for `Match1..Match5`, `None` for other stages.
    pub fn match_number(&self) -> Option<u8> {
        match self {
            Stage::Match1 => Some(1),
            Stage::Match2 => Some(2),
            Stage::Match3 => Some(3),
            Stage::Match4 => Some(4),
            Stage::Match5 => Some(5),
            _ => None,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::NotStarted => "Not Started",
            Stage::Training => "Training",
            Stage::Scouting => "Scouting",
            Stage::Investments => "Investments",
            Stage::DeadlineDay => "Deadline Day",
            Stage::Match1 => "Match 1",
            Stage::Match2 => "Match 2",
            Stage::Match3 => "Match 3",
            Stage::Match4 => "Match 4",
            Stage::Match5 => "Match 5",
            Stage::CupQuarterFinal => "Cup Quarter-Final",
            Stage::CupSemiFinal => "Cup Semi-Final",
            Stage::CupFinal => "Cup Final",
            Stage::SuperCup => "Super Cup",
        };

        write!(f, "{}", name)
    }
}
