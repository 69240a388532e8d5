use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Display for PlayerPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            PlayerPosition::Goalkeeper => "GKP",
            PlayerPosition::Defender => "DEF",
            PlayerPosition::Midfielder => "MID",
            PlayerPosition::Forward => "FWD",
        };

        write!(f, "{}", code)
    }
}
