use serde::Serialize;

/// The side of a delivery a seat currently plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Batsman,
    Bowler,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Batsman => write!(f, "batsman"),
            Self::Bowler => write!(f, "bowler"),
        }
    }
}
