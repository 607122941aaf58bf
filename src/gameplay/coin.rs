use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// Fair coin for the toss sub-protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    Heads,
    Tails,
}

impl Coin {
    /// Draw a fresh outcome, uniformly. Called once per toss invocation;
    /// this is the only nondeterministic input to the session rules.
    pub fn flip<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::Heads
        } else {
            Self::Tails
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Heads => write!(f, "heads"),
            Self::Tails => write!(f, "tails"),
        }
    }
}
