use crate::gameplay::Coin;
use crate::gameplay::Role;
use crate::gameplay::Slot;

/// Transitions produced by applying an action to a room, consumed by the
/// transport layer for broadcast. Informational: nothing downstream feeds
/// back into the rules.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    RosterUpdated,
    SessionStarted,
    TossResolved {
        call: Coin,
        outcome: Coin,
        winner: Slot,
    },
    ChoiceRecorded {
        role: Role,
    },
    BallResolved,
    SessionReset,
    PlayerLeft {
        slot: Slot,
    },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::RosterUpdated => write!(f, "roster updated"),
            Event::SessionStarted => write!(f, "session started"),
            Event::TossResolved {
                call,
                outcome,
                winner,
            } => write!(f, "toss: called {}, landed {}, P{} bats", call, outcome, winner),
            Event::ChoiceRecorded { role } => write!(f, "{} choice recorded", role),
            Event::BallResolved => write!(f, "ball resolved"),
            Event::SessionReset => write!(f, "session reset"),
            Event::PlayerLeft { slot } => write!(f, "P{} left", slot),
        }
    }
}
