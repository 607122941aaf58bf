/// Rejections of a requested action. Side-effect free: a rejected action
/// leaves the room exactly as it found it, and only the offending client
/// hears about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reject {
    /// Roster already holds two distinct connection ids.
    RoomFull,
    /// Action is not valid for the room's current phase.
    WrongPhase,
    /// Acting seat does not hold the awaited role.
    NotYourTurn,
    /// Choice outside 1..=6.
    OutOfRange,
    /// This role's choice for the ball in flight is already binding.
    AlreadyChosen,
    /// No room exists under that key.
    UnknownRoom,
}

impl std::fmt::Display for Reject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoomFull => write!(f, "room already has two players"),
            Self::WrongPhase => write!(f, "action not valid in the current phase"),
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::OutOfRange => write!(f, "choice must be between 1 and 6"),
            Self::AlreadyChosen => write!(f, "choice already recorded for this ball"),
            Self::UnknownRoom => write!(f, "room not found"),
        }
    }
}

impl std::error::Error for Reject {}
