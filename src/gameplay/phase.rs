use serde::Serialize;

/// Lifecycle of a match within its room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Room open, waiting for the second seat.
    AwaitingPlayers,
    /// Both seated; waiting for a toss call.
    Toss,
    /// Balls are being bowled.
    InningsInProgress,
    /// Match decided; state is frozen.
    Completed,
}
