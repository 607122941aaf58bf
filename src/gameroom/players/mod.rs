pub mod fish;
pub use fish::*;

use crate::gameplay::Choice;

/// Source of numbers for an automated opponent.
///
/// The engine never knows whether a submission came from a human or a
/// policy; swapping implementations cannot change the rules. The async
/// design leaves room for policies that consult something remote.
#[async_trait::async_trait]
pub trait Oracle: Send {
    /// Next number to show. No memory of history is required or expected.
    async fn next_choice(&mut self) -> Choice;
}
