use super::Oracle;
use crate::gameplay::Choice;

/// Stock CPU opponent: uniform over 1..=6, no memory.
pub struct Fish;

#[async_trait::async_trait]
impl Oracle for Fish {
    async fn next_choice(&mut self) -> Choice {
        let ref mut rng = rand::rng();
        Choice::draw(rng)
    }
}
