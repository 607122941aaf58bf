use super::stadium::Stadium;
use crate::PlayerId;
use crate::RoomKey;
use crate::gameplay::Phase;
use crate::gameplay::SessionState;
use crate::gameplay::Slot;
use crate::gameroom::players::Oracle;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Runs a choice oracle in its own task, wired to one solo room.
///
/// The stadium forwards every authoritative snapshot; whenever the awaited
/// role sits in the bot's seat, the oracle supplies a number and the
/// submission takes the same engine path as a human's. One rules
/// implementation serves both modes.
pub struct Actor {
    id: PlayerId,
    slot: Slot,
    key: RoomKey,
    oracle: Box<dyn Oracle>,
    getter: UnboundedReceiver<SessionState>,
    stadium: Arc<Stadium>,
}

impl Actor {
    pub fn spawn(
        stadium: Arc<Stadium>,
        key: RoomKey,
        id: PlayerId,
        slot: Slot,
        oracle: Box<dyn Oracle>,
    ) -> UnboundedSender<SessionState> {
        let (tx, rx) = unbounded_channel();
        let actor = Self {
            id,
            slot,
            key,
            oracle,
            getter: rx,
            stadium,
        };
        tokio::spawn(actor.run());
        tx
    }
    async fn run(mut self) {
        while let Some(state) = self.getter.recv().await {
            if state.phase() != Phase::InningsInProgress {
                continue;
            }
            let up = state.awaiting().and_then(|role| state.seat_of(role));
            if up != Some(self.slot) {
                continue;
            }
            let choice = self.oracle.next_choice().await;
            log::debug!("[actor P{}] plays {} in room {}", self.slot, choice, self.key);
            self.stadium
                .submit(&self.key, self.id, u8::from(choice))
                .await;
        }
        log::debug!("[actor P{}] room {} gone, retiring", self.slot, self.key);
    }
}
