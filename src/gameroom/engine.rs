use super::registry::Registry;
use super::reject::Reject;
use super::room::Outcome;
use crate::PlayerId;
use crate::gameplay::Coin;
use crate::gameplay::Slot;

/// Applies actions to rooms under the per-room serialization contract:
/// clone the room handle out of the registry, release the map, take the
/// room's own lock, act. The toss flip is drawn here, at the boundary, so
/// everything below stays deterministic.
pub struct SessionEngine {
    registry: Registry,
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(Registry::default())
    }
}

impl SessionEngine {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Seat a player in `key`, creating the room on first join.
    pub async fn join(&self, key: &str, id: PlayerId, name: &str) -> Result<(Slot, Outcome), Reject> {
        loop {
            let cell = self.registry.obtain(key).await;
            let mut room = cell.lock().await;
            if room.retired() {
                // lost a race with teardown; take a fresh room
                continue;
            }
            return room
                .join(id, name)
                .inspect(|(slot, _)| log::info!("[room {}] {} seated as P{}", key, name, slot));
        }
    }

    /// Resolve the toss for `key` with a freshly drawn coin.
    pub async fn call_toss(&self, key: &str, id: PlayerId, call: Coin) -> Result<Outcome, Reject> {
        let flip = Coin::flip(&mut rand::rng());
        let cell = self.registry.lookup(key).await.ok_or(Reject::UnknownRoom)?;
        let mut room = cell.lock().await;
        if room.retired() {
            return Err(Reject::UnknownRoom);
        }
        room.call_toss(id, call, flip)
            .inspect(|outcome| log::info!("[room {}] {}", key, outcome.events[0]))
    }

    /// Submit a number for the ball in flight.
    pub async fn submit_choice(&self, key: &str, id: PlayerId, value: u8) -> Result<Outcome, Reject> {
        let cell = self.registry.lookup(key).await.ok_or(Reject::UnknownRoom)?;
        let mut room = cell.lock().await;
        if room.retired() {
            return Err(Reject::UnknownRoom);
        }
        room.submit(id, value)
            .inspect(|outcome| log::debug!("[room {}] {}", key, outcome.state.last_event()))
    }

    /// Replace the session with a fresh toss-phase state.
    pub async fn reset(&self, key: &str, id: PlayerId) -> Result<Outcome, Reject> {
        let cell = self.registry.lookup(key).await.ok_or(Reject::UnknownRoom)?;
        let mut room = cell.lock().await;
        if room.retired() {
            return Err(Reject::UnknownRoom);
        }
        room.reset(id)
            .inspect(|_| log::info!("[room {}] session reset", key))
    }

    /// Unseat a player and tear the room down if nobody is left.
    pub async fn leave(&self, key: &str, id: PlayerId) -> Result<Outcome, Reject> {
        let outcome = {
            let cell = self.registry.lookup(key).await.ok_or(Reject::UnknownRoom)?;
            let mut room = cell.lock().await;
            if room.retired() {
                return Err(Reject::UnknownRoom);
            }
            room.leave(id)?
        };
        if outcome.roster.is_empty() {
            self.registry.sweep(key).await;
        }
        Ok(outcome)
    }
}
