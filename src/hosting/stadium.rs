use super::actor::Actor;
use crate::PlayerId;
use crate::RoomKey;
use crate::gameplay::Phase;
use crate::gameplay::SessionState;
use crate::gameroom::ClientMessage;
use crate::gameroom::Outcome;
use crate::gameroom::Protocol;
use crate::gameroom::Reject;
use crate::gameroom::ServerMessage;
use crate::gameroom::SessionEngine;
use crate::gameroom::players::Fish;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

type Tx = UnboundedSender<String>;

/// A connected client's outbound frame channel.
struct Peer {
    id: PlayerId,
    tx: Tx,
}

/// A solo room's automated opponent: its seat identity and the channel its
/// actor task watches for snapshots.
struct Bot {
    id: PlayerId,
    tx: UnboundedSender<SessionState>,
}

/// Connection-side bookkeeping around the engine: who is plugged into which
/// room, where their outbound frames go, and which rooms carry a bot. The
/// engine stays transport-agnostic; everything socket-shaped lives here.
pub struct Stadium {
    engine: SessionEngine,
    peers: RwLock<HashMap<RoomKey, Vec<Peer>>>,
    seats: RwLock<HashMap<PlayerId, RoomKey>>,
    bots: RwLock<HashMap<RoomKey, Bot>>,
    reserved: RwLock<HashSet<RoomKey>>,
}

impl Default for Stadium {
    fn default() -> Self {
        Self {
            engine: SessionEngine::default(),
            peers: RwLock::new(HashMap::new()),
            seats: RwLock::new(HashMap::new()),
            bots: RwLock::new(HashMap::new()),
            reserved: RwLock::new(HashSet::new()),
        }
    }
}

impl Stadium {
    /// Reserve a room whose second seat will be taken by a Fish as soon as
    /// the first human lands. Returns the fresh room key.
    pub async fn solo(&self) -> RoomKey {
        let mut key = uuid::Uuid::new_v4().simple().to_string();
        key.truncate(6);
        self.reserved.write().await.insert(key.clone());
        log::info!("[stadium] reserved solo room {}", key);
        key
    }

    /// Apply one decoded client action and fan out whatever it produced.
    pub async fn handle(self: &Arc<Self>, id: PlayerId, tx: &Tx, message: ClientMessage) {
        match message {
            ClientMessage::Join { room, name } => self.join(id, tx, &room, &name).await,
            ClientMessage::Leave => self.depart(id).await,
            ClientMessage::TossCall { call } => match self.room_of(id).await {
                Some(key) => {
                    let result = self.engine.call_toss(&key, id, call).await;
                    self.deliver(&key, tx, result).await;
                }
                None => Self::refuse(tx, Reject::UnknownRoom),
            },
            ClientMessage::Choice { value } => match self.room_of(id).await {
                Some(key) => {
                    let result = self.engine.submit_choice(&key, id, value).await;
                    self.deliver(&key, tx, result).await;
                }
                None => Self::refuse(tx, Reject::UnknownRoom),
            },
            ClientMessage::Reset => match self.room_of(id).await {
                Some(key) => {
                    let result = self.engine.reset(&key, id).await;
                    self.deliver(&key, tx, result).await;
                }
                None => Self::refuse(tx, Reject::UnknownRoom),
            },
        }
    }

    /// Unseat a connection, on explicit leave or socket teardown. A solo
    /// room's bot goes home when its human does.
    pub async fn depart(self: &Arc<Self>, id: PlayerId) {
        let Some(key) = self.seats.write().await.remove(&id) else {
            return;
        };
        if let Some(peers) = self.peers.write().await.get_mut(&key) {
            peers.retain(|p| p.id != id);
        }
        match self.engine.leave(&key, id).await {
            Ok(outcome) => self.broadcast(&key, &outcome).await,
            Err(reject) => log::debug!("[stadium] leave from {} refused: {}", key, reject),
        }
        let bot = self.bots.read().await.get(&key).map(|b| b.id);
        if let Some(bot_id) = bot {
            if let Ok(outcome) = self.engine.leave(&key, bot_id).await {
                self.broadcast(&key, &outcome).await;
            }
        }
    }

    /// Engine path for bot submissions; failures are logged, never fatal.
    pub(crate) async fn submit(self: &Arc<Self>, key: &str, id: PlayerId, value: u8) {
        match self.engine.submit_choice(key, id, value).await {
            Ok(outcome) => self.broadcast(key, &outcome).await,
            Err(reject) => log::warn!("[room {}] bot submission refused: {}", key, reject),
        }
    }
}

impl Stadium {
    async fn join(self: &Arc<Self>, id: PlayerId, tx: &Tx, key: &str, name: &str) {
        match self.engine.join(key, id, name).await {
            Ok((slot, outcome)) => {
                log::debug!("[stadium] {} -> room {} (P{})", id, key, slot);
                self.seats.write().await.insert(id, key.to_string());
                {
                    let mut peers = self.peers.write().await;
                    let room = peers.entry(key.to_string()).or_default();
                    if !room.iter().any(|p| p.id == id) {
                        room.push(Peer { id, tx: tx.clone() });
                    }
                }
                self.broadcast(key, &outcome).await;
                self.adopt(key, &outcome).await;
            }
            Err(reject) => Self::refuse(tx, reject),
        }
    }

    /// Seat the reserved Fish once the first human lands in a solo room.
    async fn adopt(self: &Arc<Self>, key: &str, outcome: &Outcome) {
        if outcome.roster.len() != 1 || !self.reserved.write().await.remove(key) {
            return;
        }
        let bot = PlayerId::new_v4();
        match self.engine.join(key, bot, "Fish").await {
            Ok((slot, joined)) => {
                let tx = Actor::spawn(self.clone(), key.to_string(), bot, slot, Box::new(Fish));
                self.bots
                    .write()
                    .await
                    .insert(key.to_string(), Bot { id: bot, tx });
                self.broadcast(key, &joined).await;
            }
            Err(reject) => log::warn!("[stadium] could not seat bot in {}: {}", key, reject),
        }
    }

    /// Fan an outcome's messages out to every peer in the room, nudge the
    /// bot with the fresh snapshot, and release bookkeeping for rooms that
    /// just died.
    async fn broadcast(&self, key: &str, outcome: &Outcome) {
        let frames = Protocol::encode(outcome)
            .iter()
            .map(ServerMessage::to_json)
            .collect::<Vec<_>>();
        if let Some(peers) = self.peers.read().await.get(key) {
            for peer in peers {
                for frame in &frames {
                    if peer.tx.send(frame.clone()).is_err() {
                        log::warn!("[stadium] failed send to {} in room {}", peer.id, key);
                    }
                }
            }
        }
        if let Some(bot) = self.bots.read().await.get(key) {
            let _ = bot.tx.send(outcome.state.clone());
        }
        if outcome.state.phase() == Phase::Completed {
            match outcome.state.winner() {
                Some(slot) => log::info!("[room {}] match over, P{} wins", key, slot),
                None => log::info!("[room {}] match over, tie", key),
            }
        }
        if outcome.roster.is_empty() {
            self.peers.write().await.remove(key);
            self.bots.write().await.remove(key);
        }
    }

    async fn room_of(&self, id: PlayerId) -> Option<RoomKey> {
        self.seats.read().await.get(&id).cloned()
    }

    async fn deliver(self: &Arc<Self>, key: &str, tx: &Tx, result: Result<Outcome, Reject>) {
        match result {
            Ok(outcome) => self.broadcast(key, &outcome).await,
            Err(reject) => Self::refuse(tx, reject),
        }
    }

    fn refuse(tx: &Tx, reject: Reject) {
        let _ = tx.send(Protocol::reject(reject).to_json());
    }
}

impl Stadium {
    /// Wire one WebSocket session in: outbound frames drain from the
    /// connection's channel, inbound text decodes into actions. Dropping
    /// the socket unseats the player.
    pub fn bridge(
        self: Arc<Self>,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) {
        use futures::StreamExt;
        let id = PlayerId::new_v4();
        let (tx, mut rx) = unbounded_channel::<String>();
        log::debug!("[bridge {}] connected", id);
        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = rx.recv() => match msg {
                        Some(json) => if session.text(json).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = stream.next() => match msg {
                        Some(Ok(actix_ws::Message::Text(text))) => match Protocol::decode(&text) {
                            Ok(message) => self.handle(id, &tx, message).await,
                            Err(e) => {
                                let _ = tx.send(
                                    ServerMessage::Rejected {
                                        reason: e.to_string(),
                                    }
                                    .to_json(),
                                );
                            }
                        },
                        Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            self.depart(id).await;
            log::debug!("[bridge {}] disconnected", id);
        });
    }
}
