use super::event::Event;
use super::message::ClientMessage;
use super::message::ServerMessage;
use super::reject::Reject;
use super::room::Outcome;

/// Errors at the wire boundary.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    Malformed(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed message: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Conversion layer between internal transitions and the wire format.
pub struct Protocol;

impl Protocol {
    /// Expand an applied action into the messages to broadcast, in order.
    pub fn encode(outcome: &Outcome) -> Vec<ServerMessage> {
        outcome
            .events
            .iter()
            .map(|event| match event {
                Event::RosterUpdated => ServerMessage::RosterUpdated {
                    players: outcome.roster.clone(),
                    state: outcome.state.clone(),
                },
                Event::SessionStarted => ServerMessage::SessionStarted {
                    state: outcome.state.clone(),
                },
                Event::TossResolved {
                    call,
                    outcome: flip,
                    winner,
                } => ServerMessage::TossResolved {
                    call: *call,
                    outcome: *flip,
                    winner_slot: *winner,
                    state: outcome.state.clone(),
                },
                Event::ChoiceRecorded { role } => ServerMessage::ChoiceRecorded {
                    role: *role,
                    state: outcome.state.clone(),
                },
                Event::BallResolved => ServerMessage::BallResolved {
                    state: outcome.state.clone(),
                },
                Event::SessionReset => ServerMessage::SessionReset {
                    state: outcome.state.clone(),
                },
                Event::PlayerLeft { slot } => ServerMessage::PlayerLeft {
                    slot: *slot,
                    state: outcome.state.clone(),
                },
            })
            .collect()
    }
    /// Rejection notice for the offending client only.
    pub fn reject(reject: Reject) -> ServerMessage {
        match reject {
            Reject::RoomFull => ServerMessage::RoomFull,
            other => ServerMessage::Rejected {
                reason: other.to_string(),
            },
        }
    }
    /// Parse one client text frame.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerId;
    use crate::gameroom::Room;

    #[test]
    fn decode_rejects_garbage() {
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"no-such-action"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"join"}"#).is_err()); // missing fields
    }

    #[test]
    fn room_full_gets_its_own_notice() {
        let full = Protocol::reject(Reject::RoomFull).to_json();
        let value: serde_json::Value = serde_json::from_str(&full).unwrap();
        assert_eq!(value["type"], "room-full");
        let turned_away = Protocol::reject(Reject::NotYourTurn).to_json();
        let value: serde_json::Value = serde_json::from_str(&turned_away).unwrap();
        assert_eq!(value["type"], "rejected");
        assert_eq!(value["reason"], "not your turn");
    }

    #[test]
    fn second_join_encodes_roster_then_start() {
        let mut room = Room::new("test".to_string());
        room.join(PlayerId::new_v4(), "alice").unwrap();
        let (_, outcome) = room.join(PlayerId::new_v4(), "bob").unwrap();
        let frames = Protocol::encode(&outcome);
        assert_eq!(frames.len(), 2);
        let first: serde_json::Value =
            serde_json::from_str(&frames[0].to_json()).unwrap();
        let second: serde_json::Value =
            serde_json::from_str(&frames[1].to_json()).unwrap();
        assert_eq!(first["type"], "roster-updated");
        assert_eq!(first["players"][0]["slot"], 1);
        assert_eq!(first["players"][0]["name"], "alice");
        assert_eq!(second["type"], "session-started");
        assert_eq!(second["state"]["phase"], "toss");
    }
}
