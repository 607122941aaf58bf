use super::roster::SeatView;
use crate::gameplay::Coin;
use crate::gameplay::Role;
use crate::gameplay::SessionState;
use crate::gameplay::Slot;
use serde::Deserialize;
use serde::Serialize;

/// Messages sent from server to clients over WebSocket text frames.
/// Every game event carries the authoritative, identity-free snapshot so
/// clients never derive state on their own.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// A seat changed hands (join or rejoin).
    RosterUpdated {
        players: Vec<SeatView>,
        state: SessionState,
    },
    /// Both seats filled; the toss is open.
    SessionStarted { state: SessionState },
    /// The coin has landed and sides are assigned.
    TossResolved {
        call: Coin,
        outcome: Coin,
        winner_slot: Slot,
        state: SessionState,
    },
    /// The batsman's number is in; the bowler is up.
    ChoiceRecorded { role: Role, state: SessionState },
    /// A ball resolved: runs, a wicket, an innings change, or the end.
    BallResolved { state: SessionState },
    /// The match state was replaced wholesale, back to the toss.
    SessionReset { state: SessionState },
    /// A seat emptied. The match does not forfeit; it stalls.
    PlayerLeft { slot: Slot, state: SessionState },
    /// Join refused: both seats already taken.
    RoomFull,
    /// Any other refused action, delivered only to the offender.
    Rejected { reason: String },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

/// Messages clients send. The acting identity is the connection itself,
/// never part of the payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Join { room: String, name: String },
    TossCall { call: Coin },
    Choice { value: u8 },
    Reset,
    Leave,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_messages_tag_in_kebab_case() {
        let json = ServerMessage::SessionStarted {
            state: SessionState::toss(),
        }
        .to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "session-started");
        assert_eq!(value["state"]["phase"], "toss");
    }

    #[test]
    fn toss_resolution_carries_call_and_outcome() {
        let mut state = SessionState::toss();
        state.resolve_toss(Slot::One, Coin::Heads, Coin::Tails);
        let value: serde_json::Value = serde_json::from_str(
            &ServerMessage::TossResolved {
                call: Coin::Heads,
                outcome: Coin::Tails,
                winner_slot: Slot::Two,
                state,
            }
            .to_json(),
        )
        .unwrap();
        assert_eq!(value["type"], "toss-resolved");
        assert_eq!(value["call"], "heads");
        assert_eq!(value["outcome"], "tails");
        assert_eq!(value["winner_slot"], 2);
    }

    #[test]
    fn client_messages_decode_from_tagged_json() {
        let join: ClientMessage =
            serde_json::from_str(r#"{"type":"join","room":"abc","name":"alice"}"#).unwrap();
        assert!(matches!(join, ClientMessage::Join { room, name } if room == "abc" && name == "alice"));
        let toss: ClientMessage =
            serde_json::from_str(r#"{"type":"toss-call","call":"tails"}"#).unwrap();
        assert!(matches!(toss, ClientMessage::TossCall { call: Coin::Tails }));
        let choice: ClientMessage = serde_json::from_str(r#"{"type":"choice","value":4}"#).unwrap();
        assert!(matches!(choice, ClientMessage::Choice { value: 4 }));
        let reset: ClientMessage = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert!(matches!(reset, ClientMessage::Reset));
        let leave: ClientMessage = serde_json::from_str(r#"{"type":"leave"}"#).unwrap();
        assert!(matches!(leave, ClientMessage::Leave));
    }

    #[test]
    fn out_of_range_values_still_decode() {
        // range enforcement belongs to the engine, not the wire
        let choice: ClientMessage = serde_json::from_str(r#"{"type":"choice","value":7}"#).unwrap();
        assert!(matches!(choice, ClientMessage::Choice { value: 7 }));
    }
}
