use super::reject::Reject;
use crate::PlayerId;
use crate::gameplay::Slot;
use serde::Serialize;

/// A seated player. The id is the connection identity and the only way
/// actions are attributed; the slot is permanent once assigned.
#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    slot: Slot,
}

impl Player {
    pub fn id(&self) -> PlayerId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn slot(&self) -> Slot {
        self.slot
    }
}

/// Public view of a seat, safe to broadcast: no connection identity.
#[derive(Clone, Debug, Serialize)]
pub struct SeatView {
    pub slot: Slot,
    pub name: String,
}

/// The two-seat assignment contract for a room.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    seats: Vec<Player>,
}

impl Roster {
    /// Seat a player, idempotently per connection id: a repeat join returns
    /// the existing slot and changes nothing. The lowest free slot goes
    /// first, so a seat vacated by a leaver is refilled before slot two.
    pub fn seat(&mut self, id: PlayerId, name: &str) -> Result<Slot, Reject> {
        if let Some(player) = self.seats.iter().find(|p| p.id == id) {
            return Ok(player.slot);
        }
        let slot = match (self.holder(Slot::One), self.holder(Slot::Two)) {
            (None, _) => Slot::One,
            (_, None) => Slot::Two,
            _ => return Err(Reject::RoomFull),
        };
        self.seats.push(Player {
            id,
            name: name.to_string(),
            slot,
        });
        Ok(slot)
    }
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.seats.iter().position(|p| p.id == id)?;
        Some(self.seats.remove(index))
    }
    pub fn slot_of(&self, id: PlayerId) -> Option<Slot> {
        self.seats.iter().find(|p| p.id == id).map(Player::slot)
    }
    fn holder(&self, slot: Slot) -> Option<&Player> {
        self.seats.iter().find(|p| p.slot == slot)
    }
    pub fn len(&self) -> usize {
        self.seats.len()
    }
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.seats.len() == 2
    }
    /// Seats ordered by slot number.
    pub fn view(&self) -> Vec<SeatView> {
        let mut seats = self
            .seats
            .iter()
            .map(|p| SeatView {
                slot: p.slot,
                name: p.name.clone(),
            })
            .collect::<Vec<_>>();
        seats.sort_by_key(|s| s.slot.number());
        seats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> PlayerId {
        PlayerId::new_v4()
    }

    #[test]
    fn seats_fill_in_order() {
        let mut roster = Roster::default();
        assert_eq!(roster.seat(id(), "a"), Ok(Slot::One));
        assert_eq!(roster.seat(id(), "b"), Ok(Slot::Two));
        assert_eq!(roster.seat(id(), "c"), Err(Reject::RoomFull));
    }

    #[test]
    fn repeat_join_is_idempotent() {
        let mut roster = Roster::default();
        let alice = id();
        assert_eq!(roster.seat(alice, "alice"), Ok(Slot::One));
        assert_eq!(roster.seat(alice, "alice"), Ok(Slot::One));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn vacated_seat_refills_lowest_first() {
        let mut roster = Roster::default();
        let alice = id();
        roster.seat(alice, "alice").unwrap();
        roster.seat(id(), "bob").unwrap();
        roster.remove(alice).unwrap();
        assert_eq!(roster.seat(id(), "carol"), Ok(Slot::One));
    }
}
