use super::slot::Slot;
use crate::BALLS_PER_OVER;
use crate::OVERS_LIMIT;
use crate::Runs;
use crate::WICKETS_LIMIT;
use serde::ser::SerializeMap;
use serde::ser::SerializeStruct;

/// One side's batting line for the match.
/// Overs are derived from balls faced and never stored separately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattingStats {
    pub runs: Runs,
    pub wickets: u8,
    pub balls: u16,
}

impl BattingStats {
    /// Completed overs, floor of balls over six.
    pub fn overs(&self) -> u16 {
        self.balls / BALLS_PER_OVER
    }
    /// True once this line has hit the wickets or overs limit.
    pub fn exhausted(&self) -> bool {
        self.wickets >= WICKETS_LIMIT || self.overs() >= OVERS_LIMIT
    }
}

impl serde::Serialize for BattingStats {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BattingStats", 4)?;
        s.serialize_field("runs", &self.runs)?;
        s.serialize_field("wickets", &self.wickets)?;
        s.serialize_field("balls", &self.balls)?;
        s.serialize_field("overs", &self.overs())?;
        s.end()
    }
}

/// Both batting lines, indexed by seat. Serializes as a map keyed by seat
/// number so clients address it the same way they address slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard([BattingStats; 2]);

impl Scoreboard {
    pub fn get(&self, slot: Slot) -> &BattingStats {
        &self.0[slot.index()]
    }
    pub fn get_mut(&mut self, slot: Slot) -> &mut BattingStats {
        &mut self.0[slot.index()]
    }
}

impl serde::Serialize for Scoreboard {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(2))?;
        m.serialize_entry("1", self.get(Slot::One))?;
        m.serialize_entry("2", self.get(Slot::Two))?;
        m.end()
    }
}
