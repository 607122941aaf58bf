use super::event::Event;
use super::reject::Reject;
use super::roster::Roster;
use super::roster::SeatView;
use crate::PlayerId;
use crate::RoomKey;
use crate::gameplay::Choice;
use crate::gameplay::Coin;
use crate::gameplay::Phase;
use crate::gameplay::Role;
use crate::gameplay::SessionState;
use crate::gameplay::Slot;

/// What a successfully applied action produces: the authoritative snapshot
/// after the transition, the seats as broadcastable views, and the
/// transitions to announce.
#[derive(Clone, Debug)]
pub struct Outcome {
    pub state: SessionState,
    pub roster: Vec<SeatView>,
    pub events: Vec<Event>,
}

/// One live room: the authoritative state plus its two-seat roster.
///
/// Every method is synchronous and deterministic; the engine supplies
/// locking and randomness from outside, which keeps this whole layer
/// replayable given recorded toss outcomes.
#[derive(Clone, Debug)]
pub struct Room {
    key: RoomKey,
    roster: Roster,
    state: SessionState,
    retired: bool,
}

impl Room {
    pub fn new(key: RoomKey) -> Self {
        Self {
            key,
            roster: Roster::default(),
            state: SessionState::new(),
            retired: false,
        }
    }
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn state(&self) -> &SessionState {
        &self.state
    }
    /// Torn down by the registry; a holder of a stale handle must not act
    /// on this instance.
    pub fn retired(&self) -> bool {
        self.retired
    }
    pub(crate) fn retire(&mut self) {
        self.retired = true;
    }

    fn outcome(&self, events: Vec<Event>) -> Outcome {
        Outcome {
            state: self.state.clone(),
            roster: self.roster.view(),
            events,
        }
    }
}

impl Room {
    /// Seat a player. Repeat joins by the same connection are idempotent.
    /// The second distinct seat opens the toss and starts the session.
    pub fn join(&mut self, id: PlayerId, name: &str) -> Result<(Slot, Outcome), Reject> {
        let newcomer = self.roster.slot_of(id).is_none();
        let slot = self.roster.seat(id, name)?;
        let mut events = vec![Event::RosterUpdated];
        if newcomer && self.roster.is_full() {
            if self.state.phase() == Phase::AwaitingPlayers {
                self.state.start();
            }
            events.push(Event::SessionStarted);
        }
        Ok((slot, self.outcome(events)))
    }

    /// Apply a toss call with the outcome already drawn. The first caller
    /// is binding; under per-room serialization the loser of a call race
    /// observes the phase already advanced and lands in WrongPhase.
    pub fn call_toss(&mut self, id: PlayerId, call: Coin, outcome: Coin) -> Result<Outcome, Reject> {
        let slot = self.roster.slot_of(id).ok_or(Reject::NotYourTurn)?;
        if self.state.phase() != Phase::Toss {
            return Err(Reject::WrongPhase);
        }
        let winner = self.state.resolve_toss(slot, call, outcome);
        Ok(self.outcome(vec![Event::TossResolved {
            call,
            outcome,
            winner,
        }]))
    }

    /// Submit a number for the ball in flight. The batsman's submission
    /// records and hands the ball to the bowler; the bowler's submission
    /// resolves it on the spot.
    pub fn submit(&mut self, id: PlayerId, value: u8) -> Result<Outcome, Reject> {
        let choice = Choice::try_from(value).map_err(|_| Reject::OutOfRange)?;
        if self.state.phase() != Phase::InningsInProgress {
            return Err(Reject::WrongPhase);
        }
        let slot = self.roster.slot_of(id).ok_or(Reject::NotYourTurn)?;
        let role = self.state.role_of(slot).ok_or(Reject::NotYourTurn)?;
        if self.state.awaiting() != Some(role) {
            return match self.state.recorded(role) {
                Some(_) => Err(Reject::AlreadyChosen),
                None => Err(Reject::NotYourTurn),
            };
        }
        match role {
            Role::Batsman => {
                self.state.record_batsman(choice);
                Ok(self.outcome(vec![Event::ChoiceRecorded { role }]))
            }
            Role::Bowler => {
                let batsman = self.state.recorded(Role::Batsman).ok_or(Reject::NotYourTurn)?;
                let batting = self.state.seat_of(Role::Batsman).ok_or(Reject::WrongPhase)?;
                self.state.deliver(batting, batsman, choice);
                Ok(self.outcome(vec![Event::BallResolved]))
            }
        }
    }

    /// Replace the state wholesale with a fresh toss-phase state. Roster
    /// and slot assignments survive.
    pub fn reset(&mut self, id: PlayerId) -> Result<Outcome, Reject> {
        self.roster.slot_of(id).ok_or(Reject::NotYourTurn)?;
        self.state = SessionState::toss();
        Ok(self.outcome(vec![Event::SessionReset]))
    }

    /// Unseat a player. The state is left untouched; the departed seat can
    /// no longer act because its connection id is gone from the roster.
    /// The registry destroys the room once the roster empties.
    pub fn leave(&mut self, id: PlayerId) -> Result<Outcome, Reject> {
        let player = self.roster.remove(id).ok_or(Reject::NotYourTurn)?;
        Ok(self.outcome(vec![Event::PlayerLeft {
            slot: player.slot(),
        }]))
    }
}
