use super::choice::Choice;
use super::coin::Coin;
use super::phase::Phase;
use super::role::Role;
use super::slot::Slot;
use super::stats::Scoreboard;
use crate::Runs;
use serde::Serialize;

/// Choices recorded so far for the ball in flight.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct PendingChoices {
    pub batsman: Option<Choice>,
    pub bowler: Option<Choice>,
}

/// Authoritative snapshot of one match, the single source of truth for a
/// room. Pure data with well-defined transitions: the coordinator layer
/// decides which transition applies, this type guarantees the bookkeeping.
///
/// Holds after every transition:
/// - at most one pending choice is set, and `awaiting` names the other role
/// - wickets and derived overs never exceed their limits
/// - `target` is present exactly while the second innings runs
/// - `Completed` freezes the side assignments and accepts nothing further
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    phase: Phase,
    innings: u8,
    toss_winner: Option<Slot>,
    batting_slot: Option<Slot>,
    bowling_slot: Option<Slot>,
    target: Option<Runs>,
    stats: Scoreboard,
    pending_choices: PendingChoices,
    awaiting: Option<Role>,
    last_event: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Fresh room, waiting for the second seat.
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingPlayers,
            innings: 1,
            toss_winner: None,
            batting_slot: None,
            bowling_slot: None,
            target: None,
            stats: Scoreboard::default(),
            pending_choices: PendingChoices::default(),
            awaiting: None,
            last_event: String::new(),
        }
    }
    /// Fresh match ready for the toss; what a reset installs wholesale.
    pub fn toss() -> Self {
        Self {
            phase: Phase::Toss,
            ..Self::new()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn innings(&self) -> u8 {
        self.innings
    }
    pub fn toss_winner(&self) -> Option<Slot> {
        self.toss_winner
    }
    pub fn target(&self) -> Option<Runs> {
        self.target
    }
    pub fn stats(&self) -> &Scoreboard {
        &self.stats
    }
    pub fn awaiting(&self) -> Option<Role> {
        self.awaiting
    }
    pub fn last_event(&self) -> &str {
        &self.last_event
    }

    /// Seat currently holding a role, while play is live.
    pub fn seat_of(&self, role: Role) -> Option<Slot> {
        match role {
            Role::Batsman => self.batting_slot,
            Role::Bowler => self.bowling_slot,
        }
    }
    /// Role a seat currently holds, while play is live.
    pub fn role_of(&self, slot: Slot) -> Option<Role> {
        if self.batting_slot == Some(slot) {
            Some(Role::Batsman)
        } else if self.bowling_slot == Some(slot) {
            Some(Role::Bowler)
        } else {
            None
        }
    }
    /// The choice a role has recorded for the ball in flight, if any.
    pub fn recorded(&self, role: Role) -> Option<Choice> {
        match role {
            Role::Batsman => self.pending_choices.batsman,
            Role::Bowler => self.pending_choices.bowler,
        }
    }
    /// Winning seat once play is over; None is a tie.
    pub fn winner(&self) -> Option<Slot> {
        let one = self.stats.get(Slot::One).runs;
        let two = self.stats.get(Slot::Two).runs;
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Some(Slot::One),
            std::cmp::Ordering::Less => Some(Slot::Two),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl SessionState {
    /// Both seats filled; open the toss.
    pub fn start(&mut self) {
        self.phase = Phase::Toss;
    }

    /// Apply a toss call against a drawn outcome. The caller wins on a
    /// match, otherwise the other seat does; the winner bats first.
    pub fn resolve_toss(&mut self, caller: Slot, call: Coin, outcome: Coin) -> Slot {
        let winner = if call == outcome { caller } else { caller.other() };
        self.toss_winner = Some(winner);
        self.batting_slot = Some(winner);
        self.bowling_slot = Some(winner.other());
        self.innings = 1;
        self.phase = Phase::InningsInProgress;
        self.awaiting = Some(Role::Batsman);
        self.last_event = format!("Player {} won the toss and will bat first", winner);
        winner
    }

    /// Record the batsman's number; the bowler's submission now resolves
    /// the ball. No scoring happens here.
    pub fn record_batsman(&mut self, choice: Choice) {
        self.pending_choices.batsman = Some(choice);
        self.awaiting = Some(Role::Bowler);
    }

    /// Resolve one delivery. Equal numbers dismiss the batsman, anything
    /// else scores the batsman's number. Atomic: callers observe either the
    /// state before the ball or the state after it, never in between.
    pub fn deliver(&mut self, batting: Slot, batsman: Choice, bowler: Choice) {
        self.pending_choices = PendingChoices::default();
        let dismissal = batsman == bowler;
        {
            let line = self.stats.get_mut(batting);
            line.balls += 1;
            if dismissal {
                line.wickets += 1;
            } else {
                line.runs += batsman.runs();
            }
        }
        if dismissal {
            self.last_event = format!("OUT! Both chose {}", batsman);
        } else {
            self.last_event = format!("{} runs scored!", batsman);
            // the chase ends the match the moment the target falls, even
            // mid-over, before any wicket or over accounting
            if let Some(target) = self.target {
                if self.stats.get(batting).runs >= target {
                    self.phase = Phase::Completed;
                    self.awaiting = None;
                    return;
                }
            }
        }
        if self.stats.get(batting).exhausted() {
            self.end_innings(batting);
        } else {
            self.awaiting = Some(Role::Batsman);
        }
    }

    fn end_innings(&mut self, batting: Slot) {
        if self.innings == 1 {
            let target = self.stats.get(batting).runs + 1;
            self.target = Some(target);
            self.innings = 2;
            self.batting_slot = Some(batting.other());
            self.bowling_slot = Some(batting);
            self.awaiting = Some(Role::Batsman);
            self.last_event = format!("End of Innings 1. Target: {}", target);
        } else {
            self.phase = Phase::Completed;
            self.awaiting = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::BattingStats;
    use pretty_assertions::assert_eq;

    /// Toss resolved so that seat 1 bats first.
    fn live() -> SessionState {
        let mut state = SessionState::toss();
        state.resolve_toss(Slot::One, Coin::Heads, Coin::Heads);
        state
    }

    fn ball(state: &mut SessionState, batsman: u8, bowler: u8) {
        let batting = state.seat_of(Role::Batsman).unwrap();
        state.record_batsman(Choice::try_from(batsman).unwrap());
        state.deliver(
            batting,
            Choice::try_from(batsman).unwrap(),
            Choice::try_from(bowler).unwrap(),
        );
    }

    #[test]
    fn toss_caller_wins_on_match() {
        let mut state = SessionState::toss();
        let winner = state.resolve_toss(Slot::Two, Coin::Tails, Coin::Tails);
        assert_eq!(winner, Slot::Two);
        assert_eq!(state.seat_of(Role::Batsman), Some(Slot::Two));
        assert_eq!(state.seat_of(Role::Bowler), Some(Slot::One));
        assert_eq!(state.phase(), Phase::InningsInProgress);
        assert_eq!(state.awaiting(), Some(Role::Batsman));
    }

    #[test]
    fn toss_caller_loses_on_mismatch() {
        let mut state = SessionState::toss();
        let winner = state.resolve_toss(Slot::One, Coin::Heads, Coin::Tails);
        assert_eq!(winner, Slot::Two);
        assert_eq!(state.seat_of(Role::Batsman), Some(Slot::Two));
    }

    #[test]
    fn runs_equal_batsman_number_and_balls_count_up() {
        let mut state = live();
        ball(&mut state, 4, 2);
        ball(&mut state, 1, 6);
        let line = *state.stats().get(Slot::One);
        assert_eq!(line.runs, 5);
        assert_eq!(line.wickets, 0);
        assert_eq!(line.balls, 2);
        assert_eq!(line.overs(), 0);
    }

    #[test]
    fn matching_numbers_dismiss_without_runs() {
        // scenario: both choose 4 on the first ball of the innings
        let mut state = live();
        ball(&mut state, 4, 4);
        let line = *state.stats().get(Slot::One);
        assert_eq!(line.wickets, 1);
        assert_eq!(line.runs, 0);
        assert_eq!(line.balls, 1);
        assert_eq!(state.last_event(), "OUT! Both chose 4");
        assert_eq!(state.phase(), Phase::InningsInProgress);
        assert_eq!(state.awaiting(), Some(Role::Batsman));
    }

    #[test]
    fn ball_clears_pending_choices() {
        let mut state = live();
        state.record_batsman(Choice::try_from(3).unwrap());
        assert!(state.recorded(Role::Batsman).is_some());
        assert_eq!(state.awaiting(), Some(Role::Bowler));
        state.deliver(
            Slot::One,
            Choice::try_from(3).unwrap(),
            Choice::try_from(5).unwrap(),
        );
        assert!(state.recorded(Role::Batsman).is_none());
        assert!(state.recorded(Role::Bowler).is_none());
        assert_eq!(state.awaiting(), Some(Role::Batsman));
    }

    #[test]
    fn overs_limit_ends_innings_with_exact_target() {
        // scenario: 15 runs over exactly 12 balls, no wicket falls
        let mut state = live();
        for i in 0..12 {
            let batsman = if i < 3 { 2 } else { 1 };
            ball(&mut state, batsman, 6);
        }
        assert_eq!(state.stats().get(Slot::One).runs, 15);
        assert_eq!(state.stats().get(Slot::One).overs(), 2);
        assert_eq!(state.innings(), 2);
        assert_eq!(state.target(), Some(16));
        assert_eq!(state.seat_of(Role::Batsman), Some(Slot::Two));
        assert_eq!(state.seat_of(Role::Bowler), Some(Slot::One));
        assert_eq!(state.awaiting(), Some(Role::Batsman));
        assert_eq!(state.last_event(), "End of Innings 1. Target: 16");
    }

    #[test]
    fn second_wicket_ends_innings() {
        let mut state = live();
        ball(&mut state, 3, 1);
        ball(&mut state, 5, 5);
        assert_eq!(state.innings(), 1);
        ball(&mut state, 2, 2);
        assert_eq!(state.innings(), 2);
        assert_eq!(state.target(), Some(4));
        assert_eq!(state.seat_of(Role::Batsman), Some(Slot::Two));
    }

    #[test]
    fn chase_completes_immediately_even_mid_over() {
        // scenario: target 10, chasing side on 8, batsman picks 3 untouched
        let mut state = live();
        for _ in 0..3 {
            ball(&mut state, 3, 6);
        }
        ball(&mut state, 1, 1);
        ball(&mut state, 2, 2);
        assert_eq!(state.innings(), 2);
        assert_eq!(state.target(), Some(10));
        ball(&mut state, 4, 6);
        ball(&mut state, 4, 6);
        assert_eq!(state.stats().get(Slot::Two).runs, 8);
        ball(&mut state, 3, 6);
        assert_eq!(state.stats().get(Slot::Two).runs, 11);
        assert_eq!(state.phase(), Phase::Completed);
        assert_eq!(state.awaiting(), None);
        assert_eq!(state.winner(), Some(Slot::Two));
        // sides stay frozen at their final values
        assert_eq!(state.seat_of(Role::Batsman), Some(Slot::Two));
        assert_eq!(state.seat_of(Role::Bowler), Some(Slot::One));
    }

    #[test]
    fn failed_chase_ends_in_completion() {
        let mut state = live();
        ball(&mut state, 6, 1);
        ball(&mut state, 4, 4);
        ball(&mut state, 5, 5);
        assert_eq!(state.target(), Some(7));
        ball(&mut state, 2, 6);
        ball(&mut state, 1, 1);
        ball(&mut state, 3, 3);
        assert_eq!(state.phase(), Phase::Completed);
        assert_eq!(state.stats().get(Slot::Two).runs, 2);
        assert_eq!(state.winner(), Some(Slot::One));
    }

    #[test]
    fn equal_runs_is_a_tie() {
        let mut state = live();
        ball(&mut state, 4, 1);
        ball(&mut state, 2, 2);
        ball(&mut state, 6, 6);
        assert_eq!(state.target(), Some(5));
        ball(&mut state, 4, 1);
        ball(&mut state, 3, 3);
        ball(&mut state, 5, 5);
        assert_eq!(state.phase(), Phase::Completed);
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn fresh_toss_state_zeroes_everything() {
        let mut state = live();
        ball(&mut state, 4, 2);
        let state = SessionState::toss();
        assert_eq!(state.phase(), Phase::Toss);
        assert_eq!(state.innings(), 1);
        assert_eq!(state.target(), None);
        assert_eq!(*state.stats().get(Slot::One), BattingStats::default());
        assert_eq!(*state.stats().get(Slot::Two), BattingStats::default());
        assert_eq!(state.awaiting(), None);
    }

    #[test]
    fn snapshot_serializes_with_wire_field_names() {
        let state = live();
        let json = serde_json::to_value(&state).expect("serialize snapshot");
        assert_eq!(json["phase"], "innings-in-progress");
        assert_eq!(json["battingSlot"], 1);
        assert_eq!(json["bowlingSlot"], 2);
        assert_eq!(json["tossWinner"], 1);
        assert_eq!(json["awaiting"], "batsman");
        assert_eq!(json["stats"]["1"]["overs"], 0);
        assert!(json["pendingChoices"]["batsman"].is_null());
        assert!(json["target"].is_null());
    }
}
