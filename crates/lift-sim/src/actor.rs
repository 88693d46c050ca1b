//! Passenger journey state machine.
//!
//! An actor's location is part of its state: every variant after `Unstarted`
//! carries either the floor it stands on or the elevator it rides.  There is
//! no separate placement table to keep in sync.

use lift_core::{ElevatorId, FloorId, Tick};

/// Where an actor currently is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    OnFloor(FloorId),
    InElevator(ElevatorId),
}

/// Journey state, carrying the actor's placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActorState {
    Unstarted,
    WaitingOnFloor { floor: FloorId },
    EnteringElevator { elevator: ElevatorId },
    WaitingInElevator { elevator: ElevatorId },
    Finished { floor: FloorId },
}

/// The journey stages in the only order an actor may pass through them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActorPhase {
    Unstarted,
    WaitingOnFloor,
    EnteringElevator,
    WaitingInElevator,
    Finished,
}

impl ActorState {
    pub fn phase(&self) -> ActorPhase {
        match self {
            ActorState::Unstarted => ActorPhase::Unstarted,
            ActorState::WaitingOnFloor { .. } => ActorPhase::WaitingOnFloor,
            ActorState::EnteringElevator { .. } => ActorPhase::EnteringElevator,
            ActorState::WaitingInElevator { .. } => ActorPhase::WaitingInElevator,
            ActorState::Finished { .. } => ActorPhase::Finished,
        }
    }

    /// `None` until the actor has started its journey.
    pub fn placement(&self) -> Option<Placement> {
        match *self {
            ActorState::Unstarted => None,
            ActorState::WaitingOnFloor { floor } | ActorState::Finished { floor } => {
                Some(Placement::OnFloor(floor))
            }
            ActorState::EnteringElevator { elevator }
            | ActorState::WaitingInElevator { elevator } => Some(Placement::InElevator(elevator)),
        }
    }
}

/// A simulated passenger travelling from `starting_floor` to `goal_floor`.
#[derive(Clone, Debug)]
pub struct Actor {
    goal_floor:     FloorId,
    starting_floor: FloorId,
    starting_tick:  Tick,
    completed_tick: Option<Tick>,
    state:          ActorState,
    journey:        Vec<(Tick, ActorPhase)>,
}

impl Actor {
    /// A passenger who appears on `starting_floor` at `starting_tick` and
    /// wants to reach `goal_floor`.
    pub fn new(goal_floor: FloorId, starting_floor: FloorId, starting_tick: Tick) -> Self {
        Self {
            goal_floor,
            starting_floor,
            starting_tick,
            completed_tick: None,
            state:          ActorState::Unstarted,
            journey:        Vec::new(),
        }
    }

    pub fn goal_floor(&self) -> FloorId {
        self.goal_floor
    }

    pub fn starting_floor(&self) -> FloorId {
        self.starting_floor
    }

    pub fn starting_tick(&self) -> Tick {
        self.starting_tick
    }

    /// Tick at which the actor reached its goal, if it has.
    pub fn completed_tick(&self) -> Option<Tick> {
        self.completed_tick
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn placement(&self) -> Option<Placement> {
        self.state.placement()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, ActorState::Finished { .. })
    }

    /// Every phase transition so far, with the tick it happened on.
    pub fn journey(&self) -> &[(Tick, ActorPhase)] {
        &self.journey
    }

    fn transition(&mut self, next: ActorState, now: Tick) {
        debug_assert!(next.phase() > self.state.phase());
        self.state = next;
        self.journey.push((now, next.phase()));
    }

    // ── Transitions driven by the engine ──────────────────────────────────

    /// Unstarted → WaitingOnFloor once `now` reaches the starting tick.
    /// Returns the floor to call an elevator to.
    pub(crate) fn try_start(&mut self, now: Tick) -> Option<FloorId> {
        if self.state != ActorState::Unstarted || now < self.starting_tick {
            return None;
        }
        let floor = self.starting_floor;
        self.transition(ActorState::WaitingOnFloor { floor }, now);
        Some(floor)
    }

    /// WaitingOnFloor → EnteringElevator.
    pub(crate) fn board(&mut self, elevator: ElevatorId, now: Tick) {
        if let ActorState::WaitingOnFloor { .. } = self.state {
            self.transition(ActorState::EnteringElevator { elevator }, now);
        }
    }

    /// EnteringElevator → WaitingInElevator.  Returns the elevator ridden and
    /// the goal floor to select, or `None` if the actor is not boarding.
    pub(crate) fn select_goal(&mut self, now: Tick) -> Option<(ElevatorId, FloorId)> {
        match self.state {
            ActorState::EnteringElevator { elevator } => {
                self.transition(ActorState::WaitingInElevator { elevator }, now);
                Some((elevator, self.goal_floor))
            }
            _ => None,
        }
    }

    /// WaitingInElevator → Finished when `elevator` stops at the goal floor.
    /// Returns `true` if the actor finished.
    pub(crate) fn elevator_stopped(
        &mut self,
        elevator: ElevatorId,
        floor:    FloorId,
        now:      Tick,
    ) -> bool {
        match self.state {
            ActorState::WaitingInElevator { elevator: riding }
                if riding == elevator && floor == self.goal_floor =>
            {
                self.completed_tick = Some(now);
                self.transition(ActorState::Finished { floor }, now);
                true
            }
            _ => false,
        }
    }
}
