//! Elevator movement state machine.

use lift_core::FloorId;

/// Movement state of one elevator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElevatorState {
    Idle,
    MovingUp,
    MovingDown,
}

/// Result of handing a move request to an elevator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The elevator started travelling towards the target.
    Started(ElevatorState),
    /// The target is the current floor; the elevator has arrived already.
    Arrived,
    /// The elevator was already moving and the request was dropped.
    Ignored,
}

/// One elevator car.
///
/// While moving, the car changes floor by exactly one per [`step`][Self::step]
/// and returns to `Idle` on reaching its target.
#[derive(Clone, Debug)]
pub struct Elevator {
    state:          ElevatorState,
    current:        FloorId,
    target:         FloorId,
    capacity:       u8,
    desired_floors: Vec<FloorId>,
}

impl Elevator {
    /// A new car, idle on the ground floor.
    pub fn new(capacity: u8) -> Self {
        Self {
            state:          ElevatorState::Idle,
            current:        FloorId(0),
            target:         FloorId(0),
            capacity,
            desired_floors: Vec::new(),
        }
    }

    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn current_floor(&self) -> FloorId {
        self.current
    }

    pub fn target_floor(&self) -> FloorId {
        self.target
    }

    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Floors selected from inside this car, in selection order.
    pub fn desired_floors(&self) -> &[FloorId] {
        &self.desired_floors
    }

    /// True only when the car is stopped at `floor`.
    pub fn is_at_floor(&self, floor: FloorId) -> bool {
        self.state == ElevatorState::Idle && self.current == floor
    }

    /// Ask the car to travel to `floor`.
    ///
    /// Only an idle car accepts the request.  A zero-distance request leaves
    /// the car idle and reports [`MoveOutcome::Arrived`] at once.
    pub fn request_move(&mut self, floor: FloorId) -> MoveOutcome {
        if self.state != ElevatorState::Idle {
            return MoveOutcome::Ignored;
        }
        self.target = floor;
        let delta = self.current.delta_to(floor);
        self.state = match delta {
            d if d > 0 => ElevatorState::MovingUp,
            d if d < 0 => ElevatorState::MovingDown,
            _ => return MoveOutcome::Arrived,
        };
        MoveOutcome::Started(self.state)
    }

    /// Advance one tick.  Returns `true` if the car arrived this step.
    pub fn step(&mut self) -> bool {
        match self.state {
            ElevatorState::Idle => return false,
            ElevatorState::MovingUp => self.current = FloorId(self.current.0 + 1),
            ElevatorState::MovingDown => self.current = FloorId(self.current.0.saturating_sub(1)),
        }
        if self.current == self.target {
            self.state = ElevatorState::Idle;
            return true;
        }
        false
    }

    pub(crate) fn record_selection(&mut self, floor: FloorId) {
        self.desired_floors.push(floor);
    }
}

/// Passive placeholder for a floor of the building.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Floor {
    pub id: FloorId,
}
