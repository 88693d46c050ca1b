//! `QueueController` — first-in, first-out dispatch for a single elevator.

use std::collections::VecDeque;

use lift_core::{ElevatorId, FloorId};
use tracing::debug;

use crate::{ControlError, ControlResult, ControlledElevators, Controller};

/// What the dispatched elevator is currently doing on the controller's behalf.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    /// Travelling to answer a floor call.
    PickingUp,
    /// Travelling to a floor selected from inside the cab.
    DroppingOff,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Request {
    purpose: DispatchState,
    floor:   FloorId,
}

/// Serves calls and floor selections strictly in arrival order.
///
/// While the elevator is busy every new request waits in a queue; each
/// completed move pops the next one.  Only the first elevator of the roster
/// is ever dispatched.
#[derive(Debug)]
pub struct QueueController {
    state:    DispatchState,
    elevator: Option<ElevatorId>,
    pending:  VecDeque<Request>,
}

impl Default for QueueController {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueController {
    pub fn new() -> Self {
        Self {
            state:    DispatchState::Idle,
            elevator: None,
            pending:  VecDeque::new(),
        }
    }

    /// Boxed constructor, convenient as a `ControllerFn`.
    pub fn boxed() -> Box<dyn Controller> {
        Box::new(Self::new())
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    fn perform(
        &mut self,
        request: Request,
        moves:   &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        let elevator = self.elevator.ok_or(ControlError::NotInitialized)?;
        debug!(elevator = %elevator, floor = %request.floor, purpose = ?request.purpose, "dispatching");
        self.state = request.purpose;
        moves.move_to(elevator, request.floor);
        Ok(())
    }

    fn enqueue_or_perform(
        &mut self,
        request: Request,
        moves:   &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        if self.elevator.is_none() {
            return Err(ControlError::NotInitialized);
        }
        match self.state {
            DispatchState::Idle => self.perform(request, moves),
            _ => {
                self.pending.push_back(request);
                Ok(())
            }
        }
    }
}

impl Controller for QueueController {
    fn init(
        &mut self,
        elevators:    &[ElevatorId],
        _floor_count: u32,
        _moves:       &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        let first = elevators.first().copied().ok_or(ControlError::EmptyRoster)?;
        self.elevator = Some(first);
        Ok(())
    }

    fn called(&mut self, floor: FloorId, moves: &mut dyn ControlledElevators) -> ControlResult<()> {
        self.enqueue_or_perform(Request { purpose: DispatchState::PickingUp, floor }, moves)
    }

    fn floor_selected(
        &mut self,
        _elevator: ElevatorId,
        floor:     FloorId,
        moves:     &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        self.enqueue_or_perform(Request { purpose: DispatchState::DroppingOff, floor }, moves)
    }

    fn completed_move(
        &mut self,
        elevator: ElevatorId,
        moves:    &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        debug!(elevator = %elevator, pending = self.pending.len(), "move completed");
        match self.pending.pop_front() {
            Some(next) => self.perform(next, moves),
            None => {
                self.state = DispatchState::Idle;
                Ok(())
            }
        }
    }
}
