//! A controller that moves the first elevator wherever it is asked.

use lift_core::{ElevatorId, FloorId};

use crate::{ControlError, ControlResult, ControlledElevators, Controller};

/// Sends the first elevator straight to every call and selection, ignoring
/// anything already in progress.
///
/// Only sensible with a single elevator and a single passenger at a time.
/// Useful as a baseline in tests.
#[derive(Debug, Default)]
pub struct DirectController {
    elevator: Option<ElevatorId>,
}

impl DirectController {
    pub fn new() -> Self {
        Self::default()
    }

    fn send(&self, floor: FloorId, moves: &mut dyn ControlledElevators) -> ControlResult<()> {
        let elevator = self.elevator.ok_or(ControlError::NotInitialized)?;
        moves.move_to(elevator, floor);
        Ok(())
    }
}

impl Controller for DirectController {
    fn init(
        &mut self,
        elevators:    &[ElevatorId],
        _floor_count: u32,
        _moves:       &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        self.elevator = Some(*elevators.first().ok_or(ControlError::EmptyRoster)?);
        Ok(())
    }

    fn called(&mut self, floor: FloorId, moves: &mut dyn ControlledElevators) -> ControlResult<()> {
        self.send(floor, moves)
    }

    fn floor_selected(
        &mut self,
        _elevator: ElevatorId,
        floor:     FloorId,
        moves:     &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        self.send(floor, moves)
    }

    fn completed_move(
        &mut self,
        _elevator: ElevatorId,
        _moves:    &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        Ok(())
    }
}
