//! Controller callbacks reified as values.

use lift_core::{ElevatorId, FloorId};

use crate::{ControlResult, ControlledElevators, Controller};

/// One call into the [`Controller`] contract.
///
/// Used wherever a callback has to be stored, logged, or carried across a
/// process boundary before it is delivered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    Init {
        elevator_count: u32,
        floor_count:    u32,
    },
    Called {
        floor: FloorId,
    },
    FloorSelected {
        elevator: ElevatorId,
        floor:    FloorId,
    },
    Arrived {
        elevator: ElevatorId,
    },
}

impl Notification {
    /// Invoke the matching callback on `controller`.
    ///
    /// `Init` synthesises the roster `0..elevator_count`, which is how the
    /// engine numbers its elevators.
    pub fn deliver(
        self,
        controller: &mut dyn Controller,
        moves:      &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        match self {
            Notification::Init { elevator_count, floor_count } => {
                let roster: Vec<ElevatorId> = (0..elevator_count).map(ElevatorId).collect();
                controller.init(&roster, floor_count, moves)
            }
            Notification::Called { floor } => controller.called(floor, moves),
            Notification::FloorSelected { elevator, floor } => {
                controller.floor_selected(elevator, floor, moves)
            }
            Notification::Arrived { elevator } => controller.completed_move(elevator, moves),
        }
    }
}
