//! The `Controller` trait — the extension point for dispatch policies.

use lift_core::{ElevatorId, FloorId};

use crate::{ControlResult, ControlledElevators};

/// Pluggable elevator dispatch policy.
///
/// The engine calls into a controller as passengers act and elevators stop.
/// Every callback receives the move capability for the duration of the call;
/// the controller issues zero or more moves through it and returns.
///
/// Errors are reported back to whoever delivered the notification.  The
/// engine stops the current tick and surfaces the error to its caller.
///
/// # Example
///
/// ```rust,ignore
/// struct GroundFloorOnly(ElevatorId);
///
/// impl Controller for GroundFloorOnly {
///     fn init(&mut self, elevators: &[ElevatorId], _floors: u32, _moves: &mut dyn ControlledElevators) -> ControlResult<()> {
///         self.0 = *elevators.first().ok_or(ControlError::EmptyRoster)?;
///         Ok(())
///     }
///     fn called(&mut self, _floor: FloorId, moves: &mut dyn ControlledElevators) -> ControlResult<()> {
///         moves.move_to(self.0, FloorId(0));
///         Ok(())
///     }
///     // ...
/// }
/// ```
pub trait Controller: Send {
    /// Called exactly once, after the building exists and before any tick.
    ///
    /// `elevators` lists the roster in index order.
    fn init(
        &mut self,
        elevators:   &[ElevatorId],
        floor_count: u32,
        moves:       &mut dyn ControlledElevators,
    ) -> ControlResult<()>;

    /// A passenger on `floor` pressed the call button.
    fn called(&mut self, floor: FloorId, moves: &mut dyn ControlledElevators) -> ControlResult<()>;

    /// A passenger inside `elevator` selected `floor`.
    fn floor_selected(
        &mut self,
        elevator: ElevatorId,
        floor:    FloorId,
        moves:    &mut dyn ControlledElevators,
    ) -> ControlResult<()>;

    /// `elevator` just became idle at its target floor.
    fn completed_move(
        &mut self,
        elevator: ElevatorId,
        moves:    &mut dyn ControlledElevators,
    ) -> ControlResult<()>;
}

/// A reusable constructor for fresh controller instances.
///
/// Hosts that create one controller per session (the bridge server) hold one
/// of these; the engine takes a one-shot `FnOnce` instead.
pub type ControllerFn = dyn Fn() -> Box<dyn Controller> + Send + Sync;
