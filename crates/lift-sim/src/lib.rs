//! `lift-sim` — deterministic, tick-driven elevator simulation.
//!
//! # Tick loop
//!
//! ```text
//! tick(now):
//!   ① TickStart(now)
//!   ② elevators step in index order   → arrivals: ElevatorArrived,
//!                                         ActorFinished for riders at goal,
//!                                         Controller::completed_move
//!   ③ actors advance in attach order  → calls, boarding, floor selection
//!   ④ TickDone(now); clock += 1
//! ```
//!
//! Controller moves are applied as soon as the callback that issued them
//! returns, so a zero-distance move arrives within the same tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_control::QueueController;
//! use lift_core::{FloorId, Tick};
//! use lift_sim::{Actor, EventLog, Simulation};
//!
//! let log = EventLog::new();
//! let mut sim = Simulation::new();
//! sim.attach_listener(log.clone());
//! sim.attach_actor(Actor::new(FloorId(4), FloorId(0), Tick(0)));
//! sim.initialize(1, 5)?;
//! sim.attach_controller(QueueController::boxed())?;
//! let end = sim.tick_up_to(20)?;
//! ```

pub mod actor;
pub mod elevator;
pub mod error;
pub mod event;
pub mod listener;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod tests;

pub use actor::{Actor, ActorPhase, ActorState, Placement};
pub use elevator::{Elevator, ElevatorState, Floor, MoveOutcome};
pub use error::{SimError, SimResult};
pub use event::{Event, POINTS_PER_ACTOR};
pub use listener::{EventListener, EventLog, write_events_csv};
pub use scenario::{Scenario, ScenarioOutcome, run_scenario};
pub use sim::Simulation;
