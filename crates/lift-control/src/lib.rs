//! `lift-control` — the contract between the simulation and dispatch policy.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`model`]        | `Controller` trait                                        |
//! | [`directive`]    | `Directive`, `ControlledElevators`, `DirectiveQueue`      |
//! | [`notification`] | `Notification` — one controller callback as a value       |
//! | [`queue`]        | `QueueController` — FIFO reference dispatch policy        |
//! | [`direct`]       | `DirectController` — moves on every request, for tests    |
//! | [`error`]        | `ControlError`, `ControlResult<T>`                        |
//!
//! # Design notes
//!
//! The engine never hands a controller a reference to itself.  Each callback
//! receives a `&mut dyn ControlledElevators` for the duration of the call;
//! moves issued through it are applied by the engine as soon as the callback
//! returns, so they are in effect before the controller hears about that
//! elevator again.  Remote adapters use the same seam to replay directives
//! that arrived over the wire.

pub mod direct;
pub mod directive;
pub mod error;
pub mod model;
pub mod notification;
pub mod queue;


pub use direct::DirectController;
pub use directive::{ControlledElevators, Directive, DirectiveQueue};
pub use error::{ControlError, ControlResult};
pub use model::{Controller, ControllerFn};
pub use notification::Notification;
pub use queue::{DispatchState, QueueController};
