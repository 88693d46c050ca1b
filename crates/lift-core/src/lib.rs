//! `lift-core` — foundational types for the lift simulation framework.
//!
//! Every other `lift-*` crate depends on this one.  It has no `lift-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module     | Contents                                   |
//! |------------|--------------------------------------------|
//! | [`ids`]    | `ElevatorId`, `FloorId`, `ActorId`         |
//! | [`time`]   | `Tick`                                     |
//! | [`config`] | `SimConfig`                                |
//! | [`error`]  | `CoreError`, `CoreResult`                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{ActorId, ElevatorId, FloorId};
pub use time::Tick;
