//! `lift-bridge` — run a controller outside the simulation's process.
//!
//! Two adapters preserve the controller contract across a request/response
//! channel:
//!
//! - **Client** ([`Landing`], [`RemoteController`]): lives beside the
//!   simulation, implements `Controller`, and turns each callback into one
//!   Notice round trip whose directives it replays locally.
//! - **Server** ([`ControllerHost`], [`serve`]): hosts a real controller,
//!   answers `Spawn` and `Notice`, and accumulates the controller's moves
//!   until the end of each Notice.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`wire`]      | Request/response model, framing                            |
//! | [`transport`] | `Transport` trait, `TcpTransport`, `LocalTransport`        |
//! | [`client`]    | `Landing`, `RemoteController`                              |
//! | [`host`]      | `ControllerHost`, session lifecycle                        |
//! | [`service`]   | TCP accept loop, `run_controller_service`                  |
//! | [`health`]    | `check_health` liveness check                              |
//! | [`config`]    | `BridgeConfig`                                             |
//! | [`error`]     | `BridgeError`, `BridgeResult<T>`                           |
//!
//! # Failure policy
//!
//! Nothing is retried.  Connect failures and missed deadlines surface as
//! errors to the caller; through the simulation they arrive as
//! `ControlError::Remote`.

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod host;
pub mod service;
pub mod transport;
pub mod wire;


pub use client::{Landing, RemoteController};
pub use config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use health::check_health;
pub use host::{ControllerHost, SessionState, SharedHost};
pub use service::{run_controller_service, serve};
pub use transport::{LocalTransport, TcpTransport, Transport};
pub use wire::{Request, Response, SessionId, WireDirective, WireEvent};
