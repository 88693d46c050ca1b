//! Wire model for the controller bridge.
//!
//! # Wire format
//!
//! Each message is one JSON document terminated by `\n`:
//!
//! ```text
//! → {"op":"spawn"}
//! ← {"op":"spawned","session":2841107}
//! → {"op":"notice","session":2841107,"events":[{"type":"called","floor":3}]}
//! ← {"op":"updates","pending":[{"elevator":0,"floor":3}]}
//! ```
//!
//! Requests and responses alternate strictly on a connection.

use std::fmt;
use std::io::{BufRead, Write};

use lift_control::{Directive, Notification};
use lift_core::{ElevatorId, FloorId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{BridgeError, BridgeResult};

/// Opaque identifier of one hosted controller session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u32);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

/// A controller callback as it travels over the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireEvent {
    Init { elevator_count: u32, floor_count: u32 },
    Called { floor: u32 },
    FloorSelected { elevator: u32, floor: u32 },
    Arrived { elevator: u32 },
}

/// `MoveTo { elevator, floor }`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDirective {
    pub elevator: u32,
    pub floor:    u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Spawn,
    Notice { session: SessionId, events: Vec<WireEvent> },
    Health { service: String },
}

impl Request {
    pub fn name(&self) -> &'static str {
        match self {
            Request::Spawn => "spawn",
            Request::Notice { .. } => "notice",
            Request::Health { .. } => "health",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Response {
    Spawned { session: SessionId },
    Updates { pending: Vec<WireDirective> },
    Health { status: ServingStatus },
    Error { kind: RejectKind, message: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingStatus {
    Serving,
    NotServing,
    ServiceUnknown,
}

/// Why the server refused a request.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectKind {
    UnknownSession,
    NoSession,
    SessionFailed,
    NotInitialized,
    InvalidDirective,
    Malformed,
    Controller,
    Internal,
}

// ── Domain conversions ────────────────────────────────────────────────────────

impl From<Notification> for WireEvent {
    fn from(n: Notification) -> Self {
        match n {
            Notification::Init { elevator_count, floor_count } => {
                WireEvent::Init { elevator_count, floor_count }
            }
            Notification::Called { floor } => WireEvent::Called { floor: floor.0 },
            Notification::FloorSelected { elevator, floor } => {
                WireEvent::FloorSelected { elevator: elevator.0, floor: floor.0 }
            }
            Notification::Arrived { elevator } => WireEvent::Arrived { elevator: elevator.0 },
        }
    }
}

impl From<WireEvent> for Notification {
    fn from(e: WireEvent) -> Self {
        match e {
            WireEvent::Init { elevator_count, floor_count } => {
                Notification::Init { elevator_count, floor_count }
            }
            WireEvent::Called { floor } => Notification::Called { floor: FloorId(floor) },
            WireEvent::FloorSelected { elevator, floor } => Notification::FloorSelected {
                elevator: ElevatorId(elevator),
                floor:    FloorId(floor),
            },
            WireEvent::Arrived { elevator } => Notification::Arrived { elevator: ElevatorId(elevator) },
        }
    }
}

impl From<Directive> for WireDirective {
    fn from(d: Directive) -> Self {
        WireDirective { elevator: d.elevator.0, floor: d.floor.0 }
    }
}

// ── Framing ───────────────────────────────────────────────────────────────────

/// Encode `message` as one newline-terminated JSON frame.
pub fn encode_frame<T: Serialize>(message: &T) -> BridgeResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec(message).map_err(BridgeError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write one frame and flush.
pub fn write_frame<W: Write, T: Serialize>(out: &mut W, message: &T) -> BridgeResult<()> {
    out.write_all(&encode_frame(message)?)?;
    out.flush()?;
    Ok(())
}

/// Read one frame.  `Ok(None)` means the peer closed the stream cleanly.
pub fn read_frame<R: BufRead, T: DeserializeOwned>(input: &mut R) -> BridgeResult<Option<T>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    serde_json::from_str(line.trim_end()).map(Some).map_err(BridgeError::Decode)
}
