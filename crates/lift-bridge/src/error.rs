//! Error types for lift-bridge.

use std::time::Duration;

use lift_control::ControlError;
use thiserror::Error;

use crate::wire::{RejectKind, SessionId};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to connect to {target:?}: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("connection closed by peer")]
    Closed,

    #[error("session {got} is not the active session ({expected:?})")]
    UnknownSession {
        expected: Option<SessionId>,
        got:      SessionId,
    },

    #[error("no session has been spawned")]
    NoSession,

    #[error("session {0} failed earlier and must be respawned")]
    SessionFailed(SessionId),

    #[error("directive names elevator {elevator} outside a roster of {roster}")]
    InvalidDirective {
        elevator: u32,
        roster:   u32,
    },

    #[error("request rejected ({kind:?}): {message}")]
    Rejected {
        kind:    RejectKind,
        message: String,
    },

    #[error("unexpected response to {0} request")]
    UnexpectedResponse(&'static str),

    #[error("hosted controller failed: {0}")]
    Control(#[from] ControlError),
}

impl BridgeError {
    /// The rejection kind reported to a remote caller for this error.
    pub fn reject_kind(&self) -> RejectKind {
        match self {
            BridgeError::UnknownSession { .. } => RejectKind::UnknownSession,
            BridgeError::NoSession => RejectKind::NoSession,
            BridgeError::SessionFailed(_) => RejectKind::SessionFailed,
            BridgeError::InvalidDirective { .. } => RejectKind::InvalidDirective,
            BridgeError::Decode(_) => RejectKind::Malformed,
            BridgeError::Control(ControlError::NotInitialized) => RejectKind::NotInitialized,
            BridgeError::Control(_) => RejectKind::Controller,
            _ => RejectKind::Internal,
        }
    }
}

impl From<BridgeError> for ControlError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Control(inner) => inner,
            other => ControlError::Remote(Box::new(other)),
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
