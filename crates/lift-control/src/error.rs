use lift_core::ElevatorId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("controller received a request before init")]
    NotInitialized,

    #[error("controller was initialised with an empty elevator roster")]
    EmptyRoster,

    #[error("elevator {elevator} is not in the roster of {roster}")]
    UnknownElevator {
        elevator: ElevatorId,
        roster:   usize,
    },

    /// A failure from an adapter that forwards calls to another process.
    #[error("remote controller failed: {0}")]
    Remote(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type ControlResult<T> = Result<T, ControlError>;
