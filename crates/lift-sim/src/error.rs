use lift_control::ControlError;
use lift_core::{ActorId, CoreError, ElevatorId, FloorId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation has not been initialised")]
    NotInitialized,

    #[error("simulation is already initialised")]
    AlreadyInitialized,

    #[error("an actor needs a controller but none is attached")]
    NoController,

    #[error("directive names elevator {elevator} but the roster has {roster}")]
    UnknownElevator {
        elevator: ElevatorId,
        roster:   usize,
    },

    #[error("directive names floor {floor} but the building has {floors}")]
    UnknownFloor {
        floor:  FloorId,
        floors: usize,
    },

    #[error("actor {0} selected a floor while not inside an elevator")]
    NotInElevator(ActorId),

    #[error("controller error: {0}")]
    Controller(#[from] ControlError),

    #[error("configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("CSV export error: {0}")]
    Export(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
