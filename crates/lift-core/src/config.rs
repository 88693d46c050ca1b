//! Simulation configuration.

use crate::{CoreError, CoreResult};

/// Default number of passengers an elevator carries.
pub const DEFAULT_ELEVATOR_CAPACITY: u8 = 5;

/// Building shape and run length for one simulation.
///
/// Typically loaded from a file by the application crate (enable the `serde`
/// feature) and handed to `Simulation::from_config`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of elevators; fixed for the lifetime of the run.
    pub elevator_count: u32,

    /// Number of floors; fixed for the lifetime of the run.
    pub floor_count: u32,

    /// Passenger capacity of every elevator.
    #[cfg_attr(feature = "serde", serde(default = "default_capacity"))]
    pub elevator_capacity: u8,

    /// Tick budget handed to `tick_up_to`.
    pub max_ticks: u64,
}

#[cfg(feature = "serde")]
fn default_capacity() -> u8 {
    DEFAULT_ELEVATOR_CAPACITY
}

impl SimConfig {
    pub fn new(elevator_count: u32, floor_count: u32, max_ticks: u64) -> Self {
        Self {
            elevator_count,
            floor_count,
            elevator_capacity: DEFAULT_ELEVATOR_CAPACITY,
            max_ticks,
        }
    }

    /// Reject shapes the engine cannot run: no floors, or zero capacity.
    pub fn validate(&self) -> CoreResult<()> {
        if self.floor_count == 0 {
            return Err(CoreError::Config("floor_count must be at least 1".into()));
        }
        if self.elevator_capacity == 0 {
            return Err(CoreError::Config("elevator_capacity must be at least 1".into()));
        }
        Ok(())
    }
}
