//! The closed set of occurrences reported to listeners.

use std::fmt;

use lift_core::{ActorId, ElevatorId, FloorId, Tick};

/// Points awarded when an actor reaches its goal.
pub const POINTS_PER_ACTOR: u32 = 1;

/// Something that happened in the simulation.
///
/// Each variant carries only the fields meaningful for it.  Initialisation
/// events carry no tick: they happen before the clock starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    TickStart { tick: Tick },
    TickDone { tick: Tick },
    InitStart,
    InformElevator { elevator: ElevatorId },
    InformFloor { floor: FloorId },
    InitDone,
    ElevatorCalled { tick: Tick, floor: FloorId },
    ElevatorArrived { tick: Tick, elevator: ElevatorId, floor: FloorId },
    ElevatorFloorRequest { tick: Tick, elevator: ElevatorId, floor: FloorId },
    ActorFinished { tick: Tick, actor: ActorId, points: u32 },
}

impl Event {
    /// Stable tag name, used for export and display.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TickStart { .. } => "TickStart",
            Event::TickDone { .. } => "TickDone",
            Event::InitStart => "InitStart",
            Event::InformElevator { .. } => "InformElevator",
            Event::InformFloor { .. } => "InformFloor",
            Event::InitDone => "InitDone",
            Event::ElevatorCalled { .. } => "ElevatorCalled",
            Event::ElevatorArrived { .. } => "ElevatorArrived",
            Event::ElevatorFloorRequest { .. } => "ElevatorFloorRequest",
            Event::ActorFinished { .. } => "ActorFinished",
        }
    }

    pub fn tick(&self) -> Option<Tick> {
        match *self {
            Event::TickStart { tick }
            | Event::TickDone { tick }
            | Event::ElevatorCalled { tick, .. }
            | Event::ElevatorArrived { tick, .. }
            | Event::ElevatorFloorRequest { tick, .. }
            | Event::ActorFinished { tick, .. } => Some(tick),
            _ => None,
        }
    }

    pub fn elevator(&self) -> Option<ElevatorId> {
        match *self {
            Event::InformElevator { elevator }
            | Event::ElevatorArrived { elevator, .. }
            | Event::ElevatorFloorRequest { elevator, .. } => Some(elevator),
            _ => None,
        }
    }

    pub fn floor(&self) -> Option<FloorId> {
        match *self {
            Event::InformFloor { floor }
            | Event::ElevatorCalled { floor, .. }
            | Event::ElevatorArrived { floor, .. }
            | Event::ElevatorFloorRequest { floor, .. } => Some(floor),
            _ => None,
        }
    }

    pub fn points(&self) -> Option<u32> {
        match *self {
            Event::ActorFinished { points, .. } => Some(points),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::TickStart { tick } => write!(f, "Event{{TickStart, {}}}", tick.0),
            Event::TickDone { tick } => write!(f, "Event{{TickDone, {}}}", tick.0),
            Event::InitStart => write!(f, "Event{{InitStart}}"),
            Event::InitDone => write!(f, "Event{{InitDone}}"),
            Event::InformElevator { elevator } => write!(f, "Event{{InformElevator, {elevator}}}"),
            Event::InformFloor { floor } => write!(f, "Event{{InformFloor, {floor}}}"),
            Event::ElevatorCalled { floor, .. } => write!(f, "Event{{ElevatorCalled, {floor}}}"),
            Event::ElevatorArrived { elevator, floor, .. } => {
                write!(f, "Event{{ElevatorArrived, {elevator} @ {floor}}}")
            }
            Event::ElevatorFloorRequest { elevator, floor, .. } => {
                write!(f, "Event{{ElevatorFloorRequest, {elevator} @ {floor}}}")
            }
            Event::ActorFinished { actor, points, .. } => {
                write!(f, "Event{{ActorFinished, actor: {actor}, points: {points}}}")
            }
        }
    }
}
