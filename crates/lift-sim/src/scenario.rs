//! Fixed puzzles for exercising controllers end to end.
//!
//! A [`Scenario`] places actors, initialises the building, and returns the
//! tick budget a controller gets to finish it.

use lift_control::{ControlResult, Controller};
use lift_core::{FloorId, Tick};
use tracing::{info, warn};

use crate::{Actor, Event, EventLog, SimResult, Simulation};

/// Sets up `sim` and returns the maximum number of ticks allowed.
pub type Scenario = fn(&mut Simulation) -> SimResult<u64>;

/// What happened when a scenario ran.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Every actor reached its goal within the budget.
    pub completed:  bool,
    pub final_tick: Tick,
    pub events:     Vec<Event>,
}

/// One passenger rides from the ground floor to the top of a five-floor
/// building.
pub fn single_person_up(sim: &mut Simulation) -> SimResult<u64> {
    sim.attach_actor(Actor::new(FloorId(4), FloorId(0), Tick(0)));
    sim.initialize(1, 5)?;
    Ok(20)
}

/// One passenger rides from the top floor down to floor 2.
pub fn single_person_down(sim: &mut Simulation) -> SimResult<u64> {
    sim.attach_actor(Actor::new(FloorId(2), FloorId(4), Tick(0)));
    sim.initialize(1, 5)?;
    Ok(20)
}

/// Three passengers arriving over time force the elevator to travel in both
/// directions.  A single elevator is enough.
pub fn multiple_up_and_back(sim: &mut Simulation) -> SimResult<u64> {
    sim.attach_actor(Actor::new(FloorId(3), FloorId(0), Tick(0)));
    sim.attach_actor(Actor::new(FloorId(2), FloorId(0), Tick(8)));
    sim.attach_actor(Actor::new(FloorId(0), FloorId(1), Tick(17)));
    sim.initialize(1, 5)?;
    Ok(40)
}

/// Run `scenario` against the controller built by `factory`.
///
/// On failure the full event stream is logged at `warn` (tick boundaries
/// elided) before the outcome is returned.
pub fn run_scenario<F>(factory: F, scenario: Scenario) -> SimResult<ScenarioOutcome>
where
    F: FnOnce() -> ControlResult<Box<dyn Controller>>,
{
    let log = EventLog::new();
    let mut sim = Simulation::new();
    sim.attach_listener(log.clone());

    let max_ticks = scenario(&mut sim)?;
    sim.attach_controller_with(factory)?;
    let final_tick = sim.tick_up_to(max_ticks)?;
    let completed = sim.actors_completed_objectives();

    if completed {
        info!(tick = final_tick.0, "all actors completed their objectives");
    } else {
        warn!(tick = final_tick.0, "some actors did not reach their objectives");
        for event in log.events().iter() {
            match event {
                Event::TickStart { .. } => {}
                Event::TickDone { tick } => warn!("-- tick {} --", tick.0),
                other => warn!("\t- {other}"),
            }
        }
    }

    Ok(ScenarioOutcome { completed, final_tick, events: log.snapshot() })
}
