//! Unit and scenario tests for lift-sim.

use lift_control::{
    ControlResult, ControlledElevators, Controller, DirectController, QueueController,
};
use lift_core::{ElevatorId, FloorId, SimConfig, Tick};

use crate::scenario::{multiple_up_and_back, single_person_down, single_person_up};
use crate::{
    Actor, ActorPhase, ActorState, Elevator, ElevatorState, Event, EventLog, MoveOutcome,
    Placement, SimError, Simulation, run_scenario,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn queue_factory() -> ControlResult<Box<dyn Controller>> {
    Ok(QueueController::boxed())
}

/// Initialised one-elevator, `floors`-floor simulation with a capturing log.
fn building(floors: u32, actors: &[Actor]) -> (Simulation, EventLog) {
    let log = EventLog::new();
    let mut sim = Simulation::new();
    sim.attach_listener(log.clone());
    for actor in actors {
        sim.attach_actor(actor.clone());
    }
    sim.initialize(1, floors).unwrap();
    (sim, log)
}

fn actor(goal: u32, start: u32, tick: u64) -> Actor {
    Actor::new(FloorId(goal), FloorId(start), Tick(tick))
}

/// Never moves anything.
struct Stubborn;

impl Controller for Stubborn {
    fn init(&mut self, _: &[ElevatorId], _: u32, _: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(())
    }
    fn called(&mut self, _: FloorId, _: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(())
    }
    fn floor_selected(&mut self, _: ElevatorId, _: FloorId, _: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(())
    }
    fn completed_move(&mut self, _: ElevatorId, _: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(())
    }
}

/// Answers every call by moving an elevator that does not exist.
struct Rogue;

impl Controller for Rogue {
    fn init(&mut self, _: &[ElevatorId], _: u32, _: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(())
    }
    fn called(&mut self, floor: FloorId, moves: &mut dyn ControlledElevators) -> ControlResult<()> {
        moves.move_to(ElevatorId(7), floor);
        Ok(())
    }
    fn floor_selected(&mut self, _: ElevatorId, _: FloorId, _: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(())
    }
    fn completed_move(&mut self, _: ElevatorId, _: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(())
    }
}

fn position(events: &[Event], pred: impl Fn(&Event) -> bool) -> Option<usize> {
    events.iter().position(pred)
}

// ── Elevator state machine ────────────────────────────────────────────────────

#[cfg(test)]
mod elevator_tests {
    use super::*;

    #[test]
    fn zero_distance_arrives_immediately() {
        let mut e = Elevator::new(5);
        assert_eq!(e.request_move(FloorId(0)), MoveOutcome::Arrived);
        assert_eq!(e.state(), ElevatorState::Idle);
        assert!(e.is_at_floor(FloorId(0)));
    }

    #[test]
    fn moves_up_one_floor_per_step() {
        let mut e = Elevator::new(5);
        assert_eq!(e.request_move(FloorId(3)), MoveOutcome::Started(ElevatorState::MovingUp));
        assert_eq!(e.target_floor(), FloorId(3));
        assert!(!e.step());
        assert_eq!(e.current_floor(), FloorId(1));
        assert!(!e.is_at_floor(FloorId(1)));
        assert!(!e.step());
        assert!(e.step());
        assert_eq!(e.current_floor(), FloorId(3));
        assert_eq!(e.state(), ElevatorState::Idle);
        assert!(e.is_at_floor(FloorId(3)));
    }

    #[test]
    fn moves_down() {
        let mut e = Elevator::new(5);
        e.request_move(FloorId(2));
        while !e.step() {}
        assert_eq!(e.request_move(FloorId(0)), MoveOutcome::Started(ElevatorState::MovingDown));
        assert!(!e.step());
        assert!(e.step());
        assert_eq!(e.current_floor(), FloorId(0));
    }

    #[test]
    fn request_while_moving_is_ignored() {
        let mut e = Elevator::new(5);
        e.request_move(FloorId(4));
        e.step();
        assert_eq!(e.request_move(FloorId(0)), MoveOutcome::Ignored);
        assert_eq!(e.target_floor(), FloorId(4));
        assert_eq!(e.state(), ElevatorState::MovingUp);
    }

    #[test]
    fn idle_step_does_nothing() {
        let mut e = Elevator::new(5);
        assert!(!e.step());
        assert_eq!(e.current_floor(), FloorId(0));
        assert_eq!(e.capacity(), 5);
    }
}

// ── Actor state machine ───────────────────────────────────────────────────────

#[cfg(test)]
mod actor_tests {
    use super::*;

    #[test]
    fn dormant_until_starting_tick() {
        let mut a = actor(3, 1, 5);
        assert_eq!(a.try_start(Tick(4)), None);
        assert_eq!(a.state(), ActorState::Unstarted);
        assert_eq!(a.placement(), None);
        assert_eq!(a.try_start(Tick(5)), Some(FloorId(1)));
        assert_eq!(a.placement(), Some(Placement::OnFloor(FloorId(1))));
    }

    #[test]
    fn journey_runs_forward() {
        let mut a = actor(3, 0, 0);
        a.try_start(Tick(0));
        a.board(ElevatorId(0), Tick(1));
        assert_eq!(a.placement(), Some(Placement::InElevator(ElevatorId(0))));
        assert_eq!(a.select_goal(Tick(2)), Some((ElevatorId(0), FloorId(3))));

        // Stopping short of the goal does nothing.
        assert!(!a.elevator_stopped(ElevatorId(0), FloorId(2), Tick(4)));
        // Another elevator reaching the goal does nothing either.
        assert!(!a.elevator_stopped(ElevatorId(1), FloorId(3), Tick(4)));
        assert!(a.elevator_stopped(ElevatorId(0), FloorId(3), Tick(5)));

        assert!(a.is_finished());
        assert_eq!(a.completed_tick(), Some(Tick(5)));
        assert_eq!(a.placement(), Some(Placement::OnFloor(FloorId(3))));
        assert_eq!(
            a.journey(),
            &[
                (Tick(0), ActorPhase::WaitingOnFloor),
                (Tick(1), ActorPhase::EnteringElevator),
                (Tick(2), ActorPhase::WaitingInElevator),
                (Tick(5), ActorPhase::Finished),
            ]
        );
    }

    #[test]
    fn selecting_without_boarding_is_refused() {
        let mut a = actor(3, 0, 0);
        a.try_start(Tick(0));
        assert_eq!(a.select_goal(Tick(1)), None);
        assert_eq!(a.state().phase(), ActorPhase::WaitingOnFloor);
    }

    #[test]
    fn finished_is_terminal() {
        let mut a = actor(1, 0, 0);
        a.try_start(Tick(0));
        a.board(ElevatorId(0), Tick(1));
        a.select_goal(Tick(2));
        a.elevator_stopped(ElevatorId(0), FloorId(1), Tick(3));
        assert_eq!(a.try_start(Tick(9)), None);
        a.board(ElevatorId(0), Tick(9));
        assert!(!a.elevator_stopped(ElevatorId(0), FloorId(1), Tick(9)));
        assert_eq!(a.completed_tick(), Some(Tick(3)));
        assert_eq!(a.journey().len(), 4);
    }
}

// ── Engine lifecycle ──────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn runs_for_ticks_without_actors() {
        let mut sim = Simulation::new();
        sim.initialize(1, 2).unwrap();
        for _ in 0..10 {
            sim.tick().unwrap();
        }
        assert_eq!(sim.current_tick(), Tick(10));
    }

    #[test]
    fn tick_before_initialize_errors() {
        let mut sim = Simulation::new();
        assert!(matches!(sim.tick(), Err(SimError::NotInitialized)));
        assert!(matches!(
            sim.attach_controller(QueueController::boxed()),
            Err(SimError::NotInitialized)
        ));
    }

    #[test]
    fn double_initialize_errors() {
        let mut sim = Simulation::new();
        sim.initialize(1, 2).unwrap();
        assert!(matches!(sim.initialize(1, 2), Err(SimError::AlreadyInitialized)));
    }

    #[test]
    fn initialize_emits_roster_in_order() {
        let log = EventLog::new();
        let mut sim = Simulation::new();
        sim.attach_listener(log.clone());
        sim.initialize(2, 3).unwrap();
        assert_eq!(
            log.snapshot(),
            vec![
                Event::InitStart,
                Event::InformElevator { elevator: ElevatorId(0) },
                Event::InformElevator { elevator: ElevatorId(1) },
                Event::InformFloor { floor: FloorId(0) },
                Event::InformFloor { floor: FloorId(1) },
                Event::InformFloor { floor: FloorId(2) },
                Event::InitDone,
            ]
        );
    }

    #[test]
    fn listeners_fire_in_registration_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let order = Rc::new(RefCell::new(Vec::new()));
        let mut sim = Simulation::new();
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            sim.attach_listener(move |event: &Event| {
                if let Event::InitDone = event {
                    order.borrow_mut().push(tag);
                }
            });
        }
        sim.initialize(1, 1).unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn not_completed_before_start() {
        let mut sim = Simulation::new();
        sim.attach_actor(actor(1, 0, 0));
        assert!(!sim.actors_completed_objectives());
    }

    #[test]
    fn actor_needing_controller_without_one_errors() {
        let (mut sim, _log) = building(2, &[actor(1, 0, 0)]);
        assert!(matches!(sim.tick(), Err(SimError::NoController)));
        assert_eq!(sim.current_tick(), Tick(1));
    }

    #[test]
    fn directive_for_unknown_elevator_is_an_error() {
        let (mut sim, _log) = building(2, &[actor(1, 0, 0)]);
        sim.attach_controller(Box::new(Rogue)).unwrap();
        let err = sim.tick().unwrap_err();
        assert!(matches!(
            err,
            SimError::UnknownElevator { elevator: ElevatorId(7), roster: 1 }
        ));
    }

    #[test]
    fn from_config_builds_the_building() {
        let mut config = SimConfig::new(2, 4, 10);
        config.elevator_capacity = 8;
        let sim = Simulation::from_config(&config).unwrap();
        assert_eq!(sim.elevators().len(), 2);
        assert_eq!(sim.floors().len(), 4);
        assert_eq!(sim.elevators()[1].capacity(), 8);
        assert!(Simulation::from_config(&SimConfig::new(1, 0, 10)).is_err());
    }

    #[test]
    fn elevators_at_reports_cars_on_floor() {
        let mut sim = Simulation::new();
        sim.initialize(3, 2).unwrap();
        assert_eq!(sim.elevators_at(FloorId(0)).count(), 3);
        assert_eq!(sim.elevators_at(FloorId(1)).count(), 0);
    }
}

// ── Engine behaviour with controllers ─────────────────────────────────────────

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn zero_distance_move_arrives_same_tick() {
        let (mut sim, log) = building(5, &[actor(4, 0, 0)]);
        sim.attach_controller(QueueController::boxed()).unwrap();
        sim.tick().unwrap();
        assert_eq!(
            log.snapshot()[8..],
            [
                Event::TickStart { tick: Tick(0) },
                Event::ElevatorCalled { tick: Tick(0), floor: FloorId(0) },
                Event::ElevatorArrived { tick: Tick(0), elevator: ElevatorId(0), floor: FloorId(0) },
                Event::TickDone { tick: Tick(0) },
            ]
        );
    }

    #[test]
    fn single_up_timeline() {
        let (mut sim, log) = building(5, &[actor(4, 0, 0)]);
        sim.attach_controller(QueueController::boxed()).unwrap();
        assert_eq!(sim.tick_up_to(20).unwrap(), Tick(7));

        let rider = &sim.actors()[0];
        assert_eq!(rider.completed_tick(), Some(Tick(6)));
        assert_eq!(
            rider.journey(),
            &[
                (Tick(0), ActorPhase::WaitingOnFloor),
                (Tick(1), ActorPhase::EnteringElevator),
                (Tick(2), ActorPhase::WaitingInElevator),
                (Tick(6), ActorPhase::Finished),
            ]
        );
        assert_eq!(sim.elevators()[0].desired_floors(), &[FloorId(4)]);
        assert!(log.events().contains(&Event::ElevatorFloorRequest {
            tick:     Tick(2),
            elevator: ElevatorId(0),
            floor:    FloorId(4),
        }));
    }

    #[test]
    fn goal_on_starting_floor_finishes_on_selection() {
        let (mut sim, _log) = building(5, &[actor(2, 2, 0)]);
        sim.attach_controller(QueueController::boxed()).unwrap();
        sim.tick_up_to(20).unwrap();
        let rider = &sim.actors()[0];
        assert!(rider.is_finished());
        let phases: Vec<ActorPhase> = rider.journey().iter().map(|&(_, p)| p).collect();
        assert_eq!(
            phases,
            vec![
                ActorPhase::WaitingOnFloor,
                ActorPhase::EnteringElevator,
                ActorPhase::WaitingInElevator,
                ActorPhase::Finished,
            ]
        );
    }

    #[test]
    fn floor_request_is_logged_after_controller_moves() {
        let (mut sim, log) = building(5, &[actor(0, 0, 0)]);
        sim.attach_controller(QueueController::boxed()).unwrap();
        assert_eq!(sim.tick_up_to(10).unwrap(), Tick(3));
        assert_eq!(
            log.snapshot()[14..],
            [
                Event::TickStart { tick: Tick(2) },
                Event::ElevatorArrived { tick: Tick(2), elevator: ElevatorId(0), floor: FloorId(0) },
                Event::ActorFinished { tick: Tick(2), actor: lift_core::ActorId(0), points: 1 },
                Event::ElevatorFloorRequest { tick: Tick(2), elevator: ElevatorId(0), floor: FloorId(0) },
                Event::TickDone { tick: Tick(2) },
            ]
        );
    }

    #[test]
    fn tick_up_to_stops_at_budget() {
        let (mut sim, _log) = building(5, &[actor(4, 0, 0)]);
        sim.attach_controller(Box::new(Stubborn)).unwrap();
        assert_eq!(sim.tick_up_to(12).unwrap(), Tick(12));
        assert!(!sim.actors_completed_objectives());
        assert_eq!(sim.tick_up_to(3).unwrap(), Tick(15));
    }

    #[test]
    fn direct_controller_carries_single_passenger() {
        let (mut sim, _log) = building(2, &[actor(1, 0, 0)]);
        sim.attach_controller(Box::new(DirectController::new())).unwrap();
        let end = sim.tick_up_to(10).unwrap();
        assert!(end < Tick(10));
        assert!(sim.actors_completed_objectives());
    }

    #[test]
    fn direct_controller_moves_down() {
        let (mut sim, _log) = building(2, &[actor(0, 1, 0)]);
        sim.attach_controller_with(|| Ok(Box::new(DirectController::new()) as Box<dyn Controller>))
            .unwrap();
        assert!(sim.tick_up_to(10).unwrap() < Tick(10));
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario_tests {
    use super::*;

    #[test]
    fn single_up() {
        let outcome = run_scenario(queue_factory, single_person_up).unwrap();
        assert!(outcome.completed);
        assert!(outcome.final_tick <= Tick(20));

        let arrived = position(&outcome.events, |e| matches!(e, Event::ElevatorArrived { .. }));
        let finished = position(&outcome.events, |e| matches!(e, Event::ActorFinished { .. }));
        assert!(arrived.unwrap() < finished.unwrap());
    }

    #[test]
    fn single_down() {
        let outcome = run_scenario(queue_factory, single_person_down).unwrap();
        assert!(outcome.completed);
        assert_eq!(outcome.final_tick, Tick(8));
    }

    #[test]
    fn multiple_up_and_back_completes() {
        let outcome = run_scenario(queue_factory, multiple_up_and_back).unwrap();
        assert!(outcome.completed);
        assert!(outcome.final_tick <= Tick(40));

        let finished: Vec<(Tick, u32)> = outcome
            .events
            .iter()
            .filter_map(|e| match *e {
                Event::ActorFinished { tick, actor, points } => {
                    assert_eq!(points, 1);
                    Some((tick, actor.0))
                }
                _ => None,
            })
            .collect();
        assert_eq!(finished, vec![(Tick(5), 0), (Tick(14), 1), (Tick(20), 2)]);
    }

    #[test]
    fn every_journey_is_strictly_ordered() {
        let mut sim = Simulation::new();
        let budget = multiple_up_and_back(&mut sim).unwrap();
        sim.attach_controller(QueueController::boxed()).unwrap();
        sim.tick_up_to(budget).unwrap();

        let expected = [
            ActorPhase::WaitingOnFloor,
            ActorPhase::EnteringElevator,
            ActorPhase::WaitingInElevator,
            ActorPhase::Finished,
        ];
        for rider in sim.actors() {
            let phases: Vec<ActorPhase> = rider.journey().iter().map(|&(_, p)| p).collect();
            assert_eq!(phases, expected);
            let ticks: Vec<Tick> = rider.journey().iter().map(|&(t, _)| t).collect();
            assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn stubborn_controller_fails_scenario() {
        let outcome =
            run_scenario(|| Ok(Box::new(Stubborn) as Box<dyn Controller>), single_person_up).unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.final_tick, Tick(20));
    }
}

// ── Event log export ──────────────────────────────────────────────────────────

#[cfg(test)]
mod export_tests {
    use std::fs;

    use super::*;

    #[test]
    fn display_matches_log_format() {
        let arrived = Event::ElevatorArrived { tick: Tick(3), elevator: ElevatorId(0), floor: FloorId(4) };
        assert_eq!(arrived.to_string(), "Event{ElevatorArrived, 0 @ 4}");
        assert_eq!(Event::TickDone { tick: Tick(9) }.to_string(), "Event{TickDone, 9}");
    }

    #[test]
    fn csv_has_header_and_sparse_fields() {
        let (mut sim, log) = building(5, &[actor(4, 0, 0)]);
        sim.attach_controller(QueueController::boxed()).unwrap();
        sim.tick_up_to(20).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.csv");
        log.write_csv(fs::File::create(&path).unwrap()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("tick,kind,elevator,floor,points"));
        assert_eq!(lines.next(), Some(",InitStart,,,"));
        assert!(text.lines().any(|l| l == "6,ActorFinished,,,1"));
        assert_eq!(text.lines().count(), log.len() + 1);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Step {
        Tick,
        TickUpTo(u64),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![Just(Step::Tick), (0u64..8).prop_map(Step::TickUpTo)]
    }

    proptest! {
        #[test]
        fn clock_advances_exactly(steps in proptest::collection::vec(step(), 1..30)) {
            // The actor never finishes, so every budget is spent in full.
            let (mut sim, _log) = building(5, &[actor(4, 0, 0)]);
            sim.attach_controller(Box::new(Stubborn)).unwrap();

            for step in steps {
                let before = sim.current_tick();
                match step {
                    Step::Tick => {
                        prop_assert!(sim.tick().unwrap());
                        prop_assert_eq!(sim.current_tick(), before + 1);
                    }
                    Step::TickUpTo(n) => {
                        let reached = sim.tick_up_to(n).unwrap();
                        prop_assert_eq!(reached, before + n);
                        prop_assert_eq!(sim.current_tick(), reached);
                    }
                }
            }
        }

        #[test]
        fn budget_beyond_completion_stops_early(extra in 0u64..50) {
            let (mut sim, _log) = building(5, &[actor(4, 0, 0)]);
            sim.attach_controller(QueueController::boxed()).unwrap();
            let reached = sim.tick_up_to(7 + extra).unwrap();
            prop_assert_eq!(reached, Tick(7));
        }
    }
}
