//! The `Simulation` struct and its tick loop.

use lift_control::{Controller, ControlResult, Directive, DirectiveQueue, Notification};
use lift_core::{ActorId, ElevatorId, FloorId, SimConfig, Tick};
use lift_core::config::DEFAULT_ELEVATOR_CAPACITY;
use tracing::{debug, trace};

use crate::elevator::{Elevator, Floor, MoveOutcome};
use crate::{Actor, Event, EventListener, POINTS_PER_ACTOR, SimError, SimResult};

/// The simulation engine.
///
/// Owns every elevator, floor, and actor, advances the logical clock one tick
/// at a time, and routes notifications to exactly one attached
/// [`Controller`].  Each tick runs in a fixed order:
///
/// 1. `TickStart` is emitted.
/// 2. Every elevator steps, in index order.  Arrivals notify riders and then
///    the controller.
/// 3. Every actor advances, in attachment order.
/// 4. `TickDone` is emitted and the clock advances.
///
/// Moves a controller issues during a callback are applied as soon as the
/// callback returns, within the same tick.
///
/// A `Simulation` is meant for sequential use from a single thread; it does
/// no internal locking.
pub struct Simulation {
    tick:       Tick,
    capacity:   u8,
    elevators:  Vec<Elevator>,
    floors:     Vec<Floor>,
    actors:     Vec<Actor>,
    controller: Option<Box<dyn Controller>>,
    listeners:  Vec<Box<dyn EventListener>>,
    initialized: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ELEVATOR_CAPACITY)
    }

    /// An empty simulation whose elevators will carry `capacity` passengers.
    pub fn with_capacity(capacity: u8) -> Self {
        Self {
            tick:        Tick::ZERO,
            capacity,
            elevators:   Vec::new(),
            floors:      Vec::new(),
            actors:      Vec::new(),
            controller:  None,
            listeners:   Vec::new(),
            initialized: false,
        }
    }

    /// Validate `config` and build an initialised simulation from it.
    ///
    /// Listeners attached afterwards miss the initialisation events; use
    /// [`with_capacity`][Self::with_capacity] plus
    /// [`initialize`][Self::initialize] if they are needed.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut sim = Self::with_capacity(config.elevator_capacity);
        sim.initialize(config.elevator_count, config.floor_count)?;
        Ok(sim)
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Build the elevator and floor collections.
    ///
    /// Emits `InitStart`, one `InformElevator` per elevator, one
    /// `InformFloor` per floor, then `InitDone`.
    pub fn initialize(&mut self, elevator_count: u32, floor_count: u32) -> SimResult<()> {
        if self.initialized {
            return Err(SimError::AlreadyInitialized);
        }
        self.emit(Event::InitStart);
        for i in 0..elevator_count {
            self.elevators.push(Elevator::new(self.capacity));
            self.emit(Event::InformElevator { elevator: ElevatorId(i) });
        }
        for i in 0..floor_count {
            self.floors.push(Floor { id: FloorId(i) });
            self.emit(Event::InformFloor { floor: FloorId(i) });
        }
        self.emit(Event::InitDone);
        self.initialized = true;
        debug!(elevators = elevator_count, floors = floor_count, "simulation initialised");
        Ok(())
    }

    /// Register an actor.  Actors advance in attachment order.
    pub fn attach_actor(&mut self, actor: Actor) -> ActorId {
        let id = ActorId(self.actors.len() as u32);
        self.actors.push(actor);
        id
    }

    /// Append a listener.  Listeners are never removed.
    pub fn attach_listener<L: EventListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Attach `controller` and call its `init` with the elevator roster.
    pub fn attach_controller(&mut self, controller: Box<dyn Controller>) -> SimResult<()> {
        if !self.initialized {
            return Err(SimError::NotInitialized);
        }
        self.controller = Some(controller);
        self.notify(Notification::Init {
            elevator_count: self.elevators.len() as u32,
            floor_count:    self.floors.len() as u32,
        })
    }

    /// Build a controller with `factory`, then attach it.
    pub fn attach_controller_with<F>(&mut self, factory: F) -> SimResult<()>
    where
        F: FnOnce() -> ControlResult<Box<dyn Controller>>,
    {
        if !self.initialized {
            return Err(SimError::NotInitialized);
        }
        self.attach_controller(factory()?)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Advance by one tick.
    ///
    /// Returns `true` while any actor still has an objective to complete.
    /// The clock advances even if the tick fails part-way.
    pub fn tick(&mut self) -> SimResult<bool> {
        if !self.initialized {
            return Err(SimError::NotInitialized);
        }
        let now = self.tick;
        let result = self.process_tick(now);
        self.tick = now + 1;
        result?;
        Ok(!self.actors_completed_objectives())
    }

    /// Tick until `additional` ticks have run or every actor has finished.
    ///
    /// Returns the tick reached.
    pub fn tick_up_to(&mut self, additional: u64) -> SimResult<Tick> {
        let end = self.tick.offset(additional);
        while self.tick < end && self.tick()? {}
        Ok(self.tick)
    }

    /// True iff every attached actor has finished.
    pub fn actors_completed_objectives(&self) -> bool {
        self.actors.iter().all(Actor::is_finished)
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn elevators(&self) -> &[Elevator] {
        &self.elevators
    }

    pub fn elevator(&self, id: ElevatorId) -> Option<&Elevator> {
        self.elevators.get(id.index())
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    /// Elevators whose car is currently on `floor`, moving or not.
    pub fn elevators_at(&self, floor: FloorId) -> impl Iterator<Item = ElevatorId> + '_ {
        self.elevators
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.current_floor() == floor)
            .map(|(i, _)| ElevatorId(i as u32))
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<()> {
        self.emit(Event::TickStart { tick: now });

        for i in 0..self.elevators.len() {
            if self.elevators[i].step() {
                self.elevator_arrived(ElevatorId(i as u32))?;
            }
        }

        for i in 0..self.actors.len() {
            self.advance_actor(ActorId(i as u32), now)?;
        }

        trace!(tick = now.0, "tick done");
        self.emit(Event::TickDone { tick: now });
        Ok(())
    }

    fn advance_actor(&mut self, id: ActorId, now: Tick) -> SimResult<()> {
        use crate::ActorState as S;

        match self.actors[id.index()].state() {
            S::Unstarted => {
                if let Some(floor) = self.actors[id.index()].try_start(now) {
                    debug!(tick = now.0, actor = %id, floor = %floor, "actor calls elevator");
                    self.emit(Event::ElevatorCalled { tick: now, floor });
                    self.notify(Notification::Called { floor })?;
                }
            }
            S::WaitingOnFloor { floor } => {
                let found = self.elevators_at(floor).next();
                if let Some(elevator) = found {
                    self.actors[id.index()].board(elevator, now);
                }
            }
            S::EnteringElevator { .. } => {
                let (elevator, floor) = self.actors[id.index()]
                    .select_goal(now)
                    .ok_or(SimError::NotInElevator(id))?;
                // The controller hears the selection before it is recorded.
                let delivered = self.notify(Notification::FloorSelected { elevator, floor });
                self.elevators[elevator.index()].record_selection(floor);
                self.emit(Event::ElevatorFloorRequest { tick: now, elevator, floor });
                delivered?;
            }
            S::WaitingInElevator { .. } | S::Finished { .. } => {}
        }
        Ok(())
    }

    /// `elevator` just stopped at its target: tell riders, then the controller.
    fn elevator_arrived(&mut self, elevator: ElevatorId) -> SimResult<()> {
        let now = self.tick;
        let floor = self.elevators[elevator.index()].current_floor();
        debug!(tick = now.0, elevator = %elevator, floor = %floor, "elevator arrived");
        self.emit(Event::ElevatorArrived { tick: now, elevator, floor });

        for i in 0..self.actors.len() {
            if self.actors[i].elevator_stopped(elevator, floor, now) {
                self.emit(Event::ActorFinished {
                    tick:   now,
                    actor:  ActorId(i as u32),
                    points: POINTS_PER_ACTOR,
                });
            }
        }

        self.notify(Notification::Arrived { elevator })
    }

    // ── Controller plumbing ───────────────────────────────────────────────

    /// Deliver `notification` to the controller, then apply the moves it
    /// issued in order.
    fn notify(&mut self, notification: Notification) -> SimResult<()> {
        let controller = self.controller.as_deref_mut().ok_or(SimError::NoController)?;
        let mut moves = DirectiveQueue::new();
        notification.deliver(controller, &mut moves)?;
        for directive in moves {
            self.apply_directive(directive)?;
        }
        Ok(())
    }

    fn apply_directive(&mut self, directive: Directive) -> SimResult<()> {
        let Directive { elevator, floor } = directive;
        if elevator.index() >= self.elevators.len() {
            return Err(SimError::UnknownElevator { elevator, roster: self.elevators.len() });
        }
        if floor.index() >= self.floors.len() {
            return Err(SimError::UnknownFloor { floor, floors: self.floors.len() });
        }

        match self.elevators[elevator.index()].request_move(floor) {
            MoveOutcome::Started(state) => {
                debug!(tick = self.tick.0, elevator = %elevator, floor = %floor, ?state, "moving elevator");
                Ok(())
            }
            MoveOutcome::Arrived => self.elevator_arrived(elevator),
            MoveOutcome::Ignored => {
                debug!(tick = self.tick.0, elevator = %elevator, floor = %floor, "elevator busy; move ignored");
                Ok(())
            }
        }
    }

    fn emit(&mut self, event: Event) {
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}
