//! Client-side adapter: a local `Controller` that forwards to a host.

use std::sync::Arc;

use lift_control::{ControlResult, ControlledElevators, Controller, Notification};
use lift_core::{ElevatorId, FloorId};
use parking_lot::Mutex;
use tracing::debug;

use crate::config::BridgeConfig;
use crate::host::SharedHost;
use crate::transport::{LocalTransport, TcpTransport, Transport};
use crate::wire::{Request, Response, SessionId, WireDirective};
use crate::{BridgeError, BridgeResult};

/// A connection to a controller host, able to spawn remote controllers.
///
/// Cheap to clone; clones share the underlying transport, and each round
/// trip holds it exclusively.
#[derive(Clone)]
pub struct Landing {
    transport: Arc<Mutex<Box<dyn Transport>>>,
}

impl Landing {
    /// Dial the host at `config.listen_addr` within `config.call_timeout`.
    pub fn dial(config: &BridgeConfig) -> BridgeResult<Self> {
        debug!(target = %config.listen_addr, "dialling controller host");
        let transport = TcpTransport::connect(&config.listen_addr, config.call_timeout)?;
        Ok(Self::with_transport(transport))
    }

    /// Talk to an in-process host directly.
    pub fn local(host: SharedHost) -> Self {
        Self::with_transport(LocalTransport::new(host))
    }

    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self { transport: Arc::new(Mutex::new(Box::new(transport))) }
    }

    fn round_trip(&self, request: &Request) -> BridgeResult<Response> {
        match self.transport.lock().round_trip(request)? {
            Response::Error { kind, message } => Err(BridgeError::Rejected { kind, message }),
            response => Ok(response),
        }
    }

    /// Ask the host for a fresh session and wrap it as a local controller.
    pub fn spawn_controller(&self) -> BridgeResult<RemoteController> {
        match self.round_trip(&Request::Spawn)? {
            Response::Spawned { session } => Ok(RemoteController {
                landing:   self.clone(),
                session,
                elevators: Vec::new(),
            }),
            _ => Err(BridgeError::UnexpectedResponse("spawn")),
        }
    }

    /// A controller factory suitable for `Simulation::attach_controller_with`.
    pub fn controller_adapter(&self) -> impl Fn() -> ControlResult<Box<dyn Controller>> + Send + Sync + use<> {
        let landing = self.clone();
        move || Ok(Box::new(landing.spawn_controller()?) as Box<dyn Controller>)
    }

    /// Send `events` on `session` and return the raw directives.
    pub fn notice(
        &self,
        session: SessionId,
        events:  Vec<Notification>,
    ) -> BridgeResult<Vec<WireDirective>> {
        let request = Request::Notice {
            session,
            events: events.into_iter().map(Into::into).collect(),
        };
        match self.round_trip(&request)? {
            Response::Updates { pending } => Ok(pending),
            _ => Err(BridgeError::UnexpectedResponse("notice")),
        }
    }
}

/// A [`Controller`] whose decisions are made by a remote host.
///
/// Each callback is one Notice round trip; the directives in the response
/// are replayed through the local move capability in response order.
pub struct RemoteController {
    landing:   Landing,
    session:   SessionId,
    elevators: Vec<ElevatorId>,
}

impl RemoteController {
    pub fn session(&self) -> SessionId {
        self.session
    }

    fn dispatch(
        &mut self,
        notification: Notification,
        moves:        &mut dyn ControlledElevators,
    ) -> BridgeResult<()> {
        let pending = self.landing.notice(self.session, vec![notification])?;
        for directive in pending {
            let elevator = self.elevator_from_wire(directive.elevator)?;
            let floor = FloorId(directive.floor);
            debug!(elevator = %elevator, floor = %floor, "replaying remote move");
            moves.move_to(elevator, floor);
        }
        Ok(())
    }

    fn elevator_from_wire(&self, index: u32) -> BridgeResult<ElevatorId> {
        self.elevators.get(index as usize).copied().ok_or(BridgeError::InvalidDirective {
            elevator: index,
            roster:   self.elevators.len() as u32,
        })
    }
}

impl Controller for RemoteController {
    fn init(
        &mut self,
        elevators:   &[ElevatorId],
        floor_count: u32,
        moves:       &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        self.elevators = elevators.to_vec();
        let notification = Notification::Init {
            elevator_count: elevators.len() as u32,
            floor_count,
        };
        Ok(self.dispatch(notification, moves)?)
    }

    fn called(&mut self, floor: FloorId, moves: &mut dyn ControlledElevators) -> ControlResult<()> {
        Ok(self.dispatch(Notification::Called { floor }, moves)?)
    }

    fn floor_selected(
        &mut self,
        elevator: ElevatorId,
        floor:    FloorId,
        moves:    &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        Ok(self.dispatch(Notification::FloorSelected { elevator, floor }, moves)?)
    }

    fn completed_move(
        &mut self,
        elevator: ElevatorId,
        moves:    &mut dyn ControlledElevators,
    ) -> ControlResult<()> {
        Ok(self.dispatch(Notification::Arrived { elevator }, moves)?)
    }
}
