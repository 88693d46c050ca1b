//! Server-side adapter: hosts one controller and answers Spawn/Notice.

use std::sync::Arc;

use lift_control::{Controller, ControllerFn, Directive, DirectiveQueue, Notification};
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::wire::{Request, Response, ServingStatus, SessionId, WireDirective, WireEvent};
use crate::{BridgeError, BridgeResult};

/// A host shared between connections.  The lock serialises every request,
/// so at most one Notice runs against the session at a time.
pub type SharedHost = Arc<Mutex<ControllerHost>>;

/// Where a session is in its life.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Spawned; the controller has not seen `Init` yet.
    Spawned,
    /// Initialised with a roster of `elevator_count` elevators.
    Active { elevator_count: u32 },
    /// A Notice failed part-way.  The controller may hold state for moves
    /// that were never delivered, so every later Notice is refused until the
    /// next `spawn`.
    Failed,
}

struct Session {
    id:         SessionId,
    state:      SessionState,
    controller: Box<dyn Controller>,
    pending:    DirectiveQueue,
}

/// Hosts at most one live controller session.
///
/// `spawn` always builds a fresh controller and replaces any earlier
/// session.  `notice` applies events in the order given and hands back every
/// move the controller issued while doing so.
pub struct ControllerHost {
    factory: Arc<ControllerFn>,
    session: Option<Session>,
    ids:     SmallRng,
    health:  Option<String>,
}

impl ControllerHost {
    pub fn new(factory: Arc<ControllerFn>) -> Self {
        Self::with_rng(factory, SmallRng::from_entropy())
    }

    /// Like [`new`][Self::new] but with reproducible session ids.
    pub fn with_seed(factory: Arc<ControllerFn>, seed: u64) -> Self {
        Self::with_rng(factory, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(factory: Arc<ControllerFn>, ids: SmallRng) -> Self {
        Self { factory, session: None, ids, health: None }
    }

    /// Report `Serving` to liveness checks naming `service`.
    pub fn publish_health(&mut self, service: impl Into<String>) {
        self.health = Some(service.into());
    }

    pub fn into_shared(self) -> SharedHost {
        Arc::new(Mutex::new(self))
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn session_state(&self) -> Option<SessionState> {
        self.session.as_ref().map(|s| s.state)
    }

    /// Start a new session, dropping any previous one.
    pub fn spawn(&mut self) -> SessionId {
        let previous = self.session_id();
        let id = loop {
            let candidate = SessionId(self.ids.r#gen());
            if candidate.0 != 0 && Some(candidate) != previous {
                break candidate;
            }
        };
        if let Some(old) = previous {
            debug!(old = %old, new = %id, "replacing controller session");
        }
        self.session = Some(Session {
            id,
            state:      SessionState::Spawned,
            controller: (self.factory)(),
            pending:    DirectiveQueue::new(),
        });
        debug!(session = %id, "spawned controller");
        id
    }

    /// Apply `events` to the session's controller in order and return the
    /// moves it issued.  Returned moves are cleared, so none is returned twice.
    ///
    /// On error the moves from this call are discarded and the session moves
    /// to [`SessionState::Failed`].
    pub fn notice(
        &mut self,
        session: SessionId,
        events:  &[Notification],
    ) -> BridgeResult<Vec<Directive>> {
        let active = self.session.as_mut().ok_or(BridgeError::NoSession)?;
        if active.id != session {
            return Err(BridgeError::UnknownSession { expected: Some(active.id), got: session });
        }
        if active.state == SessionState::Failed {
            return Err(BridgeError::SessionFailed(session));
        }

        let result = apply_events(active, events).and_then(|()| {
            let roster = match active.state {
                SessionState::Active { elevator_count } => elevator_count,
                _ => 0,
            };
            match active.pending.iter().find(|d| d.elevator.0 >= roster) {
                Some(bad) => Err(BridgeError::InvalidDirective { elevator: bad.elevator.0, roster }),
                None => Ok(()),
            }
        });
        let moves = active.pending.take();
        if let Err(err) = result {
            warn!(session = %session, error = %err, "notice failed; session is unusable until respawned");
            active.state = SessionState::Failed;
            return Err(err);
        }
        debug!(session = %session, events = events.len(), moves = moves.len(), "notice handled");
        Ok(moves)
    }

    /// Answer one wire request.  Failures become `Response::Error`.
    pub fn handle(&mut self, request: Request) -> Response {
        let op = request.name();
        match self.try_handle(request) {
            Ok(response) => response,
            Err(err) => {
                warn!(op, error = %err, "rejecting request");
                Response::Error { kind: err.reject_kind(), message: err.to_string() }
            }
        }
    }

    fn try_handle(&mut self, request: Request) -> BridgeResult<Response> {
        match request {
            Request::Spawn => Ok(Response::Spawned { session: self.spawn() }),
            Request::Notice { session, events } => {
                let events: Vec<Notification> = events.into_iter().map(WireEvent::into).collect();
                let moves = self.notice(session, &events)?;
                Ok(Response::Updates {
                    pending: moves.into_iter().map(WireDirective::from).collect(),
                })
            }
            Request::Health { service } => {
                let status = match &self.health {
                    Some(name) if *name == service => ServingStatus::Serving,
                    Some(_) => ServingStatus::ServiceUnknown,
                    None => ServingStatus::NotServing,
                };
                Ok(Response::Health { status })
            }
        }
    }
}

fn apply_events(session: &mut Session, events: &[Notification]) -> BridgeResult<()> {
    for &event in events {
        if let Notification::Init { elevator_count, .. } = event {
            session.state = SessionState::Active { elevator_count };
        }
        event.deliver(session.controller.as_mut(), &mut session.pending)?;
    }
    Ok(())
}
