//! Liveness check for a controller service.

use std::time::{Duration, Instant};

use crate::transport::TcpTransport;
use crate::wire::{Request, Response, ServingStatus};
use crate::{BridgeError, BridgeResult};

/// Ask the service at `target` whether `service` is serving.
///
/// Returns `Ok(false)` for a reachable service that is not serving that
/// name.  Connecting and the exchange share `deadline`; when nothing answers
/// in time the check fails with [`BridgeError::Connect`] or
/// [`BridgeError::Timeout`].
pub fn check_health(target: &str, service: &str, deadline: Duration) -> BridgeResult<bool> {
    let started = Instant::now();
    let mut transport = TcpTransport::connect(target, deadline)?;
    let left = deadline.saturating_sub(started.elapsed());
    if left.is_zero() {
        return Err(BridgeError::Timeout(deadline));
    }

    let request = Request::Health { service: service.to_string() };
    match transport.round_trip_within(&request, left) {
        Ok(Response::Health { status }) => Ok(status == ServingStatus::Serving),
        Ok(Response::Error { kind, message }) => Err(BridgeError::Rejected { kind, message }),
        Ok(_) => Err(BridgeError::UnexpectedResponse("health")),
        Err(BridgeError::Timeout(_)) => Err(BridgeError::Timeout(deadline)),
        Err(err) => Err(err),
    }
}
