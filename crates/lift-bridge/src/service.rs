//! TCP front end for a [`ControllerHost`].

use std::io::{self, BufReader, BufWriter};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lift_control::ControllerFn;
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;
use crate::host::{ControllerHost, SharedHost};
use crate::wire::{RejectKind, Request, Response, read_frame, write_frame};
use crate::{BridgeError, BridgeResult};

/// Pause after a failed accept.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(20);

/// Bind `config.listen_addr` and serve controllers built by `factory`.
///
/// Only fails if the address cannot be bound.
pub fn run_controller_service(config: &BridgeConfig, factory: Arc<ControllerFn>) -> BridgeResult<()> {
    let listener = TcpListener::bind(&config.listen_addr)?;
    let mut host = ControllerHost::new(factory);
    if config.publish_health {
        host.publish_health(config.service_name.clone());
    }
    serve(listener, host.into_shared())
}

/// Accept connections on `listener`, one thread per connection.
///
/// All connections share `host`; its lock serialises their requests.
/// Runs until the process ends; failed accepts are logged and skipped.
pub fn serve(listener: TcpListener, host: SharedHost) -> BridgeResult<()> {
    info!(addr = %listener.local_addr()?, "controller service listening");
    accept_loop(listener.incoming(), &host);
    Ok(())
}

/// Hand every accepted stream to its own thread.  An accept error only costs
/// that connection.
pub(crate) fn accept_loop<I>(incoming: I, host: &SharedHost)
where
    I: IntoIterator<Item = io::Result<TcpStream>>,
{
    for stream in incoming {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "accept failed");
                thread::sleep(ACCEPT_BACKOFF);
                continue;
            }
        };
        let host = Arc::clone(host);
        thread::spawn(move || {
            let peer = stream.peer_addr().map(|a| a.to_string()).unwrap_or_default();
            debug!(peer = %peer, "connection opened");
            match handle_connection(stream, &host) {
                Ok(()) => debug!(peer = %peer, "connection closed"),
                Err(err) => warn!(peer = %peer, error = %err, "connection failed"),
            }
        });
    }
}

/// Answer requests on one connection until the peer hangs up.
fn handle_connection(stream: TcpStream, host: &SharedHost) -> BridgeResult<()> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut writer = BufWriter::new(stream);
    loop {
        let response = match read_frame::<_, Request>(&mut reader) {
            Ok(Some(request)) => host.lock().handle(request),
            Ok(None) => return Ok(()),
            Err(BridgeError::Decode(err)) => Response::Error {
                kind:    RejectKind::Malformed,
                message: err.to_string(),
            },
            Err(err) => return Err(err),
        };
        write_frame(&mut writer, &response)?;
    }
}
