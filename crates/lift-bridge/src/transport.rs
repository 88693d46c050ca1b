//! Request/response channels between the client adapter and a host.

use std::io::{self, BufReader, BufWriter};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::host::SharedHost;
use crate::wire::{Request, Response, read_frame, write_frame};
use crate::{BridgeError, BridgeResult};

/// One blocking round trip per call.  No retries.
pub trait Transport: Send {
    fn round_trip(&mut self, request: &Request) -> BridgeResult<Response>;
}

// ── TCP ───────────────────────────────────────────────────────────────────────

/// Newline-delimited JSON over a TCP connection.
///
/// Connecting and every round trip are each bounded by one overall deadline;
/// exceeding it yields [`BridgeError::Timeout`].  A round trip that fails
/// part-way leaves the stream out of step with the peer, so the connection
/// is shut down and every later call fails with [`BridgeError::Closed`].
pub struct TcpTransport {
    reader:   BufReader<TcpStream>,
    writer:   BufWriter<TcpStream>,
    deadline: Duration,
    broken:   bool,
}

impl TcpTransport {
    /// Dial `target` (anything `host:port`-shaped), giving up once `deadline`
    /// has passed, however many addresses it resolves to.
    pub fn connect(target: &str, deadline: Duration) -> BridgeResult<Self> {
        let connect_err = |source: io::Error| BridgeError::Connect { target: target.to_string(), source };
        let until = Instant::now() + deadline;

        let addrs: Vec<SocketAddr> = target.to_socket_addrs().map_err(connect_err)?.collect();
        let mut last = io::Error::new(io::ErrorKind::AddrNotAvailable, "address resolved to nothing");
        for addr in addrs {
            let Some(budget) = remaining(until) else {
                return Err(BridgeError::Timeout(deadline));
            };
            match TcpStream::connect_timeout(&addr, budget) {
                Ok(stream) => return Self::from_stream(stream, deadline).map_err(connect_err),
                Err(err) => last = err,
            }
        }
        if last.kind() == io::ErrorKind::TimedOut && remaining(until).is_none() {
            return Err(BridgeError::Timeout(deadline));
        }
        Err(connect_err(last))
    }

    fn from_stream(stream: TcpStream, deadline: Duration) -> io::Result<Self> {
        stream.set_nodelay(true)?;
        let writer = BufWriter::new(stream.try_clone()?);
        Ok(Self { reader: BufReader::new(stream), writer, deadline, broken: false })
    }

    pub fn peer_addr(&self) -> BridgeResult<SocketAddr> {
        Ok(self.reader.get_ref().peer_addr()?)
    }

    /// False once a round trip has failed and the connection was dropped.
    pub fn is_usable(&self) -> bool {
        !self.broken
    }

    /// One round trip that must complete within `budget`.
    pub fn round_trip_within(&mut self, request: &Request, budget: Duration) -> BridgeResult<Response> {
        if self.broken {
            return Err(BridgeError::Closed);
        }
        let until = Instant::now() + budget;
        let result = self.exchange(request, until).map_err(|err| timed(err, budget));
        if result.is_err() {
            self.poison();
        }
        result
    }

    fn exchange(&mut self, request: &Request, until: Instant) -> BridgeResult<Response> {
        trace!(op = request.name(), "sending request");
        self.arm(until)?;
        write_frame(&mut self.writer, request)?;
        self.arm(until)?;
        match read_frame(&mut self.reader)? {
            Some(response) => Ok(response),
            None => Err(BridgeError::Closed),
        }
    }

    /// Limit the next socket operations to whatever is left before `until`.
    fn arm(&self, until: Instant) -> BridgeResult<()> {
        let budget = remaining(until).ok_or_else(|| BridgeError::Io(io::ErrorKind::TimedOut.into()))?;
        let stream = self.reader.get_ref();
        stream.set_write_timeout(Some(budget))?;
        stream.set_read_timeout(Some(budget))?;
        Ok(())
    }

    fn poison(&mut self) {
        self.broken = true;
        if let Err(err) = self.reader.get_ref().shutdown(Shutdown::Both) {
            trace!(error = %err, "shutdown after failed round trip");
        }
        debug!("connection dropped after failed round trip");
    }
}

impl Transport for TcpTransport {
    fn round_trip(&mut self, request: &Request) -> BridgeResult<Response> {
        self.round_trip_within(request, self.deadline)
    }
}

/// Time left before `until`, or `None` if it has passed.
fn remaining(until: Instant) -> Option<Duration> {
    let left = until.saturating_duration_since(Instant::now());
    (!left.is_zero()).then_some(left)
}

fn timed(err: BridgeError, budget: Duration) -> BridgeError {
    match err {
        BridgeError::Io(io) if matches!(io.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
            BridgeError::Timeout(budget)
        }
        other => other,
    }
}

// ── In-process ────────────────────────────────────────────────────────────────

/// Calls a host in the same process, bypassing serialisation.
///
/// Behaves like a connection to a service backed by the same host.
pub struct LocalTransport {
    host: SharedHost,
}

impl LocalTransport {
    pub fn new(host: SharedHost) -> Self {
        Self { host }
    }
}

impl Transport for LocalTransport {
    fn round_trip(&mut self, request: &Request) -> BridgeResult<Response> {
        Ok(self.host.lock().handle(request.clone()))
    }
}
