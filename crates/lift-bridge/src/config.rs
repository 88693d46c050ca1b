//! Bridge configuration.

use std::time::Duration;

use serde::Deserialize;

/// Default address the controller service binds to.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:9998";

/// Service name the liveness check reports on.
pub const HEALTH_SERVICE: &str = "controller";

/// Settings shared by the client adapter and the controller service.
///
/// Loadable from any serde format; `call_timeout_ms` is in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Address to bind the service to, or to dial from the client.
    pub listen_addr: String,

    /// Deadline for connecting and for each request/response round trip.
    #[serde(rename = "call_timeout_ms", with = "millis")]
    pub call_timeout: Duration,

    /// Answer liveness checks for `service_name`.
    pub publish_health: bool,

    pub service_name: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            listen_addr:    DEFAULT_LISTEN_ADDR.to_string(),
            call_timeout:   Duration::from_secs(1),
            publish_health: true,
            service_name:   HEALTH_SERVICE.to_string(),
        }
    }
}

impl BridgeConfig {
    pub fn with_listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn without_health(mut self) -> Self {
        self.publish_health = false;
        self
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
