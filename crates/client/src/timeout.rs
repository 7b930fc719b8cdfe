//! Connect and reply timeouts for GUI-RPC connections.

use std::time::Duration;

use rpc_io::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT, TransportConfig};

/// Connection and reply timeouts.
///
/// `None` disables a timeout; a call then blocks until the core client
/// answers or closes the connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeoutConfig {
    connect_timeout: Option<Duration>,
    io_timeout: Option<Duration>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            io_timeout: Some(DEFAULT_READ_TIMEOUT),
        }
    }
}

impl TimeoutConfig {
    /// Configuration with every timeout disabled.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            connect_timeout: None,
            io_timeout: None,
        }
    }

    /// Sets the reply timeout in seconds; `0` disables it.
    #[must_use]
    pub const fn with_io_timeout(mut self, seconds: u64) -> Self {
        self.io_timeout = seconds_to_timeout(seconds);
        self
    }

    /// Sets the connect timeout in seconds; `0` disables it.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = seconds_to_timeout(seconds);
        self
    }

    /// Reply timeout.
    #[must_use]
    pub const fn io_timeout(&self) -> Option<Duration> {
        self.io_timeout
    }

    /// Connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Socket settings for [`rpc_io::connect`].
    #[must_use]
    pub const fn transport(&self) -> TransportConfig {
        TransportConfig {
            connect_timeout: self.connect_timeout,
            read_timeout: self.io_timeout,
            write_timeout: self.io_timeout,
        }
    }
}

const fn seconds_to_timeout(seconds: u64) -> Option<Duration> {
    if seconds == 0 {
        None
    } else {
        Some(Duration::from_secs(seconds))
    }
}
