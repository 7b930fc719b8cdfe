use std::fmt;
#[cfg(unix)]
use std::path::PathBuf;
use std::time::Duration;

/// TCP port the core client listens on for GUI-RPC connections.
pub const DEFAULT_PORT: u16 = 31416;

/// How long a reply may take before the call fails.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15);

/// How long establishing the connection may take.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoint of a core client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RpcAddress {
    /// TCP host and port.
    Tcp {
        /// Host name or IP literal.
        host: String,
        /// TCP port, normally [`DEFAULT_PORT`].
        port: u16,
    },
    /// Filesystem path of a Unix-domain socket.
    #[cfg(unix)]
    Unix(PathBuf),
}

impl RpcAddress {
    /// TCP endpoint at `host:port`.
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::Tcp {
            host: host.into(),
            port,
        }
    }

    /// The local core client on the default port.
    #[must_use]
    pub fn localhost() -> Self {
        Self::tcp("localhost", DEFAULT_PORT)
    }
}

impl Default for RpcAddress {
    fn default() -> Self {
        Self::localhost()
    }
}

impl fmt::Display for RpcAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp { host, port } if host.contains(':') => write!(f, "[{host}]:{port}"),
            Self::Tcp { host, port } => write!(f, "{host}:{port}"),
            #[cfg(unix)]
            Self::Unix(path) => write!(f, "unix:{}", path.display()),
        }
    }
}

/// Socket timeouts applied by [`connect`](crate::connect).
///
/// `None` disables the corresponding timeout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransportConfig {
    /// Limit on establishing a TCP connection.
    pub connect_timeout: Option<Duration>,
    /// Limit on each read while waiting for a reply.
    pub read_timeout: Option<Duration>,
    /// Limit on each write of a request.
    pub write_timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            read_timeout: Some(DEFAULT_READ_TIMEOUT),
            write_timeout: Some(DEFAULT_READ_TIMEOUT),
        }
    }
}

impl TransportConfig {
    /// Replaces the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Replaces the read timeout.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Replaces the write timeout.
    #[must_use]
    pub const fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_address_is_local_gui_rpc_port() {
        assert_eq!(
            RpcAddress::default(),
            RpcAddress::Tcp {
                host: "localhost".to_owned(),
                port: 31416
            }
        );
    }

    #[test]
    fn display_brackets_ipv6_hosts() {
        assert_eq!(RpcAddress::tcp("::1", 31416).to_string(), "[::1]:31416");
        assert_eq!(RpcAddress::tcp("crunch", 1043).to_string(), "crunch:1043");
    }

    #[cfg(unix)]
    #[test]
    fn display_marks_unix_sockets() {
        let address = RpcAddress::Unix(PathBuf::from("/run/boinc/gui_rpc"));
        assert_eq!(address.to_string(), "unix:/run/boinc/gui_rpc");
    }

    #[test]
    fn default_config_uses_fifteen_second_reads() {
        let config = TransportConfig::default();
        assert_eq!(config.read_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.with_read_timeout(None).read_timeout, None);
    }
}
