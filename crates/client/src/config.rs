use rpc_io::RpcAddress;

use crate::password::Password;
use crate::timeout::TimeoutConfig;

/// Settings for an [`RpcClient`](crate::RpcClient).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    address: RpcAddress,
    timeouts: TimeoutConfig,
    password: Option<Password>,
}

impl ClientConfig {
    /// Starts a builder with the local core client and default timeouts.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Endpoint to connect to.
    #[must_use]
    pub const fn address(&self) -> &RpcAddress {
        &self.address
    }

    /// Connect and reply timeouts.
    #[must_use]
    pub const fn timeouts(&self) -> TimeoutConfig {
        self.timeouts
    }

    /// Password used by [`RpcClient::open`](crate::RpcClient::open) to authorize.
    #[must_use]
    pub const fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }
}

/// Builder used to assemble a [`ClientConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
    address: Option<RpcAddress>,
    timeouts: TimeoutConfig,
    password: Option<Password>,
}

impl ClientConfigBuilder {
    /// Sets the endpoint.
    #[must_use]
    pub fn address(mut self, address: RpcAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Connects over TCP to `host:port`.
    #[must_use]
    pub fn tcp(self, host: impl Into<String>, port: u16) -> Self {
        self.address(RpcAddress::tcp(host, port))
    }

    /// Replaces the timeouts.
    #[must_use]
    pub const fn timeouts(mut self, timeouts: TimeoutConfig) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Authorizes with `password` after connecting.
    ///
    /// An empty password is kept and rejected by
    /// [`RpcClient::open`](crate::RpcClient::open).
    #[must_use]
    pub fn password(mut self, password: impl Into<Password>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Finalises the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        ClientConfig {
            address: self.address.unwrap_or_default(),
            timeouts: self.timeouts,
            password: self.password,
        }
    }
}
