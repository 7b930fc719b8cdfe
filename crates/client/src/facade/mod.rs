//! Connection-owning facade with one method per GUI-RPC.

mod account;
mod control;
mod queries;

use std::sync::{Mutex, MutexGuard, PoisonError};

use protocol::{Decoder, SimpleReply, SimpleReplyDecoder, command, decode_reply};
use rpc_io::{RpcStream, Transport, connect};

use crate::auth::{AuthError, authorize};
use crate::config::ClientConfig;
use crate::error::ClientError;

/// Lifecycle of the facade's connection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    /// No socket is open.
    #[default]
    Disconnected,
    /// A socket is open but the handshake has not succeeded.
    Connected,
    /// The handshake succeeded on the open socket.
    Authenticated,
}

#[derive(Debug, Default)]
struct Connection {
    transport: Option<Transport<RpcStream>>,
    authenticated: bool,
    last_error: Option<String>,
}

impl Connection {
    fn state(&self) -> ConnectionState {
        match (&self.transport, self.authenticated) {
            (None, _) => ConnectionState::Disconnected,
            (Some(_), false) => ConnectionState::Connected,
            (Some(_), true) => ConnectionState::Authenticated,
        }
    }

    fn disconnect(&mut self) {
        if let Some(transport) = self.transport.take() {
            let _ = transport.get_ref().shutdown();
        }
        self.authenticated = false;
    }

    fn round_trip(&mut self, request: &str) -> Result<String, ClientError> {
        let transport = self.transport.as_mut().ok_or_else(ClientError::not_connected)?;
        match transport.round_trip(request) {
            Ok(reply) => Ok(reply),
            Err(error) => {
                logging::trace_rpc!(warn, "request failed: {}", error);
                if error.is_fatal() {
                    self.disconnect();
                }
                Err(error.into())
            }
        }
    }
}

/// Client for one core client.
///
/// All calls share a single connection guarded by a mutex, so concurrent
/// callers are served one request/reply exchange at a time. A transport
/// failure closes the connection; call [`open`](Self::open) to reconnect.
#[derive(Debug)]
pub struct RpcClient {
    config: ClientConfig,
    connection: Mutex<Connection>,
}

impl RpcClient {
    /// Creates a disconnected client.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(Connection::default()),
        }
    }

    /// Settings this client was created with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Connects, replacing any existing connection.
    ///
    /// When the configuration carries a password the handshake runs as well;
    /// a failed handshake closes the new connection.
    pub fn open(&self) -> Result<(), ClientError> {
        let mut connection = self.lock();
        connection.disconnect();

        let address = self.config.address();
        connection.transport = Some(connect(address, &self.config.timeouts().transport())?);
        logging::trace_rpc!(info, "opened connection to {}", address);

        if let Some(password) = self.config.password() {
            if let Err(error) = Self::handshake(&mut connection, password.expose()) {
                connection.disconnect();
                return Err(error);
            }
        }
        Ok(())
    }

    /// Authorizes the open connection with `password`.
    pub fn authorize(&self, password: &str) -> Result<(), ClientError> {
        let mut connection = self.lock();
        Self::handshake(&mut connection, password)
    }

    fn handshake(connection: &mut Connection, password: &str) -> Result<(), ClientError> {
        let transport = connection
            .transport
            .as_mut()
            .ok_or_else(ClientError::not_connected)?;
        connection.authenticated = false;

        match authorize(transport, password) {
            Ok(()) => {
                connection.authenticated = true;
                Ok(())
            }
            Err(AuthError::Transport(error)) => {
                connection.disconnect();
                Err(error.into())
            }
            Err(error) => {
                connection.last_error = Some(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Closes the connection; a no-op when already closed.
    pub fn close(&self) {
        let mut connection = self.lock();
        if connection.transport.is_some() {
            logging::trace_rpc!(info, "closing connection to {}", self.config.address());
        }
        connection.disconnect();
    }

    /// Probes the connection with a status query.
    ///
    /// A dead peer answers with an empty read; any failure closes the
    /// connection and returns `false`.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        let mut connection = self.lock();
        if connection.transport.is_none() {
            return false;
        }

        match connection.round_trip(&command::get_cc_status()) {
            Ok(reply) if !reply.trim().is_empty() => true,
            Ok(_) => {
                logging::trace_rpc!(warn, "empty reply to liveness probe");
                connection.disconnect();
                false
            }
            Err(_) => {
                connection.disconnect();
                false
            }
        }
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.lock().state()
    }

    /// Error message left by the most recent failed command, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends `request` and decodes the reply; decode failures yield `None`.
    fn query<D: Decoder>(&self, request: &str, decoder: D) -> Result<Option<D::Output>, ClientError> {
        let reply = self.lock().round_trip(request)?;
        match decode_reply(&reply, decoder) {
            Ok(output) => Ok(Some(output)),
            Err(error) => {
                logging::trace_rpc!(warn, "discarding undecodable reply: {}", error);
                Ok(None)
            }
        }
    }

    /// Sends a mutating `request` and records its outcome in the last-error slot.
    fn command(&self, request: &str) -> Result<bool, ClientError> {
        let mut connection = self.lock();
        let reply = connection.round_trip(request)?;
        let outcome = decode_reply(&reply, SimpleReplyDecoder::new()).ok().flatten();

        let (success, error) = match outcome {
            Some(SimpleReply::Success) => (true, None),
            Some(SimpleReply::Failure) => (false, Some("request failed".to_owned())),
            Some(SimpleReply::Error(message)) => (false, Some(message)),
            None => (false, Some("unrecognised reply".to_owned())),
        };
        if let Some(message) = &error {
            logging::trace_rpc!(warn, "command rejected: {}", message);
        }
        connection.last_error = error;
        Ok(success)
    }
}

impl Drop for RpcClient {
    fn drop(&mut self) {
        self.close();
    }
}
