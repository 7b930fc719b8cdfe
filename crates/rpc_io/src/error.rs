use std::io;

use protocol::EnvelopeError;

/// Failures of the socket transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection could not be established.
    #[error("failed to connect to {address}: {source}")]
    Connect {
        /// Endpoint that refused or could not be resolved.
        address: String,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
    /// No complete reply arrived within the read timeout.
    #[error("timed out waiting for a reply from the core client")]
    Timeout,
    /// The core client closed the connection before sending anything.
    #[error("connection closed by the core client")]
    PeerClosed,
    /// The connection closed in the middle of a reply.
    #[error("connection closed after {received} bytes of an unterminated reply")]
    Truncated {
        /// Bytes received since the previous terminator.
        received: usize,
    },
    /// The command body cannot be framed.
    #[error("invalid command: {0}")]
    InvalidCommand(#[from] EnvelopeError),
    /// Any other socket failure.
    #[error("failed to {action} the GUI-RPC socket: {source}")]
    Io {
        /// Operation that failed (`read`, `write`, ...).
        action: &'static str,
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    pub(crate) const fn io(action: &'static str, source: io::Error) -> Self {
        Self::Io { action, source }
    }

    /// Returns `true` when the connection can no longer be used.
    ///
    /// Only [`TransportError::InvalidCommand`] leaves the stream intact.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidCommand(_))
    }
}
