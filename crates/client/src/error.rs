use std::error::Error;
use std::fmt;

use rpc_io::TransportError;

use crate::auth::AuthError;
use crate::exit_code::ExitCode;

/// Error returned by [`RpcClient`](crate::RpcClient) calls.
///
/// Carries the exit code a command-line front-end should report together with
/// a rendered diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientError {
    code: ExitCode,
    message: String,
}

impl ClientError {
    /// Creates an error with the supplied exit code and message.
    pub fn new(code: ExitCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub(crate) fn not_connected() -> Self {
        Self::new(ExitCode::Connection, "not connected to a core client")
    }

    /// Exit code class of the failure.
    #[must_use]
    pub const fn code(&self) -> ExitCode {
        self.code
    }

    /// Numeric exit code for the process.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.code.as_i32()
    }

    /// Rendered diagnostic.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ClientError {}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        let code = match error {
            TransportError::Timeout => ExitCode::Timeout,
            TransportError::InvalidCommand(_) => ExitCode::Syntax,
            TransportError::Connect { .. }
            | TransportError::PeerClosed
            | TransportError::Truncated { .. }
            | TransportError::Io { .. } => ExitCode::Connection,
        };
        Self::new(code, error.to_string())
    }
}

impl From<AuthError> for ClientError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Transport(inner) => inner.into(),
            AuthError::EmptyPassword | AuthError::Unauthorized => {
                Self::new(ExitCode::Unauthorized, error.to_string())
            }
            AuthError::Protocol(_) => Self::new(ExitCode::Protocol, error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_timeouts_map_to_timeout_code() {
        let error = ClientError::from(TransportError::Timeout);
        assert_eq!(error.code(), ExitCode::Timeout);
        assert_eq!(error.exit_code(), 5);
    }

    #[test]
    fn auth_failures_keep_their_message() {
        let error = ClientError::from(AuthError::Unauthorized);
        assert_eq!(error.code(), ExitCode::Unauthorized);
        assert_eq!(error.message(), AuthError::Unauthorized.to_string());

        let nested = ClientError::from(AuthError::Transport(TransportError::PeerClosed));
        assert_eq!(nested.code(), ExitCode::Connection);
    }
}
