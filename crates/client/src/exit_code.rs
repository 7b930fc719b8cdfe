//! Process exit codes shared by the facade and the `boinc-rpc` front-end.

use std::fmt;

/// Outcome classes reported as the process exit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// The request completed.
    Ok = 0,
    /// Invalid command line or arguments.
    Syntax = 1,
    /// The core client could not be reached or the connection dropped.
    Connection = 2,
    /// The core client rejected the password.
    Unauthorized = 3,
    /// The reply violated the GUI-RPC protocol.
    Protocol = 4,
    /// The core client did not answer within the read timeout.
    Timeout = 5,
    /// The core client answered with a failure or error reply.
    Rejected = 6,
    /// Local I/O failed, such as reading the password file.
    LocalIo = 7,
}

impl ExitCode {
    /// Numeric value passed to `std::process::exit`.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Short description of the outcome.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Syntax => "syntax or usage error",
            Self::Connection => "connection error",
            Self::Unauthorized => "authorization failed",
            Self::Protocol => "protocol error",
            Self::Timeout => "timeout waiting for the core client",
            Self::Rejected => "request rejected by the core client",
            Self::LocalIo => "local I/O error",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}
