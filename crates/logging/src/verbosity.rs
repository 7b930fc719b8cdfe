use std::fmt;

/// Root target shared by every GUI-RPC event.
const ROOT_TARGET: &str = "guirpc";

/// Subsystems that emit tracing events.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Subsystem {
    /// Socket connection, framing and timeouts.
    Transport,
    /// Tag-stream tokenizing and reply decoding.
    Decode,
    /// Nonce exchange.
    Auth,
    /// Facade calls and connection state changes.
    Rpc,
}

impl Subsystem {
    /// All subsystems in declaration order.
    pub const ALL: [Self; 4] = [Self::Transport, Self::Decode, Self::Auth, Self::Rpc];

    /// Tracing target used by this subsystem's events.
    #[must_use]
    pub const fn target(self) -> &'static str {
        match self {
            Self::Transport => "guirpc::transport",
            Self::Decode => "guirpc::decode",
            Self::Auth => "guirpc::auth",
            Self::Rpc => "guirpc::rpc",
        }
    }

    /// Maps a tracing target back to its subsystem.
    ///
    /// Accepts either the full target or the bare subsystem name.
    #[must_use]
    pub fn from_target(target: &str) -> Option<Self> {
        let name = target
            .strip_prefix(ROOT_TARGET)
            .and_then(|rest| rest.strip_prefix("::"))
            .unwrap_or(target);
        match name {
            "transport" => Some(Self::Transport),
            "decode" => Some(Self::Decode),
            "auth" => Some(Self::Auth),
            "rpc" => Some(Self::Rpc),
            _ => None,
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target())
    }
}

/// Verbosity selected by the host, usually from a `-v` count.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings such as malformed reply fields.
    #[default]
    Normal,
    /// Connection lifecycle and RPC outcomes.
    Verbose,
    /// Per-call decode and auth detail.
    Debug,
    /// Raw framing activity.
    Trace,
}

impl Verbosity {
    /// Converts a repeated `-v` flag count into a verbosity level.
    #[must_use]
    pub const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// `EnvFilter` directive enabling this verbosity for GUI-RPC targets.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "guirpc=error",
            Self::Normal => "guirpc=warn",
            Self::Verbose => "guirpc=info",
            Self::Debug => "guirpc=debug",
            Self::Trace => "guirpc=trace",
        }
    }
}
