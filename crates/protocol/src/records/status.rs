use std::fmt;
use std::str::FromStr;

/// Run, GPU or network mode of the core client.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mode {
    /// Run regardless of preferences.
    Always,
    /// Follow the preferences.
    #[default]
    Auto,
    /// Never run.
    Never,
    /// Revert to the permanent mode; only valid in set commands.
    Restore,
}

impl Mode {
    /// Numeric code used in `<task_mode>` and friends.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Always => 1,
            Self::Auto => 2,
            Self::Never => 3,
            Self::Restore => 4,
        }
    }

    /// Maps a numeric mode code back to a mode.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Always),
            2 => Some(Self::Auto),
            3 => Some(Self::Never),
            4 => Some(Self::Restore),
            _ => None,
        }
    }

    /// Tag name used inside the set-mode commands.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Auto => "auto",
            Self::Never => "never",
            Self::Restore => "restore",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a mode name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown mode '{0}' (expected always, auto, never or restore)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            "restore" => Ok(Self::Restore),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}

/// Reply to `get_cc_status`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CcStatus {
    pub network_status: i32,
    pub ams_password_error: bool,
    pub manager_must_quit: bool,
    pub task_suspend_reason: i32,
    pub task_mode: i32,
    pub task_mode_perm: i32,
    pub task_mode_delay: f64,
    pub gpu_suspend_reason: i32,
    pub gpu_mode: i32,
    pub gpu_mode_perm: i32,
    pub gpu_mode_delay: f64,
    pub network_suspend_reason: i32,
    pub network_mode: i32,
    pub network_mode_perm: i32,
    pub network_mode_delay: f64,
    pub disallow_attach: bool,
    pub simple_gui_only: bool,
    pub max_event_log_lines: i32,
}

impl CcStatus {
    /// Current task mode, when the code is known.
    #[must_use]
    pub const fn task_mode(&self) -> Option<Mode> {
        Mode::from_code(self.task_mode)
    }

    /// Current network mode, when the code is known.
    #[must_use]
    pub const fn network_mode(&self) -> Option<Mode> {
        Mode::from_code(self.network_mode)
    }

    /// Current GPU mode, when the code is known.
    #[must_use]
    pub const fn gpu_mode(&self) -> Option<Mode> {
        Mode::from_code(self.gpu_mode)
    }
}
