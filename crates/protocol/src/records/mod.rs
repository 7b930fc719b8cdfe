//! Typed records decoded from GUI-RPC replies.
//!
//! Records are plain owned values. Every decode produces fresh records; the
//! library never patches a previously returned value in place.

mod account;
mod app;
mod host;
mod message;
mod prefs;
mod project;
mod state;
mod status;
mod task;
mod transfer;

pub use account::{
    AccountManagerInfo, AccountOut, AcctMgrInfo, AcctMgrRpcReply, AllProjectsList,
    ProjectAttachReply, ProjectConfig, ProjectInfo,
};
pub use app::{App, AppVersion, Workunit};
pub use host::HostInfo;
pub use message::{Message, Notice};
pub use prefs::{GlobalPreferences, TimePreferences, TimeSpan};
pub use project::{GuiUrl, Project, ResourceDebt};
pub use state::{CcState, VersionInfo};
pub use status::{CcStatus, Mode, ParseModeError};
pub use task::{ActiveTask, ActiveTaskState, ResultState, TaskResult};
pub use transfer::Transfer;

/// Outcome of a mutating command.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SimpleReply {
    /// `<success/>`
    Success,
    /// `<failure/>`
    Failure,
    /// `<error>message</error>`
    Error(String),
}

impl SimpleReply {
    /// Returns `true` for [`SimpleReply::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Message carried by an error reply, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Success | Self::Failure => None,
        }
    }
}

pub(crate) fn same_url(left: &str, right: &str) -> bool {
    left.eq_ignore_ascii_case(right)
}
