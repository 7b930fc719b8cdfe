//! Command bodies for every GUI-RPC request.
//!
//! Builders are pure: they take typed parameters and return the XML body
//! that goes inside the request envelope. Bodies carry no trailing newline;
//! [`frame_request`](crate::frame_request) adds the envelope's own. Every
//! caller-supplied string is XML-escaped.

mod account;
mod ops;
mod prefs;

use std::fmt::{self, Display, Write as _};

use crate::xml::escape_text;

pub use account::{
    AccountIn, acct_mgr_rpc, acct_mgr_rpc_poll, acct_mgr_rpc_use_config_file, create_account,
    create_account_poll, get_project_config, get_project_config_poll, lookup_account,
    lookup_account_poll, project_attach, project_attach_poll,
};
pub use ops::{ParseOpError, ProjectOp, ResultOp, TransferOp, project_op, result_op, transfer_op};
pub use prefs::set_global_prefs_override;

/// Incremental writer for a command element with child fields.
pub(crate) struct Body {
    tag: &'static str,
    text: String,
}

impl Body {
    pub(crate) fn new(tag: &'static str) -> Self {
        let mut text = String::with_capacity(64);
        text.push('<');
        text.push_str(tag);
        text.push_str(">\n");
        Self { tag, text }
    }

    /// Adds `<name>escaped value</name>`.
    pub(crate) fn text(self, name: &str, value: &str) -> Self {
        self.value(name, escape_text(value))
    }

    /// Adds `<name>value</name>` without escaping; for numbers.
    pub(crate) fn value(mut self, name: &str, value: impl Display) -> Self {
        let _ = writeln!(self.text, "<{name}>{value}</{name}>");
        self
    }

    /// Adds an empty element.
    pub(crate) fn flag(mut self, name: &str) -> Self {
        let _ = writeln!(self.text, "<{name}/>");
        self
    }

    pub(crate) fn finish(mut self) -> String {
        self.text.push_str("</");
        self.text.push_str(self.tag);
        self.text.push('>');
        self.text
    }
}

/// Real number in the core client's `%f` format.
pub(crate) struct Fixed(pub(crate) f64);

impl Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}

fn empty(tag: &str) -> String {
    format!("<{tag}/>")
}

/// `<get_cc_status/>`
#[must_use]
pub fn get_cc_status() -> String {
    empty("get_cc_status")
}

/// `<get_state/>`
#[must_use]
pub fn get_state() -> String {
    empty("get_state")
}

/// Requests tasks; with `active_only` only tasks with an active task block.
#[must_use]
pub fn get_results(active_only: bool) -> String {
    Body::new("get_results")
        .value("active_only", u8::from(active_only))
        .finish()
}

/// `<get_project_status/>`
#[must_use]
pub fn get_project_status() -> String {
    empty("get_project_status")
}

/// `<get_file_transfers/>`
#[must_use]
pub fn get_file_transfers() -> String {
    empty("get_file_transfers")
}

/// `<get_host_info/>`
#[must_use]
pub fn get_host_info() -> String {
    empty("get_host_info")
}

/// `<get_message_count/>`
#[must_use]
pub fn get_message_count() -> String {
    empty("get_message_count")
}

/// Requests event-log messages newer than `seqno`.
#[must_use]
pub fn get_messages(seqno: i32, translatable: bool) -> String {
    let mut body = format!("<get_messages>\n <seqno>{seqno}</seqno>\n");
    if translatable {
        body.push_str(" <translatable/>\n");
    }
    body.push_str("</get_messages>");
    body
}

/// Requests notices newer than `seqno`, including private ones.
#[must_use]
pub fn get_notices(seqno: i32) -> String {
    format!("<get_notices>\n <seqno>{seqno}</seqno>\n</get_notices>")
}

/// Requests public notices newer than `seqno`; allowed before authorization.
#[must_use]
pub fn get_notices_public(seqno: i32) -> String {
    format!("<get_notices_public>\n <seqno>{seqno}</seqno>\n</get_notices_public>")
}

/// `<get_all_projects_list/>`
#[must_use]
pub fn get_all_projects_list() -> String {
    empty("get_all_projects_list")
}

/// Announces this client's version and asks for the core client's.
#[must_use]
pub fn exchange_versions(major: i32, minor: i32, release: i32) -> String {
    Body::new("exchange_versions")
        .value("major", major)
        .value("minor", minor)
        .value("release", release)
        .finish()
}

fn set_mode(tag: &'static str, mode: crate::Mode, duration: f64) -> String {
    Body::new(tag)
        .flag(mode.tag())
        .value("duration", Fixed(duration))
        .finish()
}

/// Sets the task run mode; a positive `duration` reverts after that many seconds.
#[must_use]
pub fn set_run_mode(mode: crate::Mode, duration: f64) -> String {
    set_mode("set_run_mode", mode, duration)
}

/// Sets the GPU mode.
#[must_use]
pub fn set_gpu_mode(mode: crate::Mode, duration: f64) -> String {
    set_mode("set_gpu_mode", mode, duration)
}

/// Sets the network mode.
#[must_use]
pub fn set_network_mode(mode: crate::Mode, duration: f64) -> String {
    set_mode("set_network_mode", mode, duration)
}

/// `<run_benchmarks/>`
#[must_use]
pub fn run_benchmarks() -> String {
    empty("run_benchmarks")
}

/// `<network_available/>`
#[must_use]
pub fn network_available() -> String {
    empty("network_available")
}

/// `<quit/>`
#[must_use]
pub fn quit() -> String {
    empty("quit")
}

/// `<read_cc_config/>`
#[must_use]
pub fn read_cc_config() -> String {
    empty("read_cc_config")
}

/// `<get_global_prefs_working/>`
#[must_use]
pub fn get_global_prefs_working() -> String {
    empty("get_global_prefs_working")
}

/// `<get_global_prefs_override/>`
#[must_use]
pub fn get_global_prefs_override() -> String {
    empty("get_global_prefs_override")
}

/// `<read_global_prefs_override/>`
#[must_use]
pub fn read_global_prefs_override() -> String {
    empty("read_global_prefs_override")
}

/// `<acct_mgr_info/>`
#[must_use]
pub fn acct_mgr_info() -> String {
    empty("acct_mgr_info")
}

/// First half of the authentication handshake.
#[must_use]
pub fn auth1() -> String {
    empty("auth1")
}

/// Second half of the handshake carrying `md5(nonce + password)`.
#[must_use]
pub fn auth2(nonce_hash: &str) -> String {
    Body::new("auth2").text("nonce_hash", nonce_hash).finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mode;

    #[test]
    fn simple_queries_are_empty_elements() {
        assert_eq!(get_cc_status(), "<get_cc_status/>");
        assert_eq!(get_state(), "<get_state/>");
        assert_eq!(get_project_status(), "<get_project_status/>");
        assert_eq!(get_file_transfers(), "<get_file_transfers/>");
        assert_eq!(get_host_info(), "<get_host_info/>");
        assert_eq!(run_benchmarks(), "<run_benchmarks/>");
        assert_eq!(auth1(), "<auth1/>");
    }

    #[test]
    fn get_results_encodes_active_only() {
        assert_eq!(
            get_results(true),
            "<get_results>\n<active_only>1</active_only>\n</get_results>"
        );
        assert_eq!(
            get_results(false),
            "<get_results>\n<active_only>0</active_only>\n</get_results>"
        );
    }

    #[test]
    fn get_messages_optionally_translatable() {
        assert_eq!(
            get_messages(12, false),
            "<get_messages>\n <seqno>12</seqno>\n</get_messages>"
        );
        assert_eq!(
            get_messages(0, true),
            "<get_messages>\n <seqno>0</seqno>\n <translatable/>\n</get_messages>"
        );
    }

    #[test]
    fn notices_carry_seqno() {
        assert_eq!(get_notices(5), "<get_notices>\n <seqno>5</seqno>\n</get_notices>");
        assert_eq!(
            get_notices_public(0),
            "<get_notices_public>\n <seqno>0</seqno>\n</get_notices_public>"
        );
    }

    #[test]
    fn run_mode_commands_carry_mode_and_duration() {
        assert_eq!(
            set_run_mode(Mode::Never, 3600.0),
            "<set_run_mode>\n<never/>\n<duration>3600.000000</duration>\n</set_run_mode>"
        );
        assert_eq!(
            set_network_mode(Mode::Restore, 0.0),
            "<set_network_mode>\n<restore/>\n<duration>0.000000</duration>\n</set_network_mode>"
        );
        assert!(set_gpu_mode(Mode::Auto, 1.5).contains("<auto/>\n<duration>1.500000</duration>"));
    }

    #[test]
    fn auth2_wraps_hash() {
        assert_eq!(
            auth2("0123abcd"),
            "<auth2>\n<nonce_hash>0123abcd</nonce_hash>\n</auth2>"
        );
    }

    #[test]
    fn exchange_versions_lists_components() {
        assert_eq!(
            exchange_versions(7, 24, 1),
            "<exchange_versions>\n<major>7</major>\n<minor>24</minor>\n<release>1</release>\n</exchange_versions>"
        );
    }
}
