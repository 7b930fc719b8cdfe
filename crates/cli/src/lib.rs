#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `boinc-rpc` command-line front-end. It parses the
//! connection options and a single command, runs that command through
//! [`client::RpcClient`], and prints the reply as text or, with `--json`,
//! as JSON.
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard output and
//! error so tests can drive it in-process. A [`clap`](https://docs.rs/clap/)
//! command definition recognises the options; everything after them is the
//! command and its operands, parsed by hand so that operation names can be
//! validated with the same parsers the protocol crate exposes.
//!
//! # Invariants
//!
//! - `run` never panics; I/O and protocol failures surface as non-zero exit
//!   codes drawn from [`client::ExitCode`].
//! - Help output is a static snapshot so the wording stays stable.
//! - Library crates only emit tracing events; `run` installs the stderr
//!   subscriber before connecting.
//!
//! # Errors
//!
//! Argument errors exit with code `1`. Connection, authorization, protocol
//! and rejection failures map to the exit code carried by the
//! [`client::ClientError`].
//!
//! # Examples
//!
//! ```
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = cli::run(["boinc-rpc", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(stdout.starts_with(b"boinc-rpc "));
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

mod arguments;
mod execute;
mod render;
mod request;

pub use execute::PASSWORD_ENV_VAR;

use arguments::parse_args;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Deterministic help text describing the supported options and commands.
const HELP_TEXT: &str = concat!(
    "boinc-rpc: control a BOINC core client over GUI-RPC\n",
    "\n",
    "Usage: boinc-rpc [OPTIONS] COMMAND [ARGS...]\n",
    "\n",
    "Options:\n",
    "  -h, --help               Show this help message and exit.\n",
    "  -V, --version            Output version information and exit.\n",
    "      --host HOST[:PORT]   Core client host (default localhost).\n",
    "      --port PORT          GUI-RPC port (default 31416).\n",
    "      --unix PATH          Connect to a Unix-domain socket instead of TCP.\n",
    "      --passwd PASSWORD    GUI-RPC password.\n",
    "      --passwd-file FILE   Read the password from FILE.\n",
    "      --timeout SECONDS    Reply timeout; 0 waits forever (default 15).\n",
    "      --json               Print replies as JSON.\n",
    "  -v, --verbose            Log protocol activity to stderr; repeat for more.\n",
    "\n",
    "Without a password option the password is taken from BOINC_RPC_PASSWORD\n",
    "or from gui_rpc_auth.cfg in the current directory.\n",
    "\n",
    "Queries:\n",
    "  get_state                        Full client state.\n",
    "  get_tasks | get_active_tasks     Tasks, optionally only active ones.\n",
    "  get_project_status               Attached projects.\n",
    "  get_file_transfers               Pending file transfers.\n",
    "  get_messages [SEQNO]             Event-log messages after SEQNO.\n",
    "  get_message_count                Highest message sequence number.\n",
    "  get_notices [SEQNO]              Notices after SEQNO.\n",
    "  get_cc_status                    Run, GPU and network modes.\n",
    "  get_host_info                    Host hardware and OS.\n",
    "  get_global_prefs_override        Override preferences.\n",
    "  get_global_prefs_working         Preferences in effect.\n",
    "  client_version                   Core client version.\n",
    "\n",
    "Control:\n",
    "  set_run_mode MODE [DURATION]     MODE is always, auto, never or restore.\n",
    "  set_gpu_mode MODE [DURATION]\n",
    "  set_network_mode MODE [DURATION]\n",
    "  project URL OP                   OP is reset, detach, update, suspend,\n",
    "                                   resume, nomorework, allowmorework,\n",
    "                                   detach_when_done or dont_detach_when_done.\n",
    "  task URL NAME OP                 OP is abort, suspend or resume.\n",
    "  file_transfer URL NAME OP        OP is retry or abort.\n",
    "  run_benchmarks\n",
    "  network_available\n",
    "  read_cc_config\n",
    "  read_global_prefs_override\n",
    "  quit\n",
);

/// Writes `boinc-rpc: message` to `stderr`, ignoring write failures.
fn report_error<W: Write>(stderr: &mut W, message: &str) {
    let _ = writeln!(stderr, "boinc-rpc: {message}");
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned.
#[allow(clippy::module_name_repetitions)]
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute::execute(parsed, stdout, stderr),
        Err(error) => {
            let rendered = error.to_string();
            report_error(stderr, rendered.trim_start_matches("error: ").trim_end());
            client::ExitCode::Syntax.as_i32()
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(u8::try_from(clamped).unwrap_or(u8::MAX))
}
