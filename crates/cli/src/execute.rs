use std::env;
use std::io::Write;
use std::path::Path;

use client::{
    ClientConfig, ClientError, DEFAULT_PORT, ExitCode, PASSWORD_FILE_NAME, Password, RpcAddress,
    RpcClient, TimeoutConfig, read_password_file,
};
use logging::Verbosity;

use crate::arguments::{ParsedArgs, split_host_port};
use crate::render::{Outcome, write_text};
use crate::request::{ModeKind, Request};
use crate::{HELP_TEXT, report_error};

/// Environment variable consulted when no password option is given.
pub const PASSWORD_ENV_VAR: &str = "BOINC_RPC_PASSWORD";

const DEFAULT_HOST: &str = "localhost";

/// Runs a parsed command line and returns the process exit code.
pub(crate) fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return match stdout.write_all(HELP_TEXT.as_bytes()) {
            Ok(()) => 0,
            Err(_) => ExitCode::LocalIo.as_i32(),
        };
    }

    if parsed.show_version {
        return match writeln!(stdout, "boinc-rpc {}", env!("CARGO_PKG_VERSION")) {
            Ok(()) => 0,
            Err(_) => ExitCode::LocalIo.as_i32(),
        };
    }

    let request = match Request::parse(&parsed.command) {
        Ok(request) => request,
        Err(error) => {
            report_error(stderr, &error.to_string());
            return ExitCode::Syntax.as_i32();
        }
    };

    if parsed.json && !cfg!(feature = "json") {
        report_error(stderr, "--json is not available in this build");
        return ExitCode::Syntax.as_i32();
    }

    logging::init_tracing(Verbosity::from_count(parsed.verbosity));

    match perform(&parsed, &request) {
        Ok(outcome) => match print(&outcome, parsed.json, stdout) {
            Ok(()) => 0,
            Err(error) => {
                report_error(stderr, &format!("failed to write output: {error}"));
                ExitCode::LocalIo.as_i32()
            }
        },
        Err(error) => {
            report_error(stderr, error.message());
            error.exit_code()
        }
    }
}

fn print<W: Write>(outcome: &Outcome, json: bool, out: &mut W) -> std::io::Result<()> {
    #[cfg(feature = "json")]
    {
        if json {
            return crate::render::write_json(outcome, out);
        }
    }
    #[cfg(not(feature = "json"))]
    let _ = json;

    write_text(outcome, out)
}

fn perform(parsed: &ParsedArgs, request: &Request) -> Result<Outcome, ClientError> {
    let config = client_config(parsed)?;
    if config.password().is_none() && !request.is_query() {
        logging::trace_rpc!(warn, "no GUI-RPC password configured; the core client may refuse this request");
    }

    let client = RpcClient::new(config);
    client.open()?;
    let outcome = dispatch(&client, request);
    client.close();
    outcome
}

fn client_config(parsed: &ParsedArgs) -> Result<ClientConfig, ClientError> {
    let mut timeouts = TimeoutConfig::default();
    if let Some(seconds) = parsed.timeout {
        timeouts = timeouts.with_io_timeout(seconds);
    }

    let mut builder = ClientConfig::builder()
        .address(address(parsed))
        .timeouts(timeouts);
    if let Some(password) = resolve_password(parsed)? {
        builder = builder.password(password);
    }
    Ok(builder.build())
}

fn address(parsed: &ParsedArgs) -> RpcAddress {
    #[cfg(unix)]
    if let Some(path) = &parsed.unix_socket {
        return RpcAddress::Unix(path.clone());
    }

    let (host, embedded_port) = split_host_port(parsed.host.as_deref().unwrap_or(DEFAULT_HOST));
    let port = parsed.port.or(embedded_port).unwrap_or(DEFAULT_PORT);
    RpcAddress::tcp(host, port)
}

/// Picks the password from `--passwd`, `--passwd-file`, the environment, or
/// `gui_rpc_auth.cfg` in the working directory, in that order.
fn resolve_password(parsed: &ParsedArgs) -> Result<Option<Password>, ClientError> {
    if let Some(password) = &parsed.password {
        return Ok(Some(Password::new(password.as_str())));
    }

    if let Some(path) = &parsed.password_file {
        return read_password(path).map(Some);
    }

    if let Some(password) = env::var_os(PASSWORD_ENV_VAR).and_then(|value| value.into_string().ok()) {
        if !password.is_empty() {
            return Ok(Some(Password::new(password)));
        }
    }

    let default_file = Path::new(PASSWORD_FILE_NAME);
    if default_file.is_file() {
        return read_password(default_file).map(Some);
    }
    Ok(None)
}

fn read_password(path: &Path) -> Result<Password, ClientError> {
    read_password_file(path).map_err(|error| {
        ClientError::new(
            ExitCode::LocalIo,
            format!("failed to read password file {}: {error}", path.display()),
        )
    })
}

fn dispatch(client: &RpcClient, request: &Request) -> Result<Outcome, ClientError> {
    let outcome = match request {
        Request::GetState => Outcome::State(Box::new(present(client.get_state()?)?)),
        Request::GetTasks { active_only } => Outcome::Tasks(client.get_results(*active_only)?),
        Request::GetProjectStatus => Outcome::Projects(client.get_project_status()?),
        Request::GetFileTransfers => Outcome::Transfers(client.get_file_transfers()?),
        Request::GetMessages { seqno } => Outcome::Messages(client.get_messages(*seqno, false)?),
        Request::GetMessageCount => Outcome::MessageCount {
            message_count: present(client.get_message_count()?)?,
        },
        Request::GetNotices { seqno } => Outcome::Notices(client.get_notices(*seqno)?),
        Request::GetCcStatus => Outcome::Status(present(client.get_cc_status()?)?),
        Request::GetHostInfo => Outcome::Host(present(client.get_host_info()?)?),
        Request::GetGlobalPrefsOverride => {
            Outcome::Preferences(present(client.get_global_prefs_override()?)?)
        }
        Request::GetGlobalPrefsWorking => {
            Outcome::Preferences(present(client.get_global_prefs_working()?)?)
        }
        Request::ClientVersion => {
            let (major, minor, release) = own_version();
            Outcome::Version(present(client.exchange_versions(major, minor, release)?)?)
        }
        Request::SetMode {
            kind,
            mode,
            duration,
        } => accepted(
            client,
            match kind {
                ModeKind::Run => client.set_run_mode(*mode, *duration)?,
                ModeKind::Gpu => client.set_gpu_mode(*mode, *duration)?,
                ModeKind::Network => client.set_network_mode(*mode, *duration)?,
            },
        )?,
        Request::Project { url, op } => accepted(client, client.project_op(*op, url)?)?,
        Request::Task { url, name, op } => accepted(client, client.result_op(*op, url, name)?)?,
        Request::FileTransfer { url, name, op } => {
            accepted(client, client.transfer_op(*op, url, name)?)?
        }
        Request::RunBenchmarks => accepted(client, client.run_benchmarks()?)?,
        Request::NetworkAvailable => accepted(client, client.network_available()?)?,
        Request::ReadCcConfig => accepted(client, client.read_cc_config()?)?,
        Request::ReadGlobalPrefsOverride => accepted(client, client.read_global_prefs_override()?)?,
        Request::Quit => accepted(client, client.quit()?)?,
    };
    Ok(outcome)
}

fn present<T>(reply: Option<T>) -> Result<T, ClientError> {
    reply.ok_or_else(|| {
        ClientError::new(
            ExitCode::Protocol,
            "the core client sent a reply that could not be decoded",
        )
    })
}

fn accepted(client: &RpcClient, success: bool) -> Result<Outcome, ClientError> {
    if success {
        Ok(Outcome::Done { success })
    } else {
        let message = client
            .last_error()
            .unwrap_or_else(|| "request failed".to_owned());
        Err(ClientError::new(ExitCode::Rejected, message))
    }
}

fn own_version() -> (i32, i32, i32) {
    let component = |text: &str| text.parse().unwrap_or(0);
    (
        component(env!("CARGO_PKG_VERSION_MAJOR")),
        component(env!("CARGO_PKG_VERSION_MINOR")),
        component(env!("CARGO_PKG_VERSION_PATCH")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_defaults_to_local_core_client() {
        let parsed = ParsedArgs::default();
        assert_eq!(address(&parsed), RpcAddress::tcp("localhost", DEFAULT_PORT));
    }

    #[test]
    fn explicit_port_beats_host_suffix() {
        let parsed = ParsedArgs {
            host: Some("node7:4000".to_owned()),
            ..ParsedArgs::default()
        };
        assert_eq!(address(&parsed), RpcAddress::tcp("node7", 4000));

        let parsed = ParsedArgs {
            host: Some("node7:4000".to_owned()),
            port: Some(5000),
            ..ParsedArgs::default()
        };
        assert_eq!(address(&parsed), RpcAddress::tcp("node7", 5000));
    }

    #[test]
    fn password_option_wins_over_file() {
        let parsed = ParsedArgs {
            password: Some("from-option".to_owned()),
            password_file: Some("/nonexistent/gui_rpc_auth.cfg".into()),
            ..ParsedArgs::default()
        };
        let password = resolve_password(&parsed).expect("resolve").expect("present");
        assert_eq!(password.expose(), "from-option");
    }

    #[test]
    fn password_file_is_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("auth.cfg");
        std::fs::write(&path, "s3cret\n").expect("write");

        let parsed = ParsedArgs {
            password_file: Some(path),
            ..ParsedArgs::default()
        };
        let password = resolve_password(&parsed).expect("resolve").expect("present");
        assert_eq!(password.expose(), "s3cret");
    }

    #[test]
    fn missing_password_file_is_a_local_error() {
        let parsed = ParsedArgs {
            password_file: Some("/nonexistent/auth.cfg".into()),
            ..ParsedArgs::default()
        };
        let error = resolve_password(&parsed).expect_err("missing file");
        assert_eq!(error.code(), ExitCode::LocalIo);
        assert!(error.message().contains("/nonexistent/auth.cfg"));
    }

    #[test]
    fn own_version_matches_package() {
        let (major, minor, release) = own_version();
        assert_eq!(
            format!("{major}.{minor}.{release}"),
            env!("CARGO_PKG_VERSION").split('-').next().unwrap_or_default()
        );
    }
}
