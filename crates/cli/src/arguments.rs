use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser, value_parser};

/// Options and command words recognised by [`parse_args`].
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs {
    pub(crate) show_help: bool,
    pub(crate) show_version: bool,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) unix_socket: Option<PathBuf>,
    pub(crate) password: Option<String>,
    pub(crate) password_file: Option<PathBuf>,
    pub(crate) timeout: Option<u64>,
    pub(crate) json: bool,
    pub(crate) verbosity: u8,
    pub(crate) command: Vec<OsString>,
}

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    let command = Command::new("boinc-rpc")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST[:PORT]")
                .help("Core client host name or address.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("GUI-RPC port of the core client.")
                .value_parser(value_parser!(u16))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("passwd")
                .long("passwd")
                .value_name("PASSWORD")
                .help("GUI-RPC password.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("passwd-file")
                .long("passwd-file")
                .value_name("FILE")
                .help("Read the GUI-RPC password from FILE.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("Reply timeout in seconds (0 waits forever).")
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print replies as JSON.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log protocol activity to stderr; repeat for more detail.")
                .action(ArgAction::Count),
        );

    #[cfg(unix)]
    let command = command.arg(
        Arg::new("unix")
            .long("unix")
            .value_name("PATH")
            .help("Connect to the Unix-domain socket at PATH.")
            .value_parser(OsStringValueParser::new())
            .conflicts_with_all(["host", "port"])
            .action(ArgAction::Set),
    );

    command.arg(
        Arg::new("command")
            .action(ArgAction::Append)
            .num_args(0..)
            .allow_hyphen_values(true)
            .trailing_var_arg(true)
            .value_parser(OsStringValueParser::new()),
    )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
pub(crate) fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("boinc-rpc"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    #[cfg(unix)]
    let unix_socket = matches.remove_one::<OsString>("unix").map(PathBuf::from);
    #[cfg(not(unix))]
    let unix_socket = None;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        host: matches.remove_one::<String>("host"),
        port: matches.remove_one::<u16>("port"),
        unix_socket,
        password: matches.remove_one::<String>("passwd"),
        password_file: matches
            .remove_one::<OsString>("passwd-file")
            .map(PathBuf::from),
        timeout: matches.remove_one::<u64>("timeout"),
        json: matches.get_flag("json"),
        verbosity: matches.get_count("verbose"),
        command: matches
            .remove_many::<OsString>("command")
            .map(Iterator::collect)
            .unwrap_or_default(),
    })
}

/// Splits `host:port` when the suffix is a port number.
///
/// Bracketed IPv6 literals (`[::1]:31416`) are unwrapped; a bare IPv6
/// literal is returned unchanged because its last group is ambiguous.
pub(crate) fn split_host_port(host: &str) -> (String, Option<u16>) {
    if let Some(rest) = host.strip_prefix('[') {
        if let Some((address, tail)) = rest.split_once(']') {
            let port = tail.strip_prefix(':').and_then(|port| port.parse().ok());
            return (address.to_owned(), port);
        }
    }

    match host.split_once(':') {
        Some((name, port)) if !port.contains(':') => match port.parse() {
            Ok(port) => (name.to_owned(), Some(port)),
            Err(_) => (host.to_owned(), None),
        },
        _ => (host.to_owned(), None),
    }
}
