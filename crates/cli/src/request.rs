use std::ffi::OsString;
use std::fmt;

use client::{Mode, ProjectOp, ResultOp, TransferOp};

/// Which of the three scheduling modes a `set_*_mode` command changes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ModeKind {
    Run,
    Gpu,
    Network,
}

/// A single operation requested on the command line.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Request {
    GetState,
    GetTasks { active_only: bool },
    GetProjectStatus,
    GetFileTransfers,
    GetMessages { seqno: i32 },
    GetMessageCount,
    GetNotices { seqno: i32 },
    GetCcStatus,
    GetHostInfo,
    GetGlobalPrefsOverride,
    GetGlobalPrefsWorking,
    ClientVersion,
    SetMode { kind: ModeKind, mode: Mode, duration: f64 },
    Project { url: String, op: ProjectOp },
    Task { url: String, name: String, op: ResultOp },
    FileTransfer { url: String, name: String, op: TransferOp },
    RunBenchmarks,
    NetworkAvailable,
    ReadCcConfig,
    ReadGlobalPrefsOverride,
    Quit,
}

/// Problem with the command words; reported with exit code 1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct UsageError(String);

impl UsageError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cursor over the command words that names the command in its errors.
struct Words<'a> {
    command: &'a str,
    rest: std::slice::Iter<'a, String>,
}

impl<'a> Words<'a> {
    fn required(&mut self, what: &str) -> Result<&'a str, UsageError> {
        self.rest
            .next()
            .map(String::as_str)
            .ok_or_else(|| UsageError::new(format!("{} requires {what}", self.command)))
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.rest.next().map(String::as_str)
    }

    fn finish(mut self) -> Result<(), UsageError> {
        match self.rest.next() {
            Some(extra) => Err(UsageError::new(format!(
                "unexpected argument '{extra}' after {}",
                self.command
            ))),
            None => Ok(()),
        }
    }
}

impl Request {
    /// Parses the words following the options.
    pub(crate) fn parse(words: &[OsString]) -> Result<Self, UsageError> {
        let words = words
            .iter()
            .map(|word| {
                word.to_str()
                    .map(str::to_owned)
                    .ok_or_else(|| UsageError::new(format!("argument {word:?} is not valid UTF-8")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let Some((command, rest)) = words.split_first() else {
            return Err(UsageError::new("no command given"));
        };
        // `--get_state` is accepted as a spelling of `get_state`.
        let name = command.trim_start_matches('-');
        let mut words = Words {
            command: name,
            rest: rest.iter(),
        };

        let request = match name {
            "get_state" => Self::GetState,
            "get_tasks" | "get_results" => Self::GetTasks { active_only: false },
            "get_active_tasks" => Self::GetTasks { active_only: true },
            "get_project_status" => Self::GetProjectStatus,
            "get_file_transfers" => Self::GetFileTransfers,
            "get_messages" => Self::GetMessages {
                seqno: seqno(words.optional())?,
            },
            "get_message_count" => Self::GetMessageCount,
            "get_notices" => Self::GetNotices {
                seqno: seqno(words.optional())?,
            },
            "get_cc_status" => Self::GetCcStatus,
            "get_host_info" => Self::GetHostInfo,
            "get_global_prefs_override" => Self::GetGlobalPrefsOverride,
            "get_global_prefs_working" => Self::GetGlobalPrefsWorking,
            "client_version" => Self::ClientVersion,
            "set_run_mode" => set_mode(ModeKind::Run, &mut words)?,
            "set_gpu_mode" => set_mode(ModeKind::Gpu, &mut words)?,
            "set_network_mode" => set_mode(ModeKind::Network, &mut words)?,
            "project" => {
                let url = words.required("a project URL")?.to_owned();
                let op = words
                    .required("an operation")?
                    .parse::<ProjectOp>()
                    .map_err(|error| UsageError::new(error.to_string()))?;
                Self::Project { url, op }
            }
            "task" => {
                let url = words.required("a project URL")?.to_owned();
                let name = words.required("a task name")?.to_owned();
                let op = words
                    .required("an operation")?
                    .parse::<ResultOp>()
                    .map_err(|error| UsageError::new(error.to_string()))?;
                Self::Task { url, name, op }
            }
            "file_transfer" => {
                let url = words.required("a project URL")?.to_owned();
                let name = words.required("a file name")?.to_owned();
                let op = words
                    .required("an operation")?
                    .parse::<TransferOp>()
                    .map_err(|error| UsageError::new(error.to_string()))?;
                Self::FileTransfer { url, name, op }
            }
            "run_benchmarks" => Self::RunBenchmarks,
            "network_available" => Self::NetworkAvailable,
            "read_cc_config" => Self::ReadCcConfig,
            "read_global_prefs_override" => Self::ReadGlobalPrefsOverride,
            "quit" => Self::Quit,
            other => return Err(UsageError::new(format!("unknown command '{other}'"))),
        };

        words.finish()?;
        Ok(request)
    }

    /// Whether the request only reads state.
    pub(crate) const fn is_query(&self) -> bool {
        matches!(
            self,
            Self::GetState
                | Self::GetTasks { .. }
                | Self::GetProjectStatus
                | Self::GetFileTransfers
                | Self::GetMessages { .. }
                | Self::GetMessageCount
                | Self::GetNotices { .. }
                | Self::GetCcStatus
                | Self::GetHostInfo
                | Self::GetGlobalPrefsOverride
                | Self::GetGlobalPrefsWorking
                | Self::ClientVersion
        )
    }
}

fn seqno(word: Option<&str>) -> Result<i32, UsageError> {
    word.map_or(Ok(0), |word| {
        word.parse()
            .map_err(|_| UsageError::new(format!("invalid sequence number '{word}'")))
    })
}

fn set_mode(kind: ModeKind, words: &mut Words<'_>) -> Result<Request, UsageError> {
    let mode = words
        .required("a mode")?
        .parse::<Mode>()
        .map_err(|error| UsageError::new(error.to_string()))?;
    let duration = match words.optional() {
        Some(word) => match word.parse::<f64>() {
            Ok(duration) if duration.is_finite() && duration >= 0.0 => duration,
            _ => return Err(UsageError::new(format!("invalid duration '{word}'"))),
        },
        None => 0.0,
    };
    Ok(Request::SetMode {
        kind,
        mode,
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(words: &[&str]) -> Result<Request, UsageError> {
        let words: Vec<OsString> = words.iter().map(OsString::from).collect();
        Request::parse(&words)
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse(&["get_state"]), Ok(Request::GetState));
        assert_eq!(parse(&["--get_cc_status"]), Ok(Request::GetCcStatus));
        assert_eq!(parse(&["get_tasks"]), Ok(Request::GetTasks { active_only: false }));
        assert_eq!(parse(&["quit"]), Ok(Request::Quit));
    }

    #[test]
    fn sequence_numbers_default_to_zero() {
        assert_eq!(parse(&["get_messages"]), Ok(Request::GetMessages { seqno: 0 }));
        assert_eq!(parse(&["get_notices", "17"]), Ok(Request::GetNotices { seqno: 17 }));
        assert_eq!(
            parse(&["get_messages", "ten"]),
            Err(UsageError::new("invalid sequence number 'ten'"))
        );
    }

    #[test]
    fn set_mode_takes_optional_duration() {
        assert_eq!(
            parse(&["set_run_mode", "never", "3600"]),
            Ok(Request::SetMode {
                kind: ModeKind::Run,
                mode: Mode::Never,
                duration: 3600.0,
            })
        );
        assert_eq!(
            parse(&["set_network_mode", "auto"]),
            Ok(Request::SetMode {
                kind: ModeKind::Network,
                mode: Mode::Auto,
                duration: 0.0,
            })
        );
        assert!(parse(&["set_gpu_mode", "sometimes"]).is_err());
        assert!(parse(&["set_gpu_mode", "never", "-5"]).is_err());
    }

    #[test]
    fn operations_name_their_target() {
        assert_eq!(
            parse(&["project", "http://x/", "nomorework"]),
            Ok(Request::Project {
                url: "http://x/".to_owned(),
                op: ProjectOp::NoMoreWork,
            })
        );
        assert_eq!(
            parse(&["task", "http://x/", "wu_1_0", "abort"]),
            Ok(Request::Task {
                url: "http://x/".to_owned(),
                name: "wu_1_0".to_owned(),
                op: ResultOp::Abort,
            })
        );
        assert_eq!(
            parse(&["file_transfer", "http://x/", "out_0", "retry"]),
            Ok(Request::FileTransfer {
                url: "http://x/".to_owned(),
                name: "out_0".to_owned(),
                op: TransferOp::Retry,
            })
        );
    }

    #[test]
    fn usage_errors_describe_the_problem() {
        assert_eq!(parse(&[]), Err(UsageError::new("no command given")));
        assert_eq!(
            parse(&["project", "http://x/"]),
            Err(UsageError::new("project requires an operation"))
        );
        assert_eq!(
            parse(&["get_state", "extra"]),
            Err(UsageError::new("unexpected argument 'extra' after get_state"))
        );
        assert_eq!(
            parse(&["frobnicate"]),
            Err(UsageError::new("unknown command 'frobnicate'"))
        );
        assert_eq!(
            parse(&["project", "http://x/", "explode"]),
            Err(UsageError::new("unknown project operation 'explode'"))
        );
    }

    #[test]
    fn queries_are_distinguished_from_commands() {
        assert!(Request::GetState.is_query());
        assert!(!Request::Quit.is_query());
    }
}
