use std::fmt;

use super::{App, AppVersion, Workunit};

/// Coarse lifecycle state of a task.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResultState {
    #[default]
    New,
    FilesDownloading,
    FilesDownloaded,
    ComputeError,
    FilesUploading,
    FilesUploaded,
    Aborted,
    UploadFailed,
    /// A state code this library does not know.
    Unknown(i32),
}

impl ResultState {
    /// Wire code of the state.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::New => 0,
            Self::FilesDownloading => 1,
            Self::FilesDownloaded => 2,
            Self::ComputeError => 3,
            Self::FilesUploading => 4,
            Self::FilesUploaded => 5,
            Self::Aborted => 6,
            Self::UploadFailed => 7,
            Self::Unknown(code) => code,
        }
    }
}

impl From<i32> for ResultState {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::New,
            1 => Self::FilesDownloading,
            2 => Self::FilesDownloaded,
            3 => Self::ComputeError,
            4 => Self::FilesUploading,
            5 => Self::FilesUploaded,
            6 => Self::Aborted,
            7 => Self::UploadFailed,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::FilesDownloading => f.write_str("downloading"),
            Self::FilesDownloaded => f.write_str("ready to run"),
            Self::ComputeError => f.write_str("computation error"),
            Self::FilesUploading => f.write_str("uploading"),
            Self::FilesUploaded => f.write_str("ready to report"),
            Self::Aborted => f.write_str("aborted"),
            Self::UploadFailed => f.write_str("upload failed"),
            Self::Unknown(code) => write!(f, "state {code}"),
        }
    }
}

/// Execution state of a task that is currently scheduled locally.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActiveTaskState {
    #[default]
    Uninitialized,
    Executing,
    Exited,
    WasSignaled,
    ExitUnknown,
    AbortPending,
    Aborted,
    CouldntStart,
    QuitPending,
    Suspended,
    CopyPending,
    /// A state code this library does not know.
    Unknown(i32),
}

impl ActiveTaskState {
    /// Wire code of the state.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Uninitialized => 0,
            Self::Executing => 1,
            Self::Exited => 2,
            Self::WasSignaled => 3,
            Self::ExitUnknown => 4,
            Self::AbortPending => 5,
            Self::Aborted => 6,
            Self::CouldntStart => 7,
            Self::QuitPending => 8,
            Self::Suspended => 9,
            Self::CopyPending => 10,
            Self::Unknown(code) => code,
        }
    }
}

impl From<i32> for ActiveTaskState {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Uninitialized,
            1 => Self::Executing,
            2 => Self::Exited,
            3 => Self::WasSignaled,
            4 => Self::ExitUnknown,
            5 => Self::AbortPending,
            6 => Self::Aborted,
            7 => Self::CouldntStart,
            8 => Self::QuitPending,
            9 => Self::Suspended,
            10 => Self::CopyPending,
            other => Self::Unknown(other),
        }
    }
}

/// Live telemetry of a running task.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ActiveTask {
    pub active_task_state: ActiveTaskState,
    pub app_version_num: i32,
    pub slot: i32,
    pub pid: i32,
    pub scheduler_state: i32,
    pub checkpoint_cpu_time: f64,
    pub current_cpu_time: f64,
    pub fraction_done: f64,
    pub elapsed_time: f64,
    pub swap_size: f64,
    pub working_set_size_smoothed: f64,
    pub too_large: bool,
    pub needs_shmem: bool,
    pub edf_scheduled: bool,
    pub graphics_exec_path: String,
    pub slot_path: String,
}

/// A task (a result in core-client terms).
///
/// `active` is present only while the task is scheduled to run. The resolved
/// `workunit`, `app` and `app_version` are filled in by the full-state
/// decoder; they stay `None` in plain task lists and when a lookup fails.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TaskResult {
    pub name: String,
    pub wu_name: String,
    pub project_url: String,
    pub version_num: i32,
    pub plan_class: String,
    pub ready_to_report: bool,
    pub got_server_ack: bool,
    pub final_cpu_time: f64,
    pub final_elapsed_time: f64,
    pub state: ResultState,
    pub exit_status: i32,
    pub signal: i32,
    pub stderr_out: String,
    pub suspended_via_gui: bool,
    pub project_suspended_via_gui: bool,
    pub coproc_missing: bool,
    pub gpu_mem_wait: bool,
    pub report_deadline: f64,
    pub received_time: f64,
    pub estimated_cpu_time_remaining: f64,
    pub completed_time: f64,
    pub resources: String,
    pub active: Option<ActiveTask>,
    pub workunit: Option<Workunit>,
    pub app: Option<App>,
    pub app_version: Option<AppVersion>,
}

impl TaskResult {
    /// Version number of the app that runs this task.
    ///
    /// Older clients leave `<version_num>` out of results, in which case the
    /// active task's `app_version_num` is used.
    #[must_use]
    pub fn effective_version_num(&self) -> i32 {
        match (&self.active, self.version_num) {
            (Some(active), 0) => active.app_version_num,
            (_, version) => version,
        }
    }

    /// Fraction done, zero while the task is not active.
    #[must_use]
    pub fn fraction_done(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |active| active.fraction_done)
    }

    /// Returns `true` while the task is scheduled to run.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_state_codes_round_trip() {
        for code in 0..=7 {
            assert_eq!(ResultState::from(code).code(), code);
        }
        assert_eq!(ResultState::from(42), ResultState::Unknown(42));
    }

    #[test]
    fn active_task_state_codes_round_trip() {
        for code in 0..=10 {
            assert_eq!(ActiveTaskState::from(code).code(), code);
        }
        assert_eq!(ActiveTaskState::from(-1), ActiveTaskState::Unknown(-1));
    }

    #[test]
    fn effective_version_falls_back_to_active_task() {
        let mut task = TaskResult {
            active: Some(ActiveTask {
                app_version_num: 612,
                ..ActiveTask::default()
            }),
            ..TaskResult::default()
        };
        assert_eq!(task.effective_version_num(), 612);
        task.version_num = 700;
        assert_eq!(task.effective_version_num(), 700);
    }
}
