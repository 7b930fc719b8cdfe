use protocol::{
    AcctMgrInfo, AcctMgrInfoDecoder, AllProjectsDecoder, AllProjectsList, CcState,
    CcStateDecoder, CcStatus, CcStatusDecoder, GlobalPreferences, GlobalPrefsDecoder, HostInfo,
    HostInfoDecoder, Message, MessageCountDecoder, MessagesDecoder, Notice, NoticesDecoder,
    Project, ProjectsDecoder, ResultsDecoder, TaskResult, Transfer, TransfersDecoder, VersionDecoder,
    VersionInfo, command,
};

use super::RpcClient;
use crate::error::ClientError;

impl RpcClient {
    /// Run, GPU and network modes plus suspend reasons.
    pub fn get_cc_status(&self) -> Result<Option<CcStatus>, ClientError> {
        Ok(self.query(&command::get_cc_status(), CcStatusDecoder::new())?.flatten())
    }

    /// Full snapshot with every task joined to its workunit, app and app version.
    pub fn get_state(&self) -> Result<Option<CcState>, ClientError> {
        let state = self.query(&command::get_state(), CcStateDecoder::new())?;
        if let Some(state) = &state {
            logging::trace_rpc!(
                "get_state: {} projects, {} tasks",
                state.projects.len(),
                state.results.len()
            );
        }
        Ok(state)
    }

    /// Tasks, optionally only those with an active task.
    pub fn get_results(&self, active_only: bool) -> Result<Vec<TaskResult>, ClientError> {
        Ok(self
            .query(&command::get_results(active_only), ResultsDecoder::new())?
            .unwrap_or_default())
    }

    /// Attached projects.
    pub fn get_project_status(&self) -> Result<Vec<Project>, ClientError> {
        Ok(self
            .query(&command::get_project_status(), ProjectsDecoder::new())?
            .unwrap_or_default())
    }

    /// Pending uploads and downloads.
    pub fn get_file_transfers(&self) -> Result<Vec<Transfer>, ClientError> {
        Ok(self
            .query(&command::get_file_transfers(), TransfersDecoder::new())?
            .unwrap_or_default())
    }

    /// Hardware and OS description of the host.
    pub fn get_host_info(&self) -> Result<Option<HostInfo>, ClientError> {
        Ok(self.query(&command::get_host_info(), HostInfoDecoder::new())?.flatten())
    }

    /// Sequence number of the newest event-log message.
    pub fn get_message_count(&self) -> Result<Option<i32>, ClientError> {
        Ok(self
            .query(&command::get_message_count(), MessageCountDecoder::new())?
            .flatten())
    }

    /// Event-log messages with a sequence number above `seqno`.
    pub fn get_messages(&self, seqno: i32, translatable: bool) -> Result<Vec<Message>, ClientError> {
        Ok(self
            .query(&command::get_messages(seqno, translatable), MessagesDecoder::new())?
            .unwrap_or_default())
    }

    /// Notices with a sequence number above `seqno`.
    pub fn get_notices(&self, seqno: i32) -> Result<Vec<Notice>, ClientError> {
        Ok(self
            .query(&command::get_notices(seqno), NoticesDecoder::new())?
            .unwrap_or_default())
    }

    /// Public notices with a sequence number above `seqno`.
    pub fn get_notices_public(&self, seqno: i32) -> Result<Vec<Notice>, ClientError> {
        Ok(self
            .query(&command::get_notices_public(seqno), NoticesDecoder::new())?
            .unwrap_or_default())
    }

    /// Projects and account managers known to the core client.
    pub fn get_all_projects_list(&self) -> Result<Option<AllProjectsList>, ClientError> {
        self.query(&command::get_all_projects_list(), AllProjectsDecoder::new())
    }

    /// Exchanges version numbers with the core client and returns its version.
    pub fn exchange_versions(
        &self,
        major: i32,
        minor: i32,
        release: i32,
    ) -> Result<Option<VersionInfo>, ClientError> {
        Ok(self
            .query(&command::exchange_versions(major, minor, release), VersionDecoder::new())?
            .flatten())
    }

    /// Preferences currently in effect.
    pub fn get_global_prefs_working(&self) -> Result<Option<GlobalPreferences>, ClientError> {
        Ok(self
            .query(&command::get_global_prefs_working(), GlobalPrefsDecoder::new())?
            .flatten())
    }

    /// Contents of the local override file.
    pub fn get_global_prefs_override(&self) -> Result<Option<GlobalPreferences>, ClientError> {
        Ok(self
            .query(&command::get_global_prefs_override(), GlobalPrefsDecoder::new())?
            .flatten())
    }

    /// Account manager the core client is attached to.
    pub fn acct_mgr_info(&self) -> Result<Option<AcctMgrInfo>, ClientError> {
        Ok(self.query(&command::acct_mgr_info(), AcctMgrInfoDecoder::new())?.flatten())
    }
}
