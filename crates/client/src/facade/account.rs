use protocol::command::{self, AccountIn};
use protocol::{
    AccountOut, AccountOutDecoder, AcctMgrRpcReply, AcctMgrRpcReplyDecoder, ProjectAttachReply,
    ProjectAttachReplyDecoder, ProjectConfig, ProjectConfigDecoder,
};

use super::RpcClient;
use crate::error::ClientError;

/// Submit-and-poll operations.
///
/// Each submit call returns once the core client has queued the request; the
/// matching poll call reports `error_num == ERR_IN_PROGRESS` until the
/// project server has answered. Pacing the polls is up to the caller.
impl RpcClient {
    /// Queues an account lookup.
    pub fn lookup_account(&self, account: &AccountIn) -> Result<bool, ClientError> {
        self.command(&command::lookup_account(account))
    }

    /// Result of the queued account lookup.
    pub fn lookup_account_poll(&self) -> Result<Option<AccountOut>, ClientError> {
        Ok(self
            .query(&command::lookup_account_poll(), AccountOutDecoder::new())?
            .flatten())
    }

    /// Queues account creation.
    pub fn create_account(&self, account: &AccountIn) -> Result<bool, ClientError> {
        self.command(&command::create_account(account))
    }

    /// Result of the queued account creation.
    pub fn create_account_poll(&self) -> Result<Option<AccountOut>, ClientError> {
        Ok(self
            .query(&command::create_account_poll(), AccountOutDecoder::new())?
            .flatten())
    }

    /// Queues attaching to a project.
    pub fn project_attach(
        &self,
        project_url: &str,
        authenticator: &str,
        project_name: &str,
    ) -> Result<bool, ClientError> {
        self.command(&command::project_attach(project_url, authenticator, project_name))
    }

    /// Progress of the queued attach.
    pub fn project_attach_poll(&self) -> Result<Option<ProjectAttachReply>, ClientError> {
        Ok(self
            .query(&command::project_attach_poll(), ProjectAttachReplyDecoder::new())?
            .flatten())
    }

    /// Queues a fetch of the project's configuration.
    pub fn get_project_config(&self, url: &str) -> Result<bool, ClientError> {
        self.command(&command::get_project_config(url))
    }

    /// The fetched project configuration.
    pub fn get_project_config_poll(&self) -> Result<Option<ProjectConfig>, ClientError> {
        Ok(self
            .query(&command::get_project_config_poll(), ProjectConfigDecoder::new())?
            .flatten())
    }

    /// Queues an account manager attach, or a detach when every argument is empty.
    pub fn acct_mgr_rpc(&self, url: &str, name: &str, password: &str) -> Result<bool, ClientError> {
        self.command(&command::acct_mgr_rpc(url, name, password))
    }

    /// Queues an account manager sync with the stored credentials.
    pub fn acct_mgr_rpc_use_config_file(&self) -> Result<bool, ClientError> {
        self.command(&command::acct_mgr_rpc_use_config_file())
    }

    /// Progress of the queued account manager operation.
    pub fn acct_mgr_rpc_poll(&self) -> Result<Option<AcctMgrRpcReply>, ClientError> {
        Ok(self
            .query(&command::acct_mgr_rpc_poll(), AcctMgrRpcReplyDecoder::new())?
            .flatten())
    }
}
