/// Reply to `lookup_account_poll` and `create_account_poll`.
///
/// `error_num` is `ERR_IN_PROGRESS` (-204) while the core client is still
/// talking to the project server.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AccountOut {
    pub error_num: i32,
    pub error_msg: String,
    pub authenticator: String,
}

/// Reply to `project_attach_poll`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProjectAttachReply {
    pub error_num: i32,
    pub messages: Vec<String>,
}

/// Reply to `acct_mgr_rpc_poll`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AcctMgrRpcReply {
    pub error_num: i32,
    pub messages: Vec<String>,
}

/// Reply to `acct_mgr_info`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AcctMgrInfo {
    pub acct_mgr_url: String,
    pub acct_mgr_name: String,
    pub have_credentials: bool,
    pub cookie_required: bool,
    pub cookie_failure_url: String,
}

impl AcctMgrInfo {
    /// Returns `true` when the client is attached to an account manager.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.acct_mgr_url.is_empty()
    }
}

/// Reply to `get_project_config_poll`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProjectConfig {
    pub error_num: i32,
    pub error_msg: String,
    pub name: String,
    pub master_url: String,
    pub web_rpc_url_base: String,
    pub local_revision: String,
    pub min_passwd_length: i32,
    pub account_manager: bool,
    pub uses_username: bool,
    pub account_creation_disabled: bool,
    pub client_account_creation_disabled: bool,
    pub user_name: bool,
    pub terms_of_use: String,
    /// Platform names the project supports.
    pub platforms: Vec<String>,
}

impl ProjectConfig {
    /// Base URL for web RPCs, falling back to the master URL.
    #[must_use]
    pub fn web_rpc_base(&self) -> &str {
        if self.web_rpc_url_base.is_empty() {
            &self.master_url
        } else {
            &self.web_rpc_url_base
        }
    }
}

/// A project from the all-projects list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProjectInfo {
    pub name: String,
    pub url: String,
    pub general_area: String,
    pub specific_area: String,
    pub description: String,
    pub home: String,
    pub platforms: Vec<String>,
    pub image_url: String,
    pub summary: String,
}

/// An account manager from the all-projects list.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AccountManagerInfo {
    pub name: String,
    pub url: String,
    pub description: String,
    pub image_url: String,
}

/// Reply to `get_all_projects_list`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AllProjectsList {
    pub projects: Vec<ProjectInfo>,
    pub account_managers: Vec<AccountManagerInfo>,
}
