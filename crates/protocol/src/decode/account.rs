use super::{Decoder, RecordBuilder, record_decoder};
use crate::records::{
    AccountManagerInfo, AccountOut, AcctMgrInfo, AcctMgrRpcReply, AllProjectsList,
    ProjectAttachReply, ProjectConfig, ProjectInfo,
};
use crate::xml::{assign, parse_bool};

/// Decodes `lookup_account_poll` and `create_account_poll` replies.
///
/// The core client answers with either an `<account_out>` block or bare
/// `<error_num>`, so fields are read wherever they appear.
#[derive(Debug, Default)]
pub struct AccountOutDecoder {
    out: AccountOut,
    seen: bool,
}

impl AccountOutDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for AccountOutDecoder {
    type Output = Option<AccountOut>;

    fn end(&mut self, name: &str, text: &str) {
        match name {
            "error_num" => assign(&mut self.out.error_num, name, text),
            "error_msg" => self.out.error_msg = text.to_owned(),
            "authenticator" => self.out.authenticator = text.to_owned(),
            "account_out" => {}
            _ => return,
        }
        self.seen = true;
    }

    fn finish(self) -> Option<AccountOut> {
        self.seen.then_some(self.out)
    }
}

/// Shared shape of the attach and account-manager poll replies.
#[derive(Debug, Default)]
struct PollReply {
    error_num: i32,
    messages: Vec<String>,
    seen: bool,
}

impl PollReply {
    fn end(&mut self, root: &str, name: &str, text: &str) {
        match name {
            "error_num" => assign(&mut self.error_num, name, text),
            "message" if !text.is_empty() => self.messages.push(text.to_owned()),
            other if other == root => {}
            _ => return,
        }
        self.seen = true;
    }
}

/// Decodes the `project_attach_poll` reply.
#[derive(Debug, Default)]
pub struct ProjectAttachReplyDecoder(PollReply);

impl ProjectAttachReplyDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for ProjectAttachReplyDecoder {
    type Output = Option<ProjectAttachReply>;

    fn end(&mut self, name: &str, text: &str) {
        self.0.end("project_attach_reply", name, text);
    }

    fn finish(self) -> Option<ProjectAttachReply> {
        self.0.seen.then(|| ProjectAttachReply {
            error_num: self.0.error_num,
            messages: self.0.messages,
        })
    }
}

/// Decodes the `acct_mgr_rpc_poll` reply.
#[derive(Debug, Default)]
pub struct AcctMgrRpcReplyDecoder(PollReply);

impl AcctMgrRpcReplyDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for AcctMgrRpcReplyDecoder {
    type Output = Option<AcctMgrRpcReply>;

    fn end(&mut self, name: &str, text: &str) {
        self.0.end("acct_mgr_rpc_reply", name, text);
    }

    fn finish(self) -> Option<AcctMgrRpcReply> {
        self.0.seen.then(|| AcctMgrRpcReply {
            error_num: self.0.error_num,
            messages: self.0.messages,
        })
    }
}

#[derive(Default)]
pub(crate) struct AcctMgrInfoBuilder(AcctMgrInfo);

impl RecordBuilder for AcctMgrInfoBuilder {
    type Record = AcctMgrInfo;
    const TAG: &'static str = "acct_mgr_info";

    fn field(&mut self, name: &str, text: &str) {
        let info = &mut self.0;
        match name {
            "acct_mgr_url" => info.acct_mgr_url = text.to_owned(),
            "acct_mgr_name" => info.acct_mgr_name = text.to_owned(),
            "have_credentials" => info.have_credentials = parse_bool(text),
            "cookie_required" => info.cookie_required = parse_bool(text),
            "cookie_failure_url" => info.cookie_failure_url = text.to_owned(),
            _ => {}
        }
    }

    fn build(self) -> Option<AcctMgrInfo> {
        Some(self.0)
    }
}

record_decoder! {
    /// Decodes the `acct_mgr_info` reply.
    AcctMgrInfoDecoder: single AcctMgrInfoBuilder => AcctMgrInfo
}

/// Decodes the `get_project_config_poll` reply.
///
/// A reply holding only `<error_num>` still produces a config so callers can
/// see `ERR_IN_PROGRESS`.
#[derive(Debug, Default)]
pub struct ProjectConfigDecoder {
    config: ProjectConfig,
    seen: bool,
    in_platform: bool,
}

impl ProjectConfigDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for ProjectConfigDecoder {
    type Output = Option<ProjectConfig>;

    fn start(&mut self, name: &str) {
        match name {
            "project_config" => self.seen = true,
            "platform" => self.in_platform = true,
            _ => {}
        }
    }

    fn end(&mut self, name: &str, text: &str) {
        if self.in_platform {
            match name {
                "platform" => self.in_platform = false,
                "platform_name" if !text.is_empty() => self.config.platforms.push(text.to_owned()),
                _ => {}
            }
            return;
        }

        let config = &mut self.config;
        match name {
            "error_num" => {
                assign(&mut config.error_num, name, text);
                self.seen = true;
            }
            "error_msg" => config.error_msg = text.to_owned(),
            "name" => config.name = text.to_owned(),
            "master_url" => config.master_url = text.to_owned(),
            "web_rpc_url_base" => config.web_rpc_url_base = text.to_owned(),
            "local_revision" => config.local_revision = text.to_owned(),
            "min_passwd_length" => assign(&mut config.min_passwd_length, name, text),
            "account_manager" => config.account_manager = parse_bool(text),
            "uses_username" => config.uses_username = parse_bool(text),
            "account_creation_disabled" => config.account_creation_disabled = parse_bool(text),
            "client_account_creation_disabled" => {
                config.client_account_creation_disabled = parse_bool(text);
            }
            "user_name" => config.user_name = parse_bool(text),
            "terms_of_use" => config.terms_of_use = text.to_owned(),
            _ => {}
        }
    }

    fn finish(self) -> Option<ProjectConfig> {
        self.seen.then_some(self.config)
    }
}

#[derive(Default)]
pub(crate) struct ProjectInfoBuilder {
    info: ProjectInfo,
    in_platforms: bool,
}

impl RecordBuilder for ProjectInfoBuilder {
    type Record = ProjectInfo;
    const TAG: &'static str = "project";

    fn start(&mut self, name: &str) {
        if name == "platforms" {
            self.in_platforms = true;
        }
    }

    fn field(&mut self, name: &str, text: &str) {
        if self.in_platforms {
            match name {
                "platforms" => self.in_platforms = false,
                "name" if !text.is_empty() => self.info.platforms.push(text.to_owned()),
                _ => {}
            }
            return;
        }

        let info = &mut self.info;
        match name {
            "name" => info.name = text.to_owned(),
            "url" => info.url = text.to_owned(),
            "general_area" => info.general_area = text.to_owned(),
            "specific_area" => info.specific_area = text.to_owned(),
            "description" => info.description = text.to_owned(),
            "home" => info.home = text.to_owned(),
            "image" => info.image_url = text.to_owned(),
            "summary" => info.summary = text.to_owned(),
            _ => {}
        }
    }

    fn build(self) -> Option<ProjectInfo> {
        (!self.info.name.is_empty()).then_some(self.info)
    }
}

#[derive(Default)]
pub(crate) struct AccountManagerBuilder(AccountManagerInfo);

impl RecordBuilder for AccountManagerBuilder {
    type Record = AccountManagerInfo;
    const TAG: &'static str = "account_manager";

    fn field(&mut self, name: &str, text: &str) {
        let manager = &mut self.0;
        match name {
            "name" => manager.name = text.to_owned(),
            "url" => manager.url = text.to_owned(),
            "description" => manager.description = text.to_owned(),
            "image" => manager.image_url = text.to_owned(),
            _ => {}
        }
    }

    fn build(self) -> Option<AccountManagerInfo> {
        (!self.0.name.is_empty()).then_some(self.0)
    }
}

/// Decodes the `get_all_projects_list` reply.
#[derive(Default)]
pub struct AllProjectsDecoder {
    projects: super::ListDecoder<ProjectInfoBuilder>,
    managers: super::ListDecoder<AccountManagerBuilder>,
}

impl AllProjectsDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for AllProjectsDecoder {
    type Output = AllProjectsList;

    fn start(&mut self, name: &str) {
        self.projects.start(name);
        self.managers.start(name);
    }

    fn end(&mut self, name: &str, text: &str) {
        self.projects.end(name, text);
        self.managers.end(name, text);
    }

    fn finish(self) -> AllProjectsList {
        AllProjectsList {
            projects: self.projects.finish(),
            account_managers: self.managers.finish(),
        }
    }
}
