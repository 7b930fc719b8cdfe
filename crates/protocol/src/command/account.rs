use checksums::account_password_hash;

use super::{Body, empty};

/// Credentials for `lookup_account` and `create_account`.
///
/// The clear-text password never leaves this process; builders send
/// `md5(password + lowercase(identity))` where the identity is the user name
/// for projects that log in by name and the email address otherwise.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountIn {
    /// Project master URL.
    pub url: String,
    /// Email address the account is registered under.
    pub email_addr: String,
    /// Account name; also the login identity when `uses_username` is set.
    pub user_name: String,
    /// Clear-text password, hashed before it is encoded.
    pub password: String,
    /// Team to join on creation; may be empty.
    pub team_name: String,
    /// Project logs users in by user name rather than email address.
    pub uses_username: bool,
    /// Authenticate against the project's LDAP directory.
    pub ldap_auth: bool,
}

impl AccountIn {
    fn identity(&self) -> &str {
        if self.uses_username {
            &self.user_name
        } else {
            &self.email_addr
        }
    }

    fn password_hash(&self) -> String {
        account_password_hash(&self.password, self.identity())
    }
}

/// Starts an account lookup; poll with [`lookup_account_poll`].
#[must_use]
pub fn lookup_account(account: &AccountIn) -> String {
    Body::new("lookup_account")
        .text("url", &account.url)
        .text("email_addr", account.identity())
        .text("passwd_hash", &account.password_hash())
        .value("ldap_auth", u8::from(account.ldap_auth))
        .finish()
}

/// `<lookup_account_poll/>`
#[must_use]
pub fn lookup_account_poll() -> String {
    empty("lookup_account_poll")
}

/// Starts account creation; poll with [`create_account_poll`].
#[must_use]
pub fn create_account(account: &AccountIn) -> String {
    Body::new("create_account")
        .text("url", &account.url)
        .text("email_addr", &account.email_addr)
        .text("passwd_hash", &account_password_hash(&account.password, &account.email_addr))
        .text("user_name", &account.user_name)
        .text("team_name", &account.team_name)
        .finish()
}

/// `<create_account_poll/>`
#[must_use]
pub fn create_account_poll() -> String {
    empty("create_account_poll")
}

/// Attaches to a project with an authenticator obtained from an account RPC.
#[must_use]
pub fn project_attach(project_url: &str, authenticator: &str, project_name: &str) -> String {
    Body::new("project_attach")
        .text("project_url", project_url)
        .text("authenticator", authenticator)
        .text("project_name", project_name)
        .finish()
}

/// `<project_attach_poll/>`
#[must_use]
pub fn project_attach_poll() -> String {
    empty("project_attach_poll")
}

/// Asks the core client to fetch a project's configuration.
#[must_use]
pub fn get_project_config(url: &str) -> String {
    Body::new("get_project_config").text("url", url).finish()
}

/// `<get_project_config_poll/>`
#[must_use]
pub fn get_project_config_poll() -> String {
    empty("get_project_config_poll")
}

/// Attaches to (or, with empty arguments, detaches from) an account manager.
#[must_use]
pub fn acct_mgr_rpc(url: &str, name: &str, password: &str) -> String {
    let password_hash = if password.is_empty() {
        String::new()
    } else {
        account_password_hash(password, name)
    };
    Body::new("acct_mgr_rpc")
        .text("url", url)
        .text("name", name)
        .text("password_hash", &password_hash)
        .finish()
}

/// Synchronises with the account manager using stored credentials.
#[must_use]
pub fn acct_mgr_rpc_use_config_file() -> String {
    Body::new("acct_mgr_rpc").flag("use_config_file").finish()
}

/// `<acct_mgr_rpc_poll/>`
#[must_use]
pub fn acct_mgr_rpc_poll() -> String {
    empty("acct_mgr_rpc_poll")
}
