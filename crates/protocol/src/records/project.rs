use super::same_url;

/// Link advertised by a project for display in a manager.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GuiUrl {
    pub name: String,
    pub description: String,
    pub url: String,
}

/// Scheduling debt and backoff for one processing resource.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ResourceDebt {
    pub short_term_debt: f64,
    pub long_term_debt: f64,
    pub backoff_time: f64,
    pub backoff_interval: f64,
}

/// An attached project.
///
/// Identified by its master URL (compared case-insensitively) together with
/// the account user name, since some servers host several accounts at the
/// same URL.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Project {
    pub master_url: String,
    pub project_dir: String,
    pub resource_share: f64,
    pub project_name: String,
    pub user_name: String,
    pub team_name: String,
    pub host_venue: String,
    pub hostid: i32,
    pub gui_urls: Vec<GuiUrl>,
    pub user_total_credit: f64,
    pub user_expavg_credit: f64,
    pub host_total_credit: f64,
    pub host_expavg_credit: f64,
    pub disk_usage: f64,
    pub nrpc_failures: i32,
    pub master_fetch_failures: i32,
    pub min_rpc_time: f64,
    pub download_backoff: f64,
    pub upload_backoff: f64,
    pub cpu: ResourceDebt,
    /// NVIDIA (CUDA) coprocessor accounting.
    pub cuda: ResourceDebt,
    pub ati: ResourceDebt,
    pub duration_correction_factor: f64,
    pub anonymous_platform: bool,
    pub master_url_fail: bool,
    /// Reason code of the pending scheduler RPC; zero when none is pending.
    pub sched_rpc_pending: i32,
    pub trickle_up_pending: bool,
    pub scheduler_rpc_in_progress: bool,
    pub suspended_via_gui: bool,
    pub dont_request_more_work: bool,
    pub ended: bool,
    pub attached_via_acct_mgr: bool,
    pub detach_when_done: bool,
    pub no_cpu_pref: bool,
    pub no_cuda_pref: bool,
    pub no_ati_pref: bool,
    pub last_rpc_time: f64,
    pub project_files_downloaded_time: f64,
}

impl Project {
    /// Returns `true` when both records describe the same account on the same project.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        same_url(&self.master_url, &other.master_url) && self.user_name == other.user_name
    }

    /// Display name, falling back to the master URL for projects that have
    /// not completed their first scheduler contact.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.project_name.is_empty() {
            &self.master_url
        } else {
            &self.project_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(url: &str, user: &str) -> Project {
        Project {
            master_url: url.to_owned(),
            user_name: user.to_owned(),
            ..Project::default()
        }
    }

    #[test]
    fn identity_ignores_url_case() {
        assert!(project("http://Example.org/", "ann").same_identity(&project("http://example.org/", "ann")));
    }

    #[test]
    fn identity_distinguishes_accounts() {
        assert!(!project("http://example.org/", "ann").same_identity(&project("http://example.org/", "bob")));
    }

    #[test]
    fn display_name_falls_back_to_url() {
        assert_eq!(project("http://example.org/", "").display_name(), "http://example.org/");
    }
}
