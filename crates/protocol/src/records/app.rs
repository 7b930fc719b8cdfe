use super::same_url;

/// An application distributed by a project.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct App {
    pub name: String,
    pub user_friendly_name: String,
    pub non_cpu_intensive: bool,
    /// Master URL of the owning project; only set in full-state snapshots.
    pub project_url: String,
}

impl App {
    /// Friendly name when the project supplied one, otherwise the internal name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.user_friendly_name.is_empty() {
            &self.name
        } else {
            &self.user_friendly_name
        }
    }

    /// Matches on `(project, name)`, both compared case-insensitively.
    #[must_use]
    pub fn matches(&self, project_url: &str, name: &str) -> bool {
        same_url(&self.project_url, project_url) && self.name.eq_ignore_ascii_case(name)
    }
}

/// A build of an application for one platform and plan class.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AppVersion {
    pub app_name: String,
    pub version_num: i32,
    pub platform: String,
    pub plan_class: String,
    pub api_version: String,
    pub avg_ncpus: f64,
    pub max_ncpus: f64,
    pub gpu_ram: f64,
    pub flops: f64,
    pub project_url: String,
}

impl AppVersion {
    /// Matches on the full `(project, app, version_num, plan_class)` key.
    #[must_use]
    pub fn matches(&self, project_url: &str, app_name: &str, version_num: i32, plan_class: &str) -> bool {
        self.matches_build(project_url, version_num, plan_class)
            && self.app_name.eq_ignore_ascii_case(app_name)
    }

    /// Matches on `(project, version_num, plan_class)` without the app name.
    #[must_use]
    pub fn matches_build(&self, project_url: &str, version_num: i32, plan_class: &str) -> bool {
        same_url(&self.project_url, project_url)
            && self.version_num == version_num
            && self.plan_class == plan_class
    }
}

/// A unit of work from which one or more tasks are instantiated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Workunit {
    pub name: String,
    pub app_name: String,
    pub version_num: i32,
    pub rsc_fpops_est: f64,
    pub rsc_fpops_bound: f64,
    pub rsc_memory_bound: f64,
    pub rsc_disk_bound: f64,
    pub project_url: String,
}

impl Workunit {
    /// Matches on `(project, name)`.
    #[must_use]
    pub fn matches(&self, project_url: &str, name: &str) -> bool {
        same_url(&self.project_url, project_url) && self.name == name
    }
}
