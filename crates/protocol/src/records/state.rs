use super::{App, AppVersion, HostInfo, Project, TaskResult, Workunit};

/// One complete `get_state` snapshot.
///
/// Each snapshot replaces whatever the caller held before; nothing carries
/// over between decodes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CcState {
    pub host_info: HostInfo,
    pub projects: Vec<Project>,
    pub apps: Vec<App>,
    pub app_versions: Vec<AppVersion>,
    pub workunits: Vec<Workunit>,
    pub results: Vec<TaskResult>,
    pub version_info: VersionInfo,
    pub platform_name: String,
    pub have_ati: bool,
    pub have_cuda: bool,
}

impl CcState {
    /// Finds a project by master URL, compared case-insensitively.
    #[must_use]
    pub fn project(&self, master_url: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|project| super::same_url(&project.master_url, master_url))
    }

    /// Tasks belonging to the project with the given master URL.
    pub fn results_for<'a>(&'a self, master_url: &'a str) -> impl Iterator<Item = &'a TaskResult> + 'a {
        self.results
            .iter()
            .filter(move |result| super::same_url(&result.project_url, master_url))
    }
}

/// Core client version as reported by `exchange_versions` or `get_state`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VersionInfo {
    pub major: i32,
    pub minor: i32,
    pub release: i32,
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}
