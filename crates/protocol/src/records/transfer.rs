/// A pending file upload or download.
///
/// `bytes_xferred` is fed by two wire tags. The persisted
/// `persistent_file_xfer/last_bytes_xferred` value is used only until the live
/// `file_xfer/bytes_xferred` value is seen; the live value always wins.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Transfer {
    pub name: String,
    pub project_url: String,
    pub generated_locally: bool,
    pub nbytes: f64,
    pub max_nbytes: f64,
    pub status: i32,
    pub is_upload: bool,
    /// Set when a `persistent_file_xfer` block is present.
    pub pers_xfer_active: bool,
    /// Set when a `file_xfer` block is present.
    pub xfer_active: bool,
    pub num_retries: i32,
    pub first_request_time: f64,
    pub next_request_time: f64,
    pub time_so_far: f64,
    pub bytes_xferred: f64,
    pub file_offset: f64,
    pub xfer_speed: f64,
    /// Host part of the URL the live transfer talks to.
    pub hostname: String,
    pub project_backoff: f64,
}

impl Transfer {
    /// Matches on `(project_url, name)`.
    #[must_use]
    pub fn matches(&self, project_url: &str, name: &str) -> bool {
        super::same_url(&self.project_url, project_url) && self.name == name
    }
}
