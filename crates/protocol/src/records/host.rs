/// Static and near-static facts about the host running the core client.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HostInfo {
    /// Offset from UTC in seconds.
    pub timezone: i32,
    pub domain_name: String,
    pub ip_addr: String,
    pub host_cpid: String,
    pub p_ncpus: i32,
    pub p_vendor: String,
    pub p_model: String,
    pub p_features: String,
    pub p_fpops: f64,
    pub p_iops: f64,
    pub p_membw: f64,
    /// Time of the last benchmark run.
    pub p_calculated: f64,
    pub m_nbytes: f64,
    pub m_cache: f64,
    pub m_swap: f64,
    pub d_total: f64,
    pub d_free: f64,
    pub os_name: String,
    pub os_version: String,
    pub virtualbox_version: String,
}
