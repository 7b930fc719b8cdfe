/// Daily window in fractional hours, `0.0..24.0`.
///
/// A window whose end precedes its start wraps past midnight. Equal bounds
/// mean no restriction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeSpan {
    pub start_hour: f64,
    pub end_hour: f64,
}

/// Default daily window plus optional per-weekday overrides.
///
/// `week[0]` is Sunday.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimePreferences {
    pub start_hour: f64,
    pub end_hour: f64,
    pub week: [Option<TimeSpan>; 7],
}

impl TimePreferences {
    /// Window that applies on `day` (0 = Sunday), honouring overrides.
    #[must_use]
    pub fn window_for(&self, day: usize) -> TimeSpan {
        self.week.get(day).copied().flatten().unwrap_or(TimeSpan {
            start_hour: self.start_hour,
            end_hour: self.end_hour,
        })
    }
}

/// Resource limits applied by the core client.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlobalPreferences {
    pub run_on_batteries: bool,
    pub battery_charge_min_pct: f64,
    pub battery_max_temperature: f64,
    pub run_gpu_if_user_active: bool,
    pub run_if_user_active: bool,
    pub idle_time_to_run: f64,
    pub suspend_cpu_usage: f64,
    pub suspend_if_no_recent_input: f64,
    pub leave_apps_in_memory: bool,
    pub dont_verify_images: bool,
    pub work_buf_min_days: f64,
    pub work_buf_additional_days: f64,
    pub max_ncpus_pct: f64,
    pub cpu_scheduling_period_minutes: f64,
    pub disk_interval: f64,
    pub disk_max_used_gb: f64,
    pub disk_max_used_pct: f64,
    pub disk_min_free_gb: f64,
    pub vm_max_used_pct: f64,
    pub ram_max_used_busy_pct: f64,
    pub ram_max_used_idle_pct: f64,
    pub max_bytes_sec_up: f64,
    pub max_bytes_sec_down: f64,
    pub cpu_usage_limit: f64,
    pub daily_xfer_limit_mb: f64,
    pub daily_xfer_period_days: i32,
    pub network_wifi_only: bool,
    pub cpu_times: TimePreferences,
    pub net_times: TimePreferences,
}
