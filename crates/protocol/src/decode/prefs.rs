use super::{RecordBuilder, record_decoder};
use crate::records::{GlobalPreferences, TimeSpan};
use crate::xml::{assign, parse_bool};

/// Fields of one `<day_prefs>` block, committed when the block closes.
#[derive(Default)]
struct DayPrefs {
    day_of_week: Option<i32>,
    start_hour: Option<f64>,
    end_hour: Option<f64>,
    net_start_hour: Option<f64>,
    net_end_hour: Option<f64>,
}

impl DayPrefs {
    fn field(&mut self, name: &str, text: &str) {
        let slot = match name {
            "start_hour" => &mut self.start_hour,
            "end_hour" => &mut self.end_hour,
            "net_start_hour" => &mut self.net_start_hour,
            "net_end_hour" => &mut self.net_end_hour,
            "day_of_week" => {
                let mut day = -1;
                assign(&mut day, name, text);
                self.day_of_week = Some(day);
                return;
            }
            _ => return,
        };
        let mut hour = f64::NAN;
        assign(&mut hour, name, text);
        if !hour.is_nan() {
            *slot = Some(hour);
        }
    }

    fn commit(self, prefs: &mut GlobalPreferences) {
        let Some(day) = self
            .day_of_week
            .and_then(|day| usize::try_from(day).ok())
            .filter(|day| *day < 7)
        else {
            logging::trace_decode!("ignoring day_prefs for day {:?}", self.day_of_week);
            return;
        };

        if let (Some(start_hour), Some(end_hour)) = (self.start_hour, self.end_hour) {
            prefs.cpu_times.week[day] = Some(TimeSpan {
                start_hour,
                end_hour,
            });
        }
        if let (Some(start_hour), Some(end_hour)) = (self.net_start_hour, self.net_end_hour) {
            prefs.net_times.week[day] = Some(TimeSpan {
                start_hour,
                end_hour,
            });
        }
    }
}

#[derive(Default)]
pub(crate) struct GlobalPrefsBuilder {
    prefs: GlobalPreferences,
    day: Option<DayPrefs>,
}

impl RecordBuilder for GlobalPrefsBuilder {
    type Record = GlobalPreferences;
    const TAG: &'static str = "global_preferences";

    fn start(&mut self, name: &str) {
        if name == "day_prefs" {
            self.day = Some(DayPrefs::default());
        }
    }

    fn field(&mut self, name: &str, text: &str) {
        if name == "day_prefs" {
            if let Some(day) = self.day.take() {
                day.commit(&mut self.prefs);
            }
            return;
        }
        if let Some(day) = &mut self.day {
            day.field(name, text);
            return;
        }

        let prefs = &mut self.prefs;
        match name {
            "run_on_batteries" => prefs.run_on_batteries = parse_bool(text),
            "battery_charge_min_pct" => assign(&mut prefs.battery_charge_min_pct, name, text),
            "battery_max_temperature" => assign(&mut prefs.battery_max_temperature, name, text),
            "run_gpu_if_user_active" => prefs.run_gpu_if_user_active = parse_bool(text),
            "run_if_user_active" => prefs.run_if_user_active = parse_bool(text),
            "idle_time_to_run" => assign(&mut prefs.idle_time_to_run, name, text),
            "suspend_cpu_usage" => assign(&mut prefs.suspend_cpu_usage, name, text),
            "suspend_if_no_recent_input" => {
                assign(&mut prefs.suspend_if_no_recent_input, name, text);
            }
            "leave_apps_in_memory" => prefs.leave_apps_in_memory = parse_bool(text),
            "dont_verify_images" => prefs.dont_verify_images = parse_bool(text),
            "work_buf_min_days" => assign(&mut prefs.work_buf_min_days, name, text),
            "work_buf_additional_days" => assign(&mut prefs.work_buf_additional_days, name, text),
            "max_ncpus_pct" => assign(&mut prefs.max_ncpus_pct, name, text),
            "cpu_scheduling_period_minutes" => {
                assign(&mut prefs.cpu_scheduling_period_minutes, name, text);
            }
            "disk_interval" => assign(&mut prefs.disk_interval, name, text),
            "disk_max_used_gb" => assign(&mut prefs.disk_max_used_gb, name, text),
            "disk_max_used_pct" => assign(&mut prefs.disk_max_used_pct, name, text),
            "disk_min_free_gb" => assign(&mut prefs.disk_min_free_gb, name, text),
            "vm_max_used_pct" => assign(&mut prefs.vm_max_used_pct, name, text),
            "ram_max_used_busy_pct" => assign(&mut prefs.ram_max_used_busy_pct, name, text),
            "ram_max_used_idle_pct" => assign(&mut prefs.ram_max_used_idle_pct, name, text),
            "max_bytes_sec_up" => assign(&mut prefs.max_bytes_sec_up, name, text),
            "max_bytes_sec_down" => assign(&mut prefs.max_bytes_sec_down, name, text),
            "cpu_usage_limit" => assign(&mut prefs.cpu_usage_limit, name, text),
            "daily_xfer_limit_mb" => assign(&mut prefs.daily_xfer_limit_mb, name, text),
            "daily_xfer_period_days" => assign(&mut prefs.daily_xfer_period_days, name, text),
            "network_wifi_only" => prefs.network_wifi_only = parse_bool(text),
            "start_hour" => assign(&mut prefs.cpu_times.start_hour, name, text),
            "end_hour" => assign(&mut prefs.cpu_times.end_hour, name, text),
            "net_start_hour" => assign(&mut prefs.net_times.start_hour, name, text),
            "net_end_hour" => assign(&mut prefs.net_times.end_hour, name, text),
            _ => {}
        }
    }

    fn build(self) -> Option<GlobalPreferences> {
        Some(self.prefs)
    }
}

record_decoder! {
    /// Decodes `<global_preferences>` replies (working set or override file).
    GlobalPrefsDecoder: single GlobalPrefsBuilder => GlobalPreferences
}
