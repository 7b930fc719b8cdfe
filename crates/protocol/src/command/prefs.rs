use std::fmt::Write as _;

use super::Fixed;
use crate::records::{GlobalPreferences, TimeSpan};

fn line(out: &mut String, name: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  <{name}>{value}</{name}>");
}

fn flag(out: &mut String, name: &str, value: bool) {
    line(out, name, u8::from(value));
}

/// Writes `prefs` to the core client's override file and applies them.
///
/// Every field is sent, followed by one `<day_prefs>` block per weekday that
/// has a CPU or network override.
#[must_use]
pub fn set_global_prefs_override(prefs: &GlobalPreferences) -> String {
    let mut out = String::from("<set_global_prefs_override>\n<global_preferences>\n");

    flag(&mut out, "run_on_batteries", prefs.run_on_batteries);
    line(&mut out, "battery_charge_min_pct", Fixed(prefs.battery_charge_min_pct));
    line(&mut out, "battery_max_temperature", Fixed(prefs.battery_max_temperature));
    flag(&mut out, "run_gpu_if_user_active", prefs.run_gpu_if_user_active);
    flag(&mut out, "run_if_user_active", prefs.run_if_user_active);
    line(&mut out, "idle_time_to_run", Fixed(prefs.idle_time_to_run));
    line(&mut out, "suspend_cpu_usage", Fixed(prefs.suspend_cpu_usage));
    line(&mut out, "suspend_if_no_recent_input", Fixed(prefs.suspend_if_no_recent_input));
    flag(&mut out, "leave_apps_in_memory", prefs.leave_apps_in_memory);
    flag(&mut out, "dont_verify_images", prefs.dont_verify_images);
    line(&mut out, "work_buf_min_days", Fixed(prefs.work_buf_min_days));
    line(&mut out, "work_buf_additional_days", Fixed(prefs.work_buf_additional_days));
    line(&mut out, "max_ncpus_pct", Fixed(prefs.max_ncpus_pct));
    line(&mut out, "cpu_scheduling_period_minutes", Fixed(prefs.cpu_scheduling_period_minutes));
    line(&mut out, "disk_interval", Fixed(prefs.disk_interval));
    line(&mut out, "disk_max_used_gb", Fixed(prefs.disk_max_used_gb));
    line(&mut out, "disk_max_used_pct", Fixed(prefs.disk_max_used_pct));
    line(&mut out, "disk_min_free_gb", Fixed(prefs.disk_min_free_gb));
    line(&mut out, "vm_max_used_pct", Fixed(prefs.vm_max_used_pct));
    line(&mut out, "ram_max_used_busy_pct", Fixed(prefs.ram_max_used_busy_pct));
    line(&mut out, "ram_max_used_idle_pct", Fixed(prefs.ram_max_used_idle_pct));
    line(&mut out, "max_bytes_sec_up", Fixed(prefs.max_bytes_sec_up));
    line(&mut out, "max_bytes_sec_down", Fixed(prefs.max_bytes_sec_down));
    line(&mut out, "cpu_usage_limit", Fixed(prefs.cpu_usage_limit));
    line(&mut out, "daily_xfer_limit_mb", Fixed(prefs.daily_xfer_limit_mb));
    line(&mut out, "daily_xfer_period_days", prefs.daily_xfer_period_days);
    flag(&mut out, "network_wifi_only", prefs.network_wifi_only);
    line(&mut out, "start_hour", Fixed(prefs.cpu_times.start_hour));
    line(&mut out, "end_hour", Fixed(prefs.cpu_times.end_hour));
    line(&mut out, "net_start_hour", Fixed(prefs.net_times.start_hour));
    line(&mut out, "net_end_hour", Fixed(prefs.net_times.end_hour));

    for (day, (cpu, net)) in prefs
        .cpu_times
        .week
        .iter()
        .zip(prefs.net_times.week.iter())
        .enumerate()
    {
        day_prefs(&mut out, day, *cpu, *net);
    }

    out.push_str("</global_preferences>\n</set_global_prefs_override>");
    out
}

fn day_prefs(out: &mut String, day: usize, cpu: Option<TimeSpan>, net: Option<TimeSpan>) {
    if cpu.is_none() && net.is_none() {
        return;
    }

    let _ = writeln!(out, "  <day_prefs>\n    <day_of_week>{day}</day_of_week>");
    if let Some(span) = cpu {
        let _ = writeln!(out, "    <start_hour>{}</start_hour>", Fixed(span.start_hour));
        let _ = writeln!(out, "    <end_hour>{}</end_hour>", Fixed(span.end_hour));
    }
    if let Some(span) = net {
        let _ = writeln!(out, "    <net_start_hour>{}</net_start_hour>", Fixed(span.start_hour));
        let _ = writeln!(out, "    <net_end_hour>{}</net_end_hour>", Fixed(span.end_hour));
    }
    out.push_str("  </day_prefs>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{GlobalPrefsDecoder, decode_reply};

    #[test]
    fn override_wraps_global_preferences() {
        let body = set_global_prefs_override(&GlobalPreferences::default());
        assert!(body.starts_with("<set_global_prefs_override>\n<global_preferences>\n  <run_on_batteries>0</run_on_batteries>\n"));
        assert!(body.ends_with("</global_preferences>\n</set_global_prefs_override>"));
        assert!(body.contains("  <max_ncpus_pct>0.000000</max_ncpus_pct>\n"));
        assert!(!body.contains("<day_prefs>"));
    }

    #[test]
    fn override_emits_day_blocks() {
        let mut prefs = GlobalPreferences::default();
        prefs.cpu_times.week[1] = Some(TimeSpan {
            start_hour: 9.0,
            end_hour: 17.0,
        });
        prefs.net_times.week[5] = Some(TimeSpan {
            start_hour: 23.0,
            end_hour: 7.0,
        });

        let body = set_global_prefs_override(&prefs);
        assert!(body.contains(
            "  <day_prefs>\n    <day_of_week>1</day_of_week>\n    <start_hour>9.000000</start_hour>\n    <end_hour>17.000000</end_hour>\n  </day_prefs>\n"
        ));
        assert!(body.contains(
            "  <day_prefs>\n    <day_of_week>5</day_of_week>\n    <net_start_hour>23.000000</net_start_hour>\n    <net_end_hour>7.000000</net_end_hour>\n  </day_prefs>\n"
        ));
    }

    #[test]
    fn encoded_preferences_decode_back() {
        let mut prefs = GlobalPreferences {
            run_if_user_active: true,
            max_ncpus_pct: 75.0,
            daily_xfer_period_days: 7,
            ..GlobalPreferences::default()
        };
        prefs.cpu_times.week[0] = Some(TimeSpan {
            start_hour: 1.0,
            end_hour: 2.0,
        });

        let decoded = decode_reply(&set_global_prefs_override(&prefs), GlobalPrefsDecoder::new())
            .expect("decode")
            .expect("prefs present");
        assert_eq!(decoded, prefs);
    }
}
