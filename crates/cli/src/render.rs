//! Text and JSON rendering of core-client replies.

use std::io::{self, Write};

use protocol::{
    CcState, CcStatus, GlobalPreferences, HostInfo, Message, Mode, Notice, Project, TaskResult,
    Transfer, VersionInfo,
};
use time::OffsetDateTime;
use time::macros::format_description;

/// Reply produced by a request, ready to be printed.
#[derive(Debug)]
#[cfg_attr(feature = "json", derive(serde::Serialize), serde(untagged))]
pub(crate) enum Outcome {
    State(Box<CcState>),
    Tasks(Vec<TaskResult>),
    Projects(Vec<Project>),
    Transfers(Vec<Transfer>),
    Messages(Vec<Message>),
    MessageCount { message_count: i32 },
    Notices(Vec<Notice>),
    Status(CcStatus),
    Host(HostInfo),
    Preferences(GlobalPreferences),
    Version(VersionInfo),
    /// A control command the core client accepted.
    Done { success: bool },
}

/// Writes `outcome` as indented JSON followed by a newline.
#[cfg(feature = "json")]
pub(crate) fn write_json<W: Write>(outcome: &Outcome, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, outcome).map_err(io::Error::other)?;
    writeln!(out)
}

/// Writes `outcome` in the human-readable layout.
pub(crate) fn write_text<W: Write>(outcome: &Outcome, out: &mut W) -> io::Result<()> {
    match outcome {
        Outcome::State(state) => state_text(state, out),
        Outcome::Tasks(tasks) => tasks_text(tasks, out),
        Outcome::Projects(projects) => projects_text(projects, out),
        Outcome::Transfers(transfers) => transfers_text(transfers, out),
        Outcome::Messages(messages) => messages_text(messages, out),
        Outcome::MessageCount { message_count } => writeln!(out, "{message_count}"),
        Outcome::Notices(notices) => notices_text(notices, out),
        Outcome::Status(status) => status_text(status, out),
        Outcome::Host(host) => host_text(host, out),
        Outcome::Preferences(prefs) => prefs_text(prefs, out),
        Outcome::Version(version) => writeln!(
            out,
            "Client version: {}.{}.{}",
            version.major, version.minor, version.release
        ),
        Outcome::Done { .. } => Ok(()),
    }
}

/// Formats a Unix timestamp as UTC `YYYY-MM-DD HH:MM:SS`.
///
/// Out-of-range values are printed as the raw number.
pub(crate) fn format_timestamp(seconds: i64) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::from_unix_timestamp(seconds)
        .ok()
        .and_then(|moment| moment.format(&format).ok())
        .unwrap_or_else(|| seconds.to_string())
}

fn whole_seconds(seconds: f64) -> i64 {
    seconds.trunc() as i64
}

fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "======== {title} ========")
}

fn mode_name(code: i32) -> String {
    Mode::from_code(code).map_or_else(|| format!("unknown ({code})"), |mode| mode.to_string())
}

fn state_text<W: Write>(state: &CcState, out: &mut W) -> io::Result<()> {
    let version = &state.version_info;
    writeln!(
        out,
        "Core client {}.{}.{} on {}",
        version.major, version.minor, version.release, state.platform_name
    )?;
    writeln!(out)?;
    projects_text(&state.projects, out)?;
    writeln!(out)?;
    heading(out, "Applications")?;
    for (index, app) in state.apps.iter().enumerate() {
        writeln!(out, "{}) -----------", index + 1)?;
        writeln!(out, "   name: {}", app.name)?;
        writeln!(out, "   project: {}", app.project_url)?;
    }
    writeln!(out)?;
    tasks_text(&state.results, out)
}

fn projects_text<W: Write>(projects: &[Project], out: &mut W) -> io::Result<()> {
    heading(out, "Projects")?;
    for (index, project) in projects.iter().enumerate() {
        writeln!(out, "{}) -----------", index + 1)?;
        writeln!(out, "   name: {}", project.display_name())?;
        writeln!(out, "   master URL: {}", project.master_url)?;
        writeln!(out, "   user_name: {}", project.user_name)?;
        writeln!(out, "   team_name: {}", project.team_name)?;
        writeln!(out, "   resource share: {:.6}", project.resource_share)?;
        writeln!(out, "   user_total_credit: {:.6}", project.user_total_credit)?;
        writeln!(out, "   host_total_credit: {:.6}", project.host_total_credit)?;
        writeln!(out, "   suspended via GUI: {}", yes_no(project.suspended_via_gui))?;
        writeln!(out, "   don't request more work: {}", yes_no(project.dont_request_more_work))?;
        writeln!(out, "   detach when done: {}", yes_no(project.detach_when_done))?;
        writeln!(out, "   attached via account manager: {}", yes_no(project.attached_via_acct_mgr))?;
    }
    Ok(())
}

fn tasks_text<W: Write>(tasks: &[TaskResult], out: &mut W) -> io::Result<()> {
    heading(out, "Tasks")?;
    for (index, task) in tasks.iter().enumerate() {
        writeln!(out, "{}) -----------", index + 1)?;
        writeln!(out, "   name: {}", task.name)?;
        writeln!(out, "   WU name: {}", task.wu_name)?;
        writeln!(out, "   project URL: {}", task.project_url)?;
        writeln!(out, "   state: {}", task.state)?;
        writeln!(out, "   ready to report: {}", yes_no(task.ready_to_report))?;
        writeln!(out, "   suspended via GUI: {}", yes_no(task.suspended_via_gui))?;
        writeln!(
            out,
            "   report deadline: {}",
            format_timestamp(whole_seconds(task.report_deadline))
        )?;
        writeln!(
            out,
            "   estimated CPU time remaining: {:.6}",
            task.estimated_cpu_time_remaining
        )?;
        if let Some(active) = &task.active {
            writeln!(out, "   active_task_state: {:?}", active.active_task_state)?;
            writeln!(out, "   current CPU time: {:.6}", active.current_cpu_time)?;
            writeln!(out, "   elapsed time: {:.6}", active.elapsed_time)?;
            writeln!(out, "   fraction done: {:.6}", active.fraction_done)?;
        }
    }
    Ok(())
}

fn transfers_text<W: Write>(transfers: &[Transfer], out: &mut W) -> io::Result<()> {
    heading(out, "File transfers")?;
    for (index, transfer) in transfers.iter().enumerate() {
        writeln!(out, "{}) -----------", index + 1)?;
        writeln!(out, "   name: {}", transfer.name)?;
        writeln!(out, "   direction: {}", if transfer.is_upload { "upload" } else { "download" })?;
        writeln!(out, "   project URL: {}", transfer.project_url)?;
        writeln!(out, "   server: {}", transfer.hostname)?;
        writeln!(out, "   file size: {:.6}", transfer.nbytes)?;
        writeln!(out, "   bytes transferred: {:.6}", transfer.bytes_xferred)?;
        writeln!(out, "   transfer rate: {:.6}", transfer.xfer_speed)?;
        writeln!(out, "   retries: {}", transfer.num_retries)?;
        writeln!(out, "   active: {}", yes_no(transfer.xfer_active))?;
    }
    Ok(())
}

fn messages_text<W: Write>(messages: &[Message], out: &mut W) -> io::Result<()> {
    for message in messages {
        writeln!(
            out,
            "{}: {} ({}) [{}] {}",
            message.seqno,
            format_timestamp(message.timestamp),
            priority_name(message.priority),
            message.project,
            message.body.trim()
        )?;
    }
    Ok(())
}

fn priority_name(priority: i32) -> &'static str {
    match priority {
        1 => "low",
        2 => "user notification",
        3 => "internal error",
        _ => "unknown",
    }
}

fn notices_text<W: Write>(notices: &[Notice], out: &mut W) -> io::Result<()> {
    for notice in notices {
        writeln!(
            out,
            "{}: ({}) {}",
            notice.seqno,
            format_timestamp(whole_seconds(notice.create_time)),
            notice.title
        )?;
        if !notice.description.trim().is_empty() {
            writeln!(out, "{}", notice.description.trim())?;
        }
        if !notice.link.is_empty() {
            writeln!(out, "{}", notice.link)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn status_text<W: Write>(status: &CcStatus, out: &mut W) -> io::Result<()> {
    writeln!(out, "network connection status: {}", status.network_status)?;
    writeln!(out, "CPU status")?;
    writeln!(out, "    suspend reason: {}", status.task_suspend_reason)?;
    writeln!(out, "    mode: {}", mode_name(status.task_mode))?;
    writeln!(out, "    perm mode: {}", mode_name(status.task_mode_perm))?;
    writeln!(out, "    perm becomes current in {:.0} sec", status.task_mode_delay)?;
    writeln!(out, "GPU status")?;
    writeln!(out, "    suspend reason: {}", status.gpu_suspend_reason)?;
    writeln!(out, "    mode: {}", mode_name(status.gpu_mode))?;
    writeln!(out, "    perm mode: {}", mode_name(status.gpu_mode_perm))?;
    writeln!(out, "    perm becomes current in {:.0} sec", status.gpu_mode_delay)?;
    writeln!(out, "Network status")?;
    writeln!(out, "    suspend reason: {}", status.network_suspend_reason)?;
    writeln!(out, "    mode: {}", mode_name(status.network_mode))?;
    writeln!(out, "    perm mode: {}", mode_name(status.network_mode_perm))?;
    writeln!(out, "    perm becomes current in {:.0} sec", status.network_mode_delay)
}

fn host_text<W: Write>(host: &HostInfo, out: &mut W) -> io::Result<()> {
    writeln!(out, "  timezone: {}", host.timezone)?;
    writeln!(out, "  domain name: {}", host.domain_name)?;
    writeln!(out, "  IP addr: {}", host.ip_addr)?;
    writeln!(out, "  #CPUS: {}", host.p_ncpus)?;
    writeln!(out, "  CPU vendor: {}", host.p_vendor)?;
    writeln!(out, "  CPU model: {}", host.p_model)?;
    writeln!(out, "  CPU FP OPS: {:.6}", host.p_fpops)?;
    writeln!(out, "  CPU int OPS: {:.6}", host.p_iops)?;
    writeln!(out, "  OS name: {}", host.os_name)?;
    writeln!(out, "  OS version: {}", host.os_version)?;
    writeln!(out, "  memory size: {:.6}", host.m_nbytes)?;
    writeln!(out, "  swap size: {:.6}", host.m_swap)?;
    writeln!(out, "  disk size: {:.6}", host.d_total)?;
    writeln!(out, "  disk free: {:.6}", host.d_free)
}

fn prefs_text<W: Write>(prefs: &GlobalPreferences, out: &mut W) -> io::Result<()> {
    writeln!(out, "run_on_batteries: {}", yes_no(prefs.run_on_batteries))?;
    writeln!(out, "run_if_user_active: {}", yes_no(prefs.run_if_user_active))?;
    writeln!(out, "run_gpu_if_user_active: {}", yes_no(prefs.run_gpu_if_user_active))?;
    writeln!(out, "idle_time_to_run: {:.6}", prefs.idle_time_to_run)?;
    writeln!(out, "max_ncpus_pct: {:.6}", prefs.max_ncpus_pct)?;
    writeln!(out, "cpu_usage_limit: {:.6}", prefs.cpu_usage_limit)?;
    writeln!(out, "work_buf_min_days: {:.6}", prefs.work_buf_min_days)?;
    writeln!(out, "work_buf_additional_days: {:.6}", prefs.work_buf_additional_days)?;
    writeln!(out, "disk_max_used_gb: {:.6}", prefs.disk_max_used_gb)?;
    writeln!(out, "disk_max_used_pct: {:.6}", prefs.disk_max_used_pct)?;
    writeln!(out, "disk_min_free_gb: {:.6}", prefs.disk_min_free_gb)?;
    writeln!(out, "ram_max_used_busy_pct: {:.6}", prefs.ram_max_used_busy_pct)?;
    writeln!(out, "ram_max_used_idle_pct: {:.6}", prefs.ram_max_used_idle_pct)?;
    writeln!(out, "max_bytes_sec_up: {:.6}", prefs.max_bytes_sec_up)?;
    writeln!(out, "max_bytes_sec_down: {:.6}", prefs.max_bytes_sec_down)?;
    writeln!(
        out,
        "cpu hours: {:.2} - {:.2}",
        prefs.cpu_times.start_hour, prefs.cpu_times.end_hour
    )?;
    writeln!(
        out,
        "network hours: {:.2} - {:.2}",
        prefs.net_times.start_hour, prefs.net_times.end_hour
    )
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
