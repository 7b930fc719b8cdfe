use super::{RecordBuilder, record_decoder};
use crate::records::{App, AppVersion, GuiUrl, Project, Workunit};
use crate::xml::{assign, parse_bool};

#[derive(Default)]
pub(crate) struct ProjectBuilder {
    project: Project,
    gui_url: Option<GuiUrl>,
}

impl RecordBuilder for ProjectBuilder {
    type Record = Project;
    const TAG: &'static str = "project";

    fn start(&mut self, name: &str) {
        if name == "gui_url" {
            self.gui_url = Some(GuiUrl::default());
        }
    }

    fn field(&mut self, name: &str, text: &str) {
        if name == "gui_url" {
            if let Some(link) = self.gui_url.take() {
                self.project.gui_urls.push(link);
            }
            return;
        }
        if let Some(link) = &mut self.gui_url {
            match name {
                "name" => link.name = text.to_owned(),
                "description" => link.description = text.to_owned(),
                "url" => link.url = text.to_owned(),
                _ => {}
            }
            return;
        }

        let project = &mut self.project;
        match name {
            "master_url" => project.master_url = text.to_owned(),
            "project_dir" => project.project_dir = text.to_owned(),
            "resource_share" => assign(&mut project.resource_share, name, text),
            "project_name" => project.project_name = text.to_owned(),
            "user_name" => project.user_name = text.to_owned(),
            "team_name" => project.team_name = text.to_owned(),
            "host_venue" => project.host_venue = text.to_owned(),
            "hostid" => assign(&mut project.hostid, name, text),
            "user_total_credit" => assign(&mut project.user_total_credit, name, text),
            "user_expavg_credit" => assign(&mut project.user_expavg_credit, name, text),
            "host_total_credit" => assign(&mut project.host_total_credit, name, text),
            "host_expavg_credit" => assign(&mut project.host_expavg_credit, name, text),
            "disk_usage" => assign(&mut project.disk_usage, name, text),
            "nrpc_failures" => assign(&mut project.nrpc_failures, name, text),
            "master_fetch_failures" => assign(&mut project.master_fetch_failures, name, text),
            "min_rpc_time" => assign(&mut project.min_rpc_time, name, text),
            "download_backoff" => assign(&mut project.download_backoff, name, text),
            "upload_backoff" => assign(&mut project.upload_backoff, name, text),
            "cpu_short_term_debt" | "short_term_debt" => {
                assign(&mut project.cpu.short_term_debt, name, text);
            }
            "cpu_long_term_debt" | "long_term_debt" => {
                assign(&mut project.cpu.long_term_debt, name, text);
            }
            "cpu_backoff_time" => assign(&mut project.cpu.backoff_time, name, text),
            "cpu_backoff_interval" => assign(&mut project.cpu.backoff_interval, name, text),
            "cuda_short_term_debt" => assign(&mut project.cuda.short_term_debt, name, text),
            "cuda_debt" => assign(&mut project.cuda.long_term_debt, name, text),
            "cuda_backoff_time" => assign(&mut project.cuda.backoff_time, name, text),
            "cuda_backoff_interval" => assign(&mut project.cuda.backoff_interval, name, text),
            "ati_short_term_debt" => assign(&mut project.ati.short_term_debt, name, text),
            "ati_debt" => assign(&mut project.ati.long_term_debt, name, text),
            "ati_backoff_time" => assign(&mut project.ati.backoff_time, name, text),
            "ati_backoff_interval" => assign(&mut project.ati.backoff_interval, name, text),
            "duration_correction_factor" => {
                assign(&mut project.duration_correction_factor, name, text);
            }
            "anonymous_platform" => project.anonymous_platform = parse_bool(text),
            "master_url_fail" => project.master_url_fail = parse_bool(text),
            "sched_rpc_pending" => assign(&mut project.sched_rpc_pending, name, text),
            "trickle_up_pending" => project.trickle_up_pending = parse_bool(text),
            "scheduler_rpc_in_progress" => project.scheduler_rpc_in_progress = parse_bool(text),
            "suspended_via_gui" => project.suspended_via_gui = parse_bool(text),
            "dont_request_more_work" => project.dont_request_more_work = parse_bool(text),
            "ended" => project.ended = parse_bool(text),
            "attached_via_acct_mgr" => project.attached_via_acct_mgr = parse_bool(text),
            "detach_when_done" => project.detach_when_done = parse_bool(text),
            "no_cpu_pref" => project.no_cpu_pref = parse_bool(text),
            "no_cuda_pref" => project.no_cuda_pref = parse_bool(text),
            "no_ati_pref" => project.no_ati_pref = parse_bool(text),
            "last_rpc_time" => assign(&mut project.last_rpc_time, name, text),
            "project_files_downloaded_time" => {
                assign(&mut project.project_files_downloaded_time, name, text);
            }
            _ => {}
        }
    }

    fn build(self) -> Option<Project> {
        (!self.project.master_url.is_empty()).then_some(self.project)
    }
}

#[derive(Default)]
pub(crate) struct AppBuilder(App);

impl RecordBuilder for AppBuilder {
    type Record = App;
    const TAG: &'static str = "app";

    fn field(&mut self, name: &str, text: &str) {
        match name {
            "name" => self.0.name = text.to_owned(),
            "user_friendly_name" => self.0.user_friendly_name = text.to_owned(),
            "non_cpu_intensive" => self.0.non_cpu_intensive = parse_bool(text),
            _ => {}
        }
    }

    fn build(self) -> Option<App> {
        (!self.0.name.is_empty()).then_some(self.0)
    }
}

#[derive(Default)]
pub(crate) struct AppVersionBuilder(AppVersion);

impl RecordBuilder for AppVersionBuilder {
    type Record = AppVersion;
    const TAG: &'static str = "app_version";

    fn field(&mut self, name: &str, text: &str) {
        let version = &mut self.0;
        match name {
            "app_name" => version.app_name = text.to_owned(),
            "version_num" => assign(&mut version.version_num, name, text),
            "platform" => version.platform = text.to_owned(),
            "plan_class" => version.plan_class = text.to_owned(),
            "api_version" => version.api_version = text.to_owned(),
            "avg_ncpus" => assign(&mut version.avg_ncpus, name, text),
            "max_ncpus" => assign(&mut version.max_ncpus, name, text),
            "gpu_ram" => assign(&mut version.gpu_ram, name, text),
            "flops" => assign(&mut version.flops, name, text),
            _ => {}
        }
    }

    fn build(self) -> Option<AppVersion> {
        (!self.0.app_name.is_empty()).then_some(self.0)
    }
}

#[derive(Default)]
pub(crate) struct WorkunitBuilder(Workunit);

impl RecordBuilder for WorkunitBuilder {
    type Record = Workunit;
    const TAG: &'static str = "workunit";

    fn field(&mut self, name: &str, text: &str) {
        let workunit = &mut self.0;
        match name {
            "name" => workunit.name = text.to_owned(),
            "app_name" => workunit.app_name = text.to_owned(),
            "version_num" => assign(&mut workunit.version_num, name, text),
            "rsc_fpops_est" => assign(&mut workunit.rsc_fpops_est, name, text),
            "rsc_fpops_bound" => assign(&mut workunit.rsc_fpops_bound, name, text),
            "rsc_memory_bound" => assign(&mut workunit.rsc_memory_bound, name, text),
            "rsc_disk_bound" => assign(&mut workunit.rsc_disk_bound, name, text),
            _ => {}
        }
    }

    fn build(self) -> Option<Workunit> {
        (!self.0.name.is_empty()).then_some(self.0)
    }
}

record_decoder! {
    /// Decodes the reply to `get_project_status`.
    ProjectsDecoder: list of ProjectBuilder => Project
}

record_decoder! {
    /// Decodes a list of `<app>` records.
    AppsDecoder: list of AppBuilder => App
}

record_decoder! {
    /// Decodes a list of `<app_version>` records.
    AppVersionsDecoder: list of AppVersionBuilder => AppVersion
}

record_decoder! {
    /// Decodes a list of `<workunit>` records.
    WorkunitsDecoder: list of WorkunitBuilder => Workunit
}
