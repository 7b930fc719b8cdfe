use super::{Decoder, RecordBuilder};
use super::projects::{AppBuilder, AppVersionBuilder, ProjectBuilder, WorkunitBuilder};
use super::status::HostInfoBuilder;
use super::tasks::ResultBuilder;
use crate::records::{App, CcState, Project, TaskResult, Workunit};
use crate::xml::{assign, parse_bool};

/// Record currently being built; at most one is open at a time.
#[derive(Default)]
enum Section {
    #[default]
    Outside,
    HostInfo(HostInfoBuilder),
    Project(ProjectBuilder),
    App(AppBuilder),
    AppVersion(AppVersionBuilder),
    Workunit(WorkunitBuilder),
    Result(ResultBuilder),
}

impl Section {
    fn open(name: &str) -> Option<Self> {
        let section = match name {
            HostInfoBuilder::TAG => Self::HostInfo(HostInfoBuilder::default()),
            ProjectBuilder::TAG => Self::Project(ProjectBuilder::default()),
            AppBuilder::TAG => Self::App(AppBuilder::default()),
            AppVersionBuilder::TAG => Self::AppVersion(AppVersionBuilder::default()),
            WorkunitBuilder::TAG => Self::Workunit(WorkunitBuilder::default()),
            ResultBuilder::TAG => Self::Result(ResultBuilder::default()),
            _ => return None,
        };
        Some(section)
    }

    fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Outside => None,
            Self::HostInfo(_) => Some(HostInfoBuilder::TAG),
            Self::Project(_) => Some(ProjectBuilder::TAG),
            Self::App(_) => Some(AppBuilder::TAG),
            Self::AppVersion(_) => Some(AppVersionBuilder::TAG),
            Self::Workunit(_) => Some(WorkunitBuilder::TAG),
            Self::Result(_) => Some(ResultBuilder::TAG),
        }
    }

    fn start(&mut self, name: &str) {
        match self {
            Self::Outside => {}
            Self::HostInfo(builder) => builder.start(name),
            Self::Project(builder) => builder.start(name),
            Self::App(builder) => builder.start(name),
            Self::AppVersion(builder) => builder.start(name),
            Self::Workunit(builder) => builder.start(name),
            Self::Result(builder) => builder.start(name),
        }
    }

    fn field(&mut self, name: &str, text: &str) {
        match self {
            Self::Outside => {}
            Self::HostInfo(builder) => builder.field(name, text),
            Self::Project(builder) => builder.field(name, text),
            Self::App(builder) => builder.field(name, text),
            Self::AppVersion(builder) => builder.field(name, text),
            Self::Workunit(builder) => builder.field(name, text),
            Self::Result(builder) => builder.field(name, text),
        }
    }
}

/// Decodes a `get_state` snapshot.
///
/// Apps, app versions, workunits and results that follow a `<project>` belong
/// to that project. Each task is joined to its workunit, app and app version
/// as it closes, using only records already seen in the same snapshot.
#[derive(Default)]
pub struct CcStateDecoder {
    state: CcState,
    section: Section,
    project_url: String,
}

impl CcStateDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn close_section(&mut self) {
        match std::mem::take(&mut self.section) {
            Section::Outside => {}
            Section::HostInfo(builder) => self.state.host_info = builder.into_inner(),
            Section::Project(builder) => {
                if let Some(project) = builder.build() {
                    self.add_project(project);
                }
            }
            Section::App(builder) => {
                if let Some(mut app) = builder.build() {
                    app.project_url.clone_from(&self.project_url);
                    self.state.apps.push(app);
                }
            }
            Section::AppVersion(builder) => {
                if let Some(mut version) = builder.build() {
                    version.project_url.clone_from(&self.project_url);
                    self.state.app_versions.push(version);
                }
            }
            Section::Workunit(builder) => {
                if let Some(mut workunit) = builder.build() {
                    workunit.project_url.clone_from(&self.project_url);
                    self.state.workunits.push(workunit);
                }
            }
            Section::Result(builder) => {
                if let Some(mut result) = builder.build() {
                    result.project_url.clone_from(&self.project_url);
                    self.join_result(&mut result);
                    self.state.results.push(result);
                }
            }
        }
    }

    fn add_project(&mut self, project: Project) {
        self.project_url.clone_from(&project.master_url);
        self.state.projects.push(project);
    }

    fn join_result(&self, result: &mut TaskResult) {
        let project_url = result.project_url.as_str();
        let workunit = find_workunit(&self.state.workunits, project_url, &result.wu_name);
        let app = workunit.and_then(|workunit| find_app(&self.state.apps, project_url, &workunit.app_name));
        let version_num = result.effective_version_num();

        let app_version = match workunit {
            Some(workunit) => self
                .state
                .app_versions
                .iter()
                .find(|version| version.matches(project_url, &workunit.app_name, version_num, &result.plan_class)),
            None => self
                .state
                .app_versions
                .iter()
                .find(|version| version.matches_build(project_url, version_num, &result.plan_class)),
        };

        if workunit.is_none() {
            logging::trace_decode!("task {} references unknown workunit {}", result.name, result.wu_name);
        }
        result.workunit = workunit.cloned();
        result.app = app.cloned();
        result.app_version = app_version.cloned();
    }

    fn outside_field(&mut self, name: &str, text: &str) {
        let state = &mut self.state;
        match name {
            "core_client_major_version" => assign(&mut state.version_info.major, name, text),
            "core_client_minor_version" => assign(&mut state.version_info.minor, name, text),
            "core_client_release" => assign(&mut state.version_info.release, name, text),
            "platform_name" => state.platform_name = text.to_owned(),
            "have_ati" => state.have_ati = parse_bool(text),
            "have_cuda" => state.have_cuda = parse_bool(text),
            _ => {}
        }
    }
}

fn find_workunit<'a>(workunits: &'a [Workunit], project_url: &str, name: &str) -> Option<&'a Workunit> {
    workunits.iter().find(|workunit| workunit.matches(project_url, name))
}

fn find_app<'a>(apps: &'a [App], project_url: &str, name: &str) -> Option<&'a App> {
    apps.iter().find(|app| app.matches(project_url, name))
}

impl Decoder for CcStateDecoder {
    type Output = CcState;

    fn start(&mut self, name: &str) {
        if let Section::Outside = self.section {
            if name == "client_state" {
                self.state = CcState::default();
                self.project_url.clear();
            } else if let Some(section) = Section::open(name) {
                self.section = section;
            }
        } else {
            self.section.start(name);
        }
    }

    fn end(&mut self, name: &str, text: &str) {
        match self.section.tag() {
            Some(tag) if tag == name => self.close_section(),
            Some(_) => self.section.field(name, text),
            None => self.outside_field(name, text),
        }
    }

    fn finish(self) -> CcState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_reply;

    const SNAPSHOT: &str = "<boinc_gui_rpc_reply>\n<client_state>\n\
        <host_info><domain_name>crunch</domain_name><p_ncpus>8</p_ncpus></host_info>\n\
        <core_client_major_version>7</core_client_major_version>\n\
        <core_client_minor_version>24</core_client_minor_version>\n\
        <core_client_release>1</core_client_release>\n\
        <platform_name>x86_64-pc-linux-gnu</platform_name>\n\
        <project><master_url>http://p/</master_url><project_name>P</project_name></project>\n\
        <app><name>A</name><user_friendly_name>App A</user_friendly_name></app>\n\
        <app_version><app_name>A</app_name><version_num>3</version_num><plan_class>x86</plan_class></app_version>\n\
        <app_version><app_name>A</app_name><version_num>3</version_num><plan_class>cuda</plan_class></app_version>\n\
        <workunit><name>W</name><app_name>A</app_name></workunit>\n\
        <result><name>R1</name><wu_name>W</wu_name><version_num>3</version_num><plan_class>x86</plan_class></result>\n\
        <result><name>R2</name><wu_name>W</wu_name><version_num>4</version_num><plan_class>x86</plan_class></result>\n\
        <project><master_url>http://q/</master_url></project>\n\
        <app><name>A</name></app>\n\
        </client_state>\n</boinc_gui_rpc_reply>\n";

    #[test]
    fn decodes_snapshot_and_joins_results() {
        let state = decode_reply(SNAPSHOT, CcStateDecoder::new()).expect("decode");

        assert_eq!(state.host_info.domain_name, "crunch");
        assert_eq!(state.host_info.p_ncpus, 8);
        assert_eq!(state.version_info.to_string(), "7.24.1");
        assert_eq!(state.platform_name, "x86_64-pc-linux-gnu");
        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.apps.len(), 2);
        assert_eq!(state.apps[0].project_url, "http://p/");
        assert_eq!(state.apps[1].project_url, "http://q/");

        let joined = &state.results[0];
        assert_eq!(joined.project_url, "http://p/");
        assert_eq!(joined.workunit.as_ref().map(|wu| wu.name.as_str()), Some("W"));
        assert_eq!(joined.app.as_ref().map(App::display_name), Some("App A"));
        assert_eq!(joined.app_version.as_ref(), Some(&state.app_versions[0]));

        let unresolved = &state.results[1];
        assert!(unresolved.workunit.is_some());
        assert!(unresolved.app_version.is_none());
    }

    #[test]
    fn falls_back_to_build_match_without_workunit() {
        let reply = "<client_state>\
            <project><master_url>http://p/</master_url></project>\
            <app><name>A</name></app>\
            <app_version><app_name>A</app_name><version_num>3</version_num><plan_class>x86</plan_class></app_version>\
            <result><name>R</name><wu_name>W</wu_name><plan_class>x86</plan_class>\
              <active_task><app_version_num>3</app_version_num></active_task></result>\
            </client_state>";
        let state = decode_reply(reply, CcStateDecoder::new()).expect("decode");
        let result = &state.results[0];
        assert!(result.workunit.is_none());
        assert!(result.app.is_none());
        assert_eq!(result.app_version.as_ref(), Some(&state.app_versions[0]));
    }

    #[test]
    fn lists_reset_on_each_snapshot() {
        let twice = format!("{SNAPSHOT}{SNAPSHOT}")
            .replace("</boinc_gui_rpc_reply>\n<boinc_gui_rpc_reply>", "");
        let state = decode_reply(&twice, CcStateDecoder::new()).expect("decode");
        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.results.len(), 2);
    }

    #[test]
    fn decoding_is_idempotent() {
        let first = decode_reply(SNAPSHOT, CcStateDecoder::new()).expect("decode");
        let second = decode_reply(SNAPSHOT, CcStateDecoder::new()).expect("decode");
        assert_eq!(first, second);
    }

    #[test]
    fn records_missing_keys_are_dropped() {
        let reply = "<client_state>\
            <project><project_name>nameless</project_name></project>\
            <workunit><app_name>A</app_name></workunit>\
            <result><name></name></result>\
            </client_state>";
        let state = decode_reply(reply, CcStateDecoder::new()).expect("decode");
        assert!(state.projects.is_empty());
        assert!(state.workunits.is_empty());
        assert!(state.results.is_empty());
    }
}
