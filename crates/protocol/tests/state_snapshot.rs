//! Cross-referencing of a full `get_state` snapshot.

use protocol::{ActiveTaskState, CcStateDecoder, ResultState, decode_reply};

const TWO_PROJECTS: &str = "<boinc_gui_rpc_reply>
<client_state>
<project><master_url>http://alpha.example/</master_url><project_name>Alpha</project_name></project>
<app><name>sim</name><user_friendly_name>Alpha Sim</user_friendly_name></app>
<app_version><app_name>sim</app_name><version_num>101</version_num></app_version>
<workunit><name>shared_wu</name><app_name>sim</app_name></workunit>
<result>
    <name>alpha_task</name>
    <wu_name>shared_wu</wu_name>
    <version_num>101</version_num>
    <state>2</state>
    <active_task>
        <active_task_state>1</active_task_state>
        <app_version_num>101</app_version_num>
        <fraction_done>0.25</fraction_done>
    </active_task>
</result>
<project><master_url>http://beta.example/</master_url><project_name>Beta</project_name></project>
<app><name>sim</name><user_friendly_name>Beta Sim</user_friendly_name></app>
<app_version><app_name>sim</app_name><version_num>7</version_num></app_version>
<workunit><name>shared_wu</name><app_name>sim</app_name></workunit>
<result>
    <name>beta_task</name>
    <wu_name>shared_wu</wu_name>
    <version_num>7</version_num>
    <state>5</state>
    <ready_to_report/>
</result>
</client_state>
</boinc_gui_rpc_reply>
";

#[test]
fn joins_stay_within_the_owning_project() {
    let state = decode_reply(TWO_PROJECTS, CcStateDecoder::new()).expect("decode");
    assert_eq!(state.results.len(), 2);

    let alpha = &state.results[0];
    assert_eq!(alpha.project_url, "http://alpha.example/");
    assert_eq!(alpha.app.as_ref().map(|app| app.display_name()), Some("Alpha Sim"));
    assert_eq!(alpha.app_version.as_ref().map(|av| av.version_num), Some(101));
    assert_eq!(
        alpha.workunit.as_ref().map(|wu| wu.project_url.as_str()),
        Some("http://alpha.example/")
    );
    assert_eq!(alpha.state, ResultState::FilesDownloaded);
    assert!(alpha.is_active());
    assert_eq!(
        alpha.active.as_ref().map(|task| task.active_task_state),
        Some(ActiveTaskState::Executing)
    );
    assert!((alpha.fraction_done() - 0.25).abs() < f64::EPSILON);

    let beta = &state.results[1];
    assert_eq!(beta.project_url, "http://beta.example/");
    assert_eq!(beta.app.as_ref().map(|app| app.display_name()), Some("Beta Sim"));
    assert_eq!(beta.app_version.as_ref().map(|av| av.version_num), Some(7));
    assert!(beta.ready_to_report);
    assert!(!beta.is_active());
}

#[test]
fn lookups_by_project_url_ignore_case() {
    let state = decode_reply(TWO_PROJECTS, CcStateDecoder::new()).expect("decode");
    let beta = state.project("HTTP://BETA.EXAMPLE/").expect("beta attached");
    assert_eq!(beta.project_name, "Beta");
    let names: Vec<_> = state
        .results_for("http://alpha.example/")
        .map(|result| result.name.as_str())
        .collect();
    assert_eq!(names, ["alpha_task"]);
}

#[test]
fn repeated_decodes_produce_equal_snapshots() {
    let first = decode_reply(TWO_PROJECTS, CcStateDecoder::new()).expect("decode");
    let second = decode_reply(TWO_PROJECTS, CcStateDecoder::new()).expect("decode");
    assert_eq!(first, second);
}
