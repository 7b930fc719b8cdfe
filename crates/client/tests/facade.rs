//! Facade behaviour against the stub GUI-RPC server.

use client::{
    ClientConfig, ConnectionState, ExitCode, Mode, ProjectOp, RpcClient, TimeoutConfig,
};
use test_support::{Step, authorized_handshake, reply, spawn_stub_server};

fn client_for(port: u16) -> RpcClient {
    RpcClient::new(
        ClientConfig::builder()
            .tcp("127.0.0.1", port)
            .timeouts(TimeoutConfig::default().with_io_timeout(5))
            .build(),
    )
}

const PROJECT_STATUS: &str = "<projects>
<project>
    <master_url>http://einstein.phys.uwm.edu/</master_url>
    <project_name>Einstein@Home</project_name>
    <hostid>12</hostid>
</project>
<project>
    <master_url>http://milkyway.cs.rpi.edu/milkyway/</master_url>
    <project_name>Milkyway@home</project_name>
    <suspended_via_gui/>
</project>
</projects>";

#[test]
fn open_authorize_and_list_projects() {
    let mut steps = authorized_handshake("1700000000.5").to_vec();
    steps.push(reply(PROJECT_STATUS));
    let server = spawn_stub_server(steps);

    let client = client_for(server.port());
    assert_eq!(client.state(), ConnectionState::Disconnected);
    client.open().expect("open");
    assert_eq!(client.state(), ConnectionState::Connected);
    client.authorize("secret").expect("authorize");
    assert_eq!(client.state(), ConnectionState::Authenticated);

    let projects = client.get_project_status().expect("project status");
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].project_name, "Einstein@Home");
    assert_eq!(projects[0].hostid, 12);
    assert!(projects[1].suspended_via_gui);

    client.close();
    assert!(!client.is_alive());

    let requests = server.join();
    assert_eq!(requests[0], "<auth1/>");
    let hash = checksums::md5_hex(b"1700000000.5secret");
    assert_eq!(requests[1], format!("<auth2>\n<nonce_hash>{hash}</nonce_hash>\n</auth2>"));
    assert_eq!(requests[2], "<get_project_status/>");
}

#[test]
fn configured_password_authorizes_on_open() {
    let server = spawn_stub_server(authorized_handshake("n"));
    let client = RpcClient::new(
        ClientConfig::builder()
            .tcp("127.0.0.1", server.port())
            .password("pw")
            .build(),
    );
    client.open().expect("open");
    assert_eq!(client.state(), ConnectionState::Authenticated);
    drop(client);
    assert_eq!(server.join().len(), 2);
}

#[test]
fn rejected_configured_password_closes_the_connection() {
    let server = spawn_stub_server([reply("<nonce>n</nonce>"), reply("<unauthorized/>")]);
    let client = RpcClient::new(
        ClientConfig::builder()
            .tcp("127.0.0.1", server.port())
            .password("bad")
            .build(),
    );

    let error = client.open().expect_err("rejected");
    assert_eq!(error.code(), ExitCode::Unauthorized);
    assert_eq!(client.state(), ConnectionState::Disconnected);
    assert!(client.last_error().is_some());
    assert_eq!(server.join().len(), 2);
}

#[test]
fn rejected_password_reports_unauthorized() {
    let server = spawn_stub_server([reply("<nonce>n</nonce>"), reply("<unauthorized/>")]);
    let client = client_for(server.port());
    client.open().expect("open");

    let error = client.authorize("wrong").expect_err("rejected");
    assert_eq!(error.code(), ExitCode::Unauthorized);
    assert_eq!(client.state(), ConnectionState::Connected);
    assert!(client.last_error().is_some());
    drop(client);
    server.join();
}

#[test]
fn empty_password_fails_before_any_request() {
    let server = spawn_stub_server([]);
    let client = client_for(server.port());
    client.open().expect("open");

    let error = client.authorize("").expect_err("empty password");
    assert_eq!(error.code(), ExitCode::Unauthorized);
    drop(client);
    assert!(server.join().is_empty());
}

#[test]
fn commands_record_the_last_error() {
    let server = spawn_stub_server([
        reply("<error>no such project</error>"),
        reply("<success/>"),
        reply("<failure/>"),
    ]);
    let client = client_for(server.port());
    client.open().expect("open");

    assert!(!client.project_op(ProjectOp::Update, "http://nowhere/").expect("sent"));
    assert_eq!(client.last_error().as_deref(), Some("no such project"));

    assert!(client.set_run_mode(Mode::Never, 0.0).expect("sent"));
    assert_eq!(client.last_error(), None);

    assert!(!client.run_benchmarks().expect("sent"));
    assert!(client.last_error().is_some());
    drop(client);

    let requests = server.join();
    assert_eq!(
        requests[0],
        "<project_update>\n<project_url>http://nowhere/</project_url>\n</project_update>"
    );
    assert_eq!(
        requests[1],
        "<set_run_mode>\n<never/>\n<duration>0.000000</duration>\n</set_run_mode>"
    );
}

#[test]
fn undecodable_replies_become_empty_results() {
    let server = spawn_stub_server([
        Step::Reply("<boinc_gui_rpc_reply><projects><project".to_owned()),
        reply(""),
        reply("<cc_status>\n<network_status>0</network_status>\n</cc_status>"),
    ]);
    let client = client_for(server.port());
    client.open().expect("open");

    assert!(client.get_project_status().expect("connection fine").is_empty());
    assert_eq!(client.get_cc_status().expect("connection fine"), None);
    assert!(client.is_alive());
    drop(client);
    assert_eq!(server.join()[2], "<get_cc_status/>");
}

#[test]
fn dropped_connection_disconnects_the_facade() {
    let server = spawn_stub_server([Step::Hangup]);
    let client = client_for(server.port());
    client.open().expect("open");

    let error = client.get_state().expect_err("peer closed");
    assert_eq!(error.code(), ExitCode::Connection);
    assert_eq!(client.state(), ConnectionState::Disconnected);

    let again = client.get_cc_status().expect_err("still closed");
    assert_eq!(again.code(), ExitCode::Connection);
    server.join();
}

#[test]
fn open_reports_unreachable_endpoint() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client = client_for(port);
    let error = client.open().expect_err("nothing listening");
    assert_eq!(error.code(), ExitCode::Connection);
    assert!(!client.is_alive());
}

#[test]
fn poll_operations_surface_in_progress() {
    let server = spawn_stub_server([
        reply("<success/>"),
        reply("<account_out>\n<error_num>-204</error_num>\n</account_out>"),
        reply("<account_out>\n<authenticator>abc123</authenticator>\n</account_out>"),
    ]);
    let client = client_for(server.port());
    client.open().expect("open");

    let account = client::AccountIn {
        url: "http://x/".to_owned(),
        email_addr: "ann@example.org".to_owned(),
        password: "pw".to_owned(),
        ..client::AccountIn::default()
    };
    assert!(client.lookup_account(&account).expect("submitted"));

    let pending = client.lookup_account_poll().expect("poll").expect("reply");
    assert_eq!(pending.error_num, client::ERR_IN_PROGRESS);

    let done = client.lookup_account_poll().expect("poll").expect("reply");
    assert_eq!(done.error_num, 0);
    assert_eq!(done.authenticator, "abc123");
    drop(client);
    server.join();
}

#[test]
fn project_status_reply_reaches_the_caller() {
    let server = spawn_stub_server([Step::Reply(
        "<boinc_gui_rpc_reply><project_status><project><master_url>http://x/</master_url>\
         <project_name>X</project_name></project></project_status></boinc_gui_rpc_reply>"
            .to_owned(),
    )]);
    let client = client_for(server.port());
    client.open().expect("open");

    let projects = client.get_project_status().expect("project status");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].master_url, "http://x/");
    assert_eq!(projects[0].project_name, "X");
    drop(client);
    server.join();
}

#[test]
fn is_alive_probes_with_a_status_query() {
    let server = spawn_stub_server([reply(
        "<cc_status>\n<task_mode>2</task_mode>\n</cc_status>",
    )]);
    let client = client_for(server.port());
    client.open().expect("open");

    assert!(client.is_alive());
    assert_eq!(client.state(), ConnectionState::Connected);
    drop(client);
    assert_eq!(server.join(), vec!["<get_cc_status/>".to_owned()]);
}

#[test]
fn is_alive_detects_a_peer_that_went_away() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let peer = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        drop(stream);
    });

    let client = client_for(port);
    client.open().expect("open");
    peer.join().expect("peer thread");

    assert!(!client.is_alive());
    assert_eq!(client.state(), ConnectionState::Disconnected);
}
