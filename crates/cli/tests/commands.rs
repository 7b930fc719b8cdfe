//! End-to-end command runs against the stub GUI-RPC server.

use test_support::{Step, authorized_handshake, reply, spawn_stub_server};

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut argv = vec!["boinc-rpc"];
    argv.extend_from_slice(args);
    let code = cli::run(argv, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).expect("utf-8 stdout"),
        String::from_utf8(stderr).expect("utf-8 stderr"),
    )
}

fn handshake_then(step: Step) -> Vec<Step> {
    let mut steps = authorized_handshake("4242.5").to_vec();
    steps.push(step);
    steps
}

#[test]
fn get_project_status_prints_projects() {
    let server = spawn_stub_server(handshake_then(reply(
        "<projects><project>\
         <master_url>http://x/</master_url><project_name>X</project_name>\
         <user_name>ann</user_name></project></projects>",
    )));
    let port = server.port().to_string();

    let (code, stdout, stderr) = run_cli(&[
        "--host", "127.0.0.1", "--port", &port, "--passwd", "pw", "get_project_status",
    ]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.starts_with("======== Projects ========\n1) -----------\n   name: X\n"));
    assert!(stdout.contains("   user_name: ann\n"));

    let requests = server.join();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0], "<auth1/>");
    assert_eq!(requests[2], "<get_project_status/>");
}

#[test]
fn host_option_may_carry_the_port() {
    let server = spawn_stub_server(handshake_then(reply("<success/>")));
    let host = format!("127.0.0.1:{}", server.port());

    let (code, stdout, _) = run_cli(&["--host", &host, "--passwd", "pw", "run_benchmarks"]);

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert_eq!(server.join()[2], "<run_benchmarks/>");
}

#[test]
fn set_run_mode_sends_mode_and_duration() {
    let server = spawn_stub_server(handshake_then(reply("<success/>")));
    let port = server.port().to_string();

    let (code, _, _) = run_cli(&[
        "--port", &port, "--host", "127.0.0.1", "--passwd", "pw", "set_run_mode", "never", "600",
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        server.join()[2],
        "<set_run_mode>\n<never/>\n<duration>600.000000</duration>\n</set_run_mode>"
    );
}

#[test]
fn rejected_command_reports_core_client_error() {
    let server = spawn_stub_server(handshake_then(reply("<error>no such project</error>")));
    let port = server.port().to_string();

    let (code, stdout, stderr) = run_cli(&[
        "--host", "127.0.0.1", "--port", &port, "--passwd", "pw", "project", "http://y/", "update",
    ]);

    assert_eq!(code, 6);
    assert!(stdout.is_empty());
    assert_eq!(stderr, "boinc-rpc: no such project\n");
    assert_eq!(
        server.join()[2],
        "<project_update>\n<project_url>http://y/</project_url>\n</project_update>"
    );
}

#[test]
fn wrong_password_exits_unauthorized() {
    let server = spawn_stub_server([reply("<nonce>1.0</nonce>"), reply("<unauthorized/>")]);
    let port = server.port().to_string();

    let (code, stdout, stderr) =
        run_cli(&["--host", "127.0.0.1", "--port", &port, "--passwd", "bad", "get_cc_status"]);

    assert_eq!(code, 3);
    assert!(stdout.is_empty());
    assert!(stderr.starts_with("boinc-rpc: "));
    assert_eq!(server.join().len(), 2);
}

#[test]
fn password_file_is_used_for_the_handshake() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gui_rpc_auth.cfg");
    std::fs::write(&path, "from-file\n").expect("write password");

    let server = spawn_stub_server(handshake_then(reply("<seqno>12</seqno>")));
    let port = server.port().to_string();
    let path = path.to_str().expect("utf-8 path");

    let (code, stdout, _) = run_cli(&[
        "--host", "127.0.0.1", "--port", &port, "--passwd-file", path, "get_message_count",
    ]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "12\n");
    let requests = server.join();
    let hash = checksums_hash("4242.5from-file");
    assert_eq!(requests[1], format!("<auth2>\n<nonce_hash>{hash}</nonce_hash>\n</auth2>"));
}

#[test]
fn undecodable_reply_is_a_protocol_error() {
    let server = spawn_stub_server(handshake_then(reply("<unexpected/>")));
    let port = server.port().to_string();

    let (code, _, stderr) =
        run_cli(&["--host", "127.0.0.1", "--port", &port, "--passwd", "pw", "get_host_info"]);

    assert_eq!(code, 4);
    assert!(stderr.contains("could not be decoded"));
    server.join();
}

#[test]
fn dropped_connection_is_a_connection_error() {
    let server = spawn_stub_server(handshake_then(Step::Hangup));
    let port = server.port().to_string();

    let (code, _, _) =
        run_cli(&["--host", "127.0.0.1", "--port", &port, "--passwd", "pw", "get_state"]);

    assert_eq!(code, 2);
    server.join();
}

#[cfg(feature = "json")]
#[test]
fn json_output_serializes_records() {
    let server = spawn_stub_server(handshake_then(reply(
        "<msgs><msg><project>X</project><pri>1</pri><seqno>3</seqno>\
         <body>hello</body><time>0</time></msg></msgs>",
    )));
    let port = server.port().to_string();

    let (code, stdout, _) = run_cli(&[
        "--host", "127.0.0.1", "--port", &port, "--passwd", "pw", "--json", "get_messages", "2",
    ]);

    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json output");
    assert_eq!(value[0]["seqno"], 3);
    assert_eq!(value[0]["body"], "hello");
    assert_eq!(
        server.join()[2],
        "<get_messages>\n <seqno>2</seqno>\n</get_messages>"
    );
}

fn checksums_hash(text: &str) -> String {
    checksums::md5_hex(text.as_bytes())
}
