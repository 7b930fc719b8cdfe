//! Runs the built `boinc-rpc` binary against a stub core client.

use assert_cmd::Command;
use predicates::prelude::*;
use test_support::{Step, authorized_handshake, reply, spawn_stub_server};

fn boinc_rpc() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_boinc-rpc"));
    command.env_remove("BOINC_RPC_PASSWORD").env_remove("BOINC_RPC_LOG");
    command
}

#[test]
fn help_lists_usage() {
    boinc_rpc()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(predicate::str::contains("Usage: boinc-rpc"));
}

#[test]
fn version_names_the_binary() {
    boinc_rpc()
        .arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("boinc-rpc "));
}

#[test]
fn unknown_command_exits_with_syntax_error() {
    boinc_rpc()
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown command 'frobnicate'"));
}

#[test]
fn unreachable_core_client_exits_with_connection_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("address").port()
    };

    boinc_rpc()
        .args(["--host", "127.0.0.1", "--port", &port.to_string(), "--passwd", "pw"])
        .arg("get_cc_status")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}

#[test]
fn get_cc_status_prints_modes() {
    let mut steps: Vec<Step> = authorized_handshake("99.5").to_vec();
    steps.push(reply(
        "<cc_status>\n<network_status>0</network_status>\n<task_mode>3</task_mode>\n\
         <task_mode_perm>2</task_mode_perm>\n<gpu_mode>2</gpu_mode>\n\
         <network_mode>1</network_mode>\n</cc_status>",
    ));
    let server = spawn_stub_server(steps);

    boinc_rpc()
        .args(["--host", "127.0.0.1", "--port", &server.port().to_string()])
        .args(["--passwd", "pw", "get_cc_status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CPU status\n    suspend reason: 0\n    mode: never\n"))
        .stdout(predicate::str::contains("Network status\n    suspend reason: 0\n    mode: always\n"));

    let requests = server.join();
    assert_eq!(requests.last().map(String::as_str), Some("<get_cc_status/>"));
}

#[test]
fn quit_exits_zero_on_success() {
    let mut steps: Vec<Step> = authorized_handshake("1.0").to_vec();
    steps.push(reply("<success/>"));
    let server = spawn_stub_server(steps);

    boinc_rpc()
        .args(["--host", "127.0.0.1", "--port", &server.port().to_string()])
        .args(["--passwd", "pw", "quit"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(server.join()[2], "<quit/>");
}
