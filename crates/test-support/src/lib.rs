#![deny(unsafe_code)]

//! In-process stand-in for a BOINC core client.
//!
//! [`spawn_stub_server`] listens on an ephemeral loopback port, accepts one
//! connection and answers each ETX-terminated request with the next scripted
//! [`Step`]. Joining the server returns the request bodies it received, so
//! tests can assert on exactly what went over the wire.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use protocol::{ETX, encode_latin1, unframe_request};

/// One scripted reaction to a request.
#[derive(Clone, Debug)]
pub enum Step {
    /// Answer with this reply text; the terminator is appended.
    Reply(String),
    /// Close the connection after reading the request.
    Hangup,
}

/// Wraps `body` in the `<boinc_gui_rpc_reply>` element.
pub fn reply(body: &str) -> Step {
    Step::Reply(format!("<boinc_gui_rpc_reply>\n{body}\n</boinc_gui_rpc_reply>\n"))
}

/// The `auth1` and `auth2` replies of a successful handshake.
pub fn authorized_handshake(nonce: &str) -> [Step; 2] {
    [
        reply(&format!("<nonce>{nonce}</nonce>")),
        reply("<authorized/>"),
    ]
}

/// Handle to a running stub server.
pub struct StubServer {
    address: SocketAddr,
    handle: JoinHandle<Vec<String>>,
}

impl StubServer {
    /// Loopback address the server listens on.
    pub const fn address(&self) -> SocketAddr {
        self.address
    }

    /// Port the server listens on.
    pub const fn port(&self) -> u16 {
        self.address.port()
    }

    /// Waits for the script to finish and returns the request bodies received.
    pub fn join(self) -> Vec<String> {
        self.handle.join().expect("stub server thread panicked")
    }
}

/// Starts a server that plays `steps` to its first connection.
///
/// After the last step the server keeps reading until the client closes the
/// connection, recording any further requests without answering them.
pub fn spawn_stub_server(steps: impl IntoIterator<Item = Step>) -> StubServer {
    let steps: Vec<Step> = steps.into_iter().collect();
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
    let address = listener.local_addr().expect("stub server address");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept client");
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("read timeout");
        serve(&mut stream, steps)
    });

    StubServer { address, handle }
}

fn serve(stream: &mut TcpStream, steps: Vec<Step>) -> Vec<String> {
    let mut requests = Vec::new();

    for step in steps {
        let Some(request) = read_request(stream) else {
            return requests;
        };
        requests.push(request);

        match step {
            Step::Reply(text) => {
                let mut frame = encode_latin1(&text);
                frame.push(ETX);
                stream.write_all(&frame).expect("write reply");
                stream.flush().expect("flush reply");
            }
            Step::Hangup => return requests,
        }
    }

    while let Some(request) = read_request(stream) {
        requests.push(request);
    }
    requests
}

fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut frame = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        match stream.read(&mut byte) {
            Ok(1) if byte[0] == ETX => break,
            Ok(1) => frame.push(byte[0]),
            _ => return None,
        }
    }
    Some(unframe_request(&frame).unwrap_or_else(|| String::from_utf8_lossy(&frame).into_owned()))
}
