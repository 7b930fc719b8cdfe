//! Nonce/MD5 challenge performed once per connection.

use std::io::{Read, Write};

use checksums::nonce_hash;
use protocol::{AuthDecoder, AuthReply, command, decode_reply};
use rpc_io::{Transport, TransportError};

/// Reasons an authorization attempt fails.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No password was supplied; nothing was sent.
    #[error("no GUI-RPC password supplied")]
    EmptyPassword,
    /// The core client rejected the password.
    #[error("the core client rejected the GUI-RPC password")]
    Unauthorized,
    /// A reply did not follow the handshake.
    #[error("authorization protocol error: {0}")]
    Protocol(String),
    /// The connection failed during the handshake.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Runs the `auth1`/`auth2` handshake on `transport`.
///
/// The empty password check happens before any I/O. Calling again on the same
/// connection repeats the handshake with a fresh nonce.
pub fn authorize<S: Read + Write>(
    transport: &mut Transport<S>,
    password: &str,
) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::EmptyPassword);
    }

    let challenge = exchange(transport, &command::auth1())?;
    let Some(nonce) = challenge.nonce else {
        logging::trace_auth!(warn, "auth1 reply carried no nonce");
        return Err(AuthError::Protocol("auth1 reply carried no nonce".to_owned()));
    };
    logging::trace_auth!("received nonce");

    let hash = nonce_hash(&nonce, password.as_bytes());
    let verdict = exchange(transport, &command::auth2(&hash))?;
    match verdict.authorized {
        Some(true) => {
            logging::trace_auth!("authorized");
            Ok(())
        }
        Some(false) => {
            logging::trace_auth!(warn, "password rejected");
            Err(AuthError::Unauthorized)
        }
        None => Err(AuthError::Protocol(
            "auth2 reply carried neither authorized nor unauthorized".to_owned(),
        )),
    }
}

fn exchange<S: Read + Write>(
    transport: &mut Transport<S>,
    request: &str,
) -> Result<AuthReply, AuthError> {
    let reply = transport.round_trip(request)?;
    decode_reply(&reply, AuthDecoder::new()).map_err(|error| AuthError::Protocol(error.to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::*;

    /// Duplex stream replaying canned replies and capturing requests.
    struct Canned {
        replies: Cursor<Vec<u8>>,
        requests: Vec<u8>,
    }

    impl Canned {
        fn new(replies: &[&str]) -> Transport<Self> {
            let mut bytes = Vec::new();
            for reply in replies {
                bytes.extend_from_slice(reply.as_bytes());
                bytes.push(0x03);
            }
            Transport::new(Self {
                replies: Cursor::new(bytes),
                requests: Vec::new(),
            })
        }
    }

    impl Read for Canned {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.replies.read(buf)
        }
    }

    impl Write for Canned {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.requests.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    const NONCE: &str = "<boinc_gui_rpc_reply>\n<nonce>1700000000.123456</nonce>\n</boinc_gui_rpc_reply>\n";

    fn requests(transport: &Transport<Canned>) -> String {
        String::from_utf8_lossy(&transport.get_ref().requests).into_owned()
    }

    #[test]
    fn empty_password_sends_nothing() {
        let mut transport = Canned::new(&[]);
        assert!(matches!(authorize(&mut transport, ""), Err(AuthError::EmptyPassword)));
        assert!(transport.get_ref().requests.is_empty());
    }

    #[test]
    fn successful_handshake_sends_nonce_hash() {
        let mut transport = Canned::new(&[NONCE, "<boinc_gui_rpc_reply><authorized/></boinc_gui_rpc_reply>"]);
        authorize(&mut transport, "hunter2").expect("authorized");

        let expected = checksums::md5_hex(b"1700000000.123456hunter2");
        let sent = requests(&transport);
        assert!(sent.contains("<auth1/>"));
        assert!(sent.contains(&format!("<nonce_hash>{expected}</nonce_hash>")));
        assert!(!sent.contains("hunter2"));
    }

    #[test]
    fn rejected_password_is_unauthorized() {
        let mut transport = Canned::new(&[NONCE, "<boinc_gui_rpc_reply><unauthorized/></boinc_gui_rpc_reply>"]);
        assert!(matches!(authorize(&mut transport, "wrong"), Err(AuthError::Unauthorized)));
    }

    #[test]
    fn missing_nonce_is_protocol_error() {
        let mut transport = Canned::new(&["<boinc_gui_rpc_reply><error>busy</error></boinc_gui_rpc_reply>"]);
        assert!(matches!(authorize(&mut transport, "pw"), Err(AuthError::Protocol(_))));
        assert!(!requests(&transport).contains("<auth2>"));
    }

    #[test]
    fn missing_verdict_is_protocol_error() {
        let mut transport = Canned::new(&[NONCE, "<boinc_gui_rpc_reply></boinc_gui_rpc_reply>"]);
        assert!(matches!(authorize(&mut transport, "pw"), Err(AuthError::Protocol(_))));
    }

    #[test]
    fn closed_connection_passes_through() {
        let mut transport = Canned::new(&[NONCE]);
        assert!(matches!(
            authorize(&mut transport, "pw"),
            Err(AuthError::Transport(TransportError::PeerClosed))
        ));
    }
}
