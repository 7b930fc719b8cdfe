//! Request envelope and reply terminator of the GUI-RPC wire format.
//!
//! A request is the command body wrapped in `<boinc_gui_rpc_request>` tags and
//! followed by a single ETX (`0x03`) byte. Replies carry no length prefix; the
//! reader accumulates bytes until it observes the ETX terminator. Both
//! directions use a single-byte Latin-1 encoding.

use memchr::memchr;

/// End-of-text byte terminating every request and reply.
pub const ETX: u8 = 0x03;

/// Opening line of the request envelope.
pub const REQUEST_OPEN: &str = "<boinc_gui_rpc_request>\n";

/// Closing line of the request envelope, preceded by the newline that ends the body.
pub const REQUEST_CLOSE: &str = "\n</boinc_gui_rpc_request>\n";

/// Root element of every reply.
pub const REPLY_TAG: &str = "boinc_gui_rpc_reply";

/// Errors raised while framing a request.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EnvelopeError {
    /// The command body contained the ETX terminator and would split the frame.
    #[error("command body contains the ETX terminator at byte {offset}")]
    EmbeddedTerminator {
        /// Byte offset of the offending terminator within the body.
        offset: usize,
    },
}

/// Wraps `body` in the request envelope and appends the ETX terminator.
///
/// Characters outside Latin-1 are replaced with `?`.
pub fn frame_request(body: &str) -> Result<Vec<u8>, EnvelopeError> {
    let encoded = encode_latin1(body);
    if let Some(offset) = memchr(ETX, &encoded) {
        return Err(EnvelopeError::EmbeddedTerminator { offset });
    }

    let mut frame = Vec::with_capacity(REQUEST_OPEN.len() + encoded.len() + REQUEST_CLOSE.len() + 1);
    frame.extend_from_slice(REQUEST_OPEN.as_bytes());
    frame.extend_from_slice(&encoded);
    frame.extend_from_slice(REQUEST_CLOSE.as_bytes());
    frame.push(ETX);
    Ok(frame)
}

/// Recovers the command body from a request frame.
///
/// The trailing ETX is optional so callers may pass either the raw frame or
/// the message a framed reader already stripped. Returns `None` when the
/// envelope tags are missing.
#[must_use]
pub fn unframe_request(frame: &[u8]) -> Option<String> {
    let frame = frame.strip_suffix(&[ETX]).unwrap_or(frame);
    let text = decode_latin1(frame);
    text.strip_prefix(REQUEST_OPEN)?
        .strip_suffix(REQUEST_CLOSE)
        .map(str::to_owned)
}

/// Encodes text as Latin-1, substituting `?` for unrepresentable characters.
#[must_use]
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}

/// Decodes Latin-1 bytes; every byte maps to the code point of the same value.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
