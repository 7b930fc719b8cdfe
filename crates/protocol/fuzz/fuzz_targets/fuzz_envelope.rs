#![no_main]

//! Fuzz target for request framing.
//!
//! Framing arbitrary text must either be refused (the body contains the
//! terminator) or unframe back to the Latin-1 rendering of the body.

use libfuzzer_sys::fuzz_target;
use protocol::{ETX, decode_latin1, encode_latin1, frame_request, unframe_request};

fuzz_target!(|body: String| {
    match frame_request(&body) {
        Ok(frame) => {
            assert_eq!(frame.iter().filter(|&&byte| byte == ETX).count(), 1);
            let inner = &frame[..frame.len() - 1];
            let expected = decode_latin1(&encode_latin1(&body));
            assert_eq!(unframe_request(inner).as_deref(), Some(expected.as_str()));
        }
        Err(_) => assert!(body.contains(char::from(ETX))),
    }
});
