#![no_main]

//! Fuzz target for reply decoding.
//!
//! Core clients of every vintage send slightly different XML. Every decoder
//! must turn arbitrary Latin-1 text into either a value or a `DecodeError`
//! without panicking.

use libfuzzer_sys::fuzz_target;
use protocol::{
    AllProjectsDecoder, CcStateDecoder, CcStatusDecoder, GlobalPrefsDecoder, MessagesDecoder,
    NoticesDecoder, ProjectsDecoder, ResultsDecoder, SimpleReplyDecoder, TransfersDecoder,
    decode_latin1, decode_reply,
};

fuzz_target!(|data: &[u8]| {
    let reply = decode_latin1(data);

    let _ = decode_reply(&reply, CcStateDecoder::new());
    let _ = decode_reply(&reply, CcStatusDecoder::new());
    let _ = decode_reply(&reply, ProjectsDecoder::new());
    let _ = decode_reply(&reply, ResultsDecoder::new());
    let _ = decode_reply(&reply, TransfersDecoder::new());
    let _ = decode_reply(&reply, MessagesDecoder::new());
    let _ = decode_reply(&reply, NoticesDecoder::new());
    let _ = decode_reply(&reply, GlobalPrefsDecoder::new());
    let _ = decode_reply(&reply, AllProjectsDecoder::new());
    let _ = decode_reply(&reply, SimpleReplyDecoder::new());
});
