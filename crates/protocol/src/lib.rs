#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! # Overview
//!
//! `protocol` implements the wire format spoken between a BOINC core client and
//! its GUI-RPC front-ends. It is pure: nothing here touches a socket. The
//! `rpc_io` crate moves the bytes and the `client` crate ties both together.
//!
//! # Design
//!
//! - The envelope layer frames request bodies and converts between text and
//!   the single-byte Latin-1 encoding used on the wire.
//! - [`command`] builds the body of every request.
//! - [`TagStream`] turns reply text into lowercased start, end and text
//!   events after [`preprocess`] has repaired the known quirks of the core
//!   client's output.
//! - The decoders consume those events through the [`Decoder`] trait and
//!   produce the typed records re-exported at the crate root.
//!
//! # Examples
//!
//! ```
//! use protocol::{ProjectsDecoder, command, decode_reply, frame_request};
//!
//! let frame = frame_request(&command::get_project_status()).expect("no ETX in body");
//! assert!(frame.ends_with(b"</boinc_gui_rpc_request>\n\x03"));
//!
//! let reply = "<boinc_gui_rpc_reply><projects><project>\
//!     <master_url>http://x/</master_url><project_name>X</project_name>\
//!     </project></projects></boinc_gui_rpc_reply>";
//! let projects = decode_reply(reply, ProjectsDecoder::new()).expect("well-formed");
//! assert_eq!(projects[0].project_name, "X");
//! ```

pub mod command;
mod decode;
mod envelope;
mod error;
// Record fields mirror the wire tags of the same name.
#[allow(missing_docs)]
mod records;
mod xml;

pub use decode::{
    AccountOutDecoder, AcctMgrInfoDecoder, AcctMgrRpcReplyDecoder, AllProjectsDecoder,
    AppVersionsDecoder, AppsDecoder, AuthDecoder, AuthReply, CcStateDecoder, CcStatusDecoder,
    Decoder, GlobalPrefsDecoder, HostInfoDecoder, MessageCountDecoder, MessagesDecoder,
    NoticesDecoder, ProjectAttachReplyDecoder, ProjectConfigDecoder, ProjectsDecoder,
    ResultsDecoder, SimpleReplyDecoder, TransfersDecoder, VersionDecoder, WorkunitsDecoder,
    decode_reply,
};
pub use envelope::{
    ETX, EnvelopeError, REPLY_TAG, REQUEST_CLOSE, REQUEST_OPEN, decode_latin1, encode_latin1,
    frame_request, unframe_request,
};
pub use error::DecodeError;
pub use records::{
    AccountManagerInfo, AccountOut, AcctMgrInfo, AcctMgrRpcReply, ActiveTask, ActiveTaskState,
    AllProjectsList, App, AppVersion, CcState, CcStatus, GlobalPreferences, GuiUrl, HostInfo,
    Message, Mode, Notice, ParseModeError, Project, ProjectAttachReply, ProjectConfig,
    ProjectInfo, ResourceDebt, ResultState, SimpleReply, TaskResult, TimePreferences, TimeSpan,
    Transfer, VersionInfo, Workunit,
};
pub use xml::{TagEvent, TagStream, escape_text, preprocess};

/// `error_num` reported by poll-style replies while the operation is still running.
pub const ERR_IN_PROGRESS: i32 = -204;
