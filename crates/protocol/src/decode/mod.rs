//! Reply decoders.
//!
//! A decoder is a small state struct fed by [`decode_reply`]. The driver
//! pre-processes the reply, tokenizes it, accumulates the text of the
//! innermost element, and hands each end tag to the decoder together with
//! that element's trimmed text. Decoders therefore never see raw text events
//! and never buffer character data themselves.
//!
//! List replies share a generic list decoder, which allocates a fresh record when
//! the record's opening tag is seen and keeps it only if its mandatory key is
//! set when the record closes.

mod account;
mod messages;
mod prefs;
mod projects;
mod reply;
mod state;
mod status;
mod tasks;
mod transfers;

use crate::error::DecodeError;
use crate::xml::{FieldAccumulator, TagEvent, TagStream, preprocess};

pub use account::{
    AccountOutDecoder, AcctMgrInfoDecoder, AcctMgrRpcReplyDecoder, AllProjectsDecoder,
    ProjectAttachReplyDecoder, ProjectConfigDecoder,
};
pub use messages::{MessageCountDecoder, MessagesDecoder, NoticesDecoder};
pub use prefs::GlobalPrefsDecoder;
pub use projects::{AppVersionsDecoder, AppsDecoder, ProjectsDecoder, WorkunitsDecoder};
pub use reply::{AuthDecoder, AuthReply, SimpleReplyDecoder, VersionDecoder};
pub use state::CcStateDecoder;
pub use status::{CcStatusDecoder, HostInfoDecoder};
pub use tasks::ResultsDecoder;
pub use transfers::TransfersDecoder;

/// Event sink for one reply.
///
/// `end` receives the trimmed text accumulated since the most recent start
/// tag. For composite elements that text is empty.
pub trait Decoder {
    /// Value produced once the reply has been consumed.
    type Output;

    /// Called for every start tag, including the start half of empty elements.
    fn start(&mut self, name: &str) {
        let _ = name;
    }

    /// Called for every end tag.
    fn end(&mut self, name: &str, text: &str);

    /// Consumes the decoder and returns what it collected.
    fn finish(self) -> Self::Output;
}

/// Decodes `reply` with `decoder`.
///
/// Returns [`DecodeError::Empty`] for blank replies and
/// [`DecodeError::Malformed`] when the tokenizer gives up. Field conversion
/// problems are logged and never fail the decode.
pub fn decode_reply<D: Decoder>(reply: &str, mut decoder: D) -> Result<D::Output, DecodeError> {
    if reply.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    let text = preprocess(reply);
    let mut field = FieldAccumulator::default();

    for event in TagStream::new(&text) {
        match event? {
            TagEvent::Start { name, .. } => {
                field.open();
                decoder.start(&name);
            }
            TagEvent::Text(content) => field.push(&content),
            TagEvent::End { name } => {
                let value = field.take();
                decoder.end(&name, &value);
            }
        }
    }

    Ok(decoder.finish())
}

/// Declares a public decoder wrapping `ListDecoder` or `SingleDecoder`.
macro_rules! record_decoder {
    ($(#[$meta:meta])* $name:ident: list of $builder:ty => $record:ty) => {
        $(#[$meta])*
        #[derive(Default)]
        pub struct $name($crate::decode::ListDecoder<$builder>);

        record_decoder!(@impl $name => Vec<$record>);
    };
    ($(#[$meta:meta])* $name:ident: single $builder:ty => $record:ty) => {
        $(#[$meta])*
        #[derive(Default)]
        pub struct $name($crate::decode::SingleDecoder<$builder>);

        record_decoder!(@impl $name => Option<$record>);
    };
    (@impl $name:ident => $output:ty) => {
        impl $name {
            /// Creates an empty decoder.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl $crate::decode::Decoder for $name {
            type Output = $output;

            fn start(&mut self, name: &str) {
                $crate::decode::Decoder::start(&mut self.0, name);
            }

            fn end(&mut self, name: &str, text: &str) {
                $crate::decode::Decoder::end(&mut self.0, name, text);
            }

            fn finish(self) -> Self::Output {
                $crate::decode::Decoder::finish(self.0)
            }
        }
    };
}

pub(crate) use record_decoder;

/// Builds one record from the fields between its opening and closing tags.
pub(crate) trait RecordBuilder: Default {
    type Record;

    /// Tag that opens and closes the record.
    const TAG: &'static str;

    /// A start tag nested inside the record.
    fn start(&mut self, name: &str) {
        let _ = name;
    }

    /// An end tag nested inside the record, with its trimmed text.
    fn field(&mut self, name: &str, text: &str);

    /// Finishes the record, or `None` when its mandatory key is empty.
    fn build(self) -> Option<Self::Record>;
}

/// Collects every complete record of one type.
pub(crate) struct ListDecoder<B: RecordBuilder> {
    current: Option<B>,
    records: Vec<B::Record>,
}

impl<B: RecordBuilder> Default for ListDecoder<B> {
    fn default() -> Self {
        Self {
            current: None,
            records: Vec::new(),
        }
    }
}

impl<B: RecordBuilder> Decoder for ListDecoder<B> {
    type Output = Vec<B::Record>;

    fn start(&mut self, name: &str) {
        match &mut self.current {
            Some(builder) => builder.start(name),
            None if name == B::TAG => self.current = Some(B::default()),
            None => {}
        }
    }

    fn end(&mut self, name: &str, text: &str) {
        if name == B::TAG {
            if let Some(builder) = self.current.take() {
                match builder.build() {
                    Some(record) => self.records.push(record),
                    None => logging::trace_decode!("dropping <{}> without its key field", B::TAG),
                }
            }
        } else if let Some(builder) = &mut self.current {
            builder.field(name, text);
        }
    }

    fn finish(self) -> Self::Output {
        self.records
    }
}

/// Keeps the first complete record of one type.
pub(crate) struct SingleDecoder<B: RecordBuilder> {
    list: ListDecoder<B>,
}

impl<B: RecordBuilder> Default for SingleDecoder<B> {
    fn default() -> Self {
        Self {
            list: ListDecoder::default(),
        }
    }
}

impl<B: RecordBuilder> Decoder for SingleDecoder<B> {
    type Output = Option<B::Record>;

    fn start(&mut self, name: &str) {
        if self.list.records.is_empty() {
            self.list.start(name);
        }
    }

    fn end(&mut self, name: &str, text: &str) {
        if self.list.records.is_empty() {
            self.list.end(name, text);
        }
    }

    fn finish(self) -> Self::Output {
        self.list.records.into_iter().next()
    }
}
