//! Streaming tag events over GUI-RPC reply text.
//!
//! The core client does not always emit well-formed XML, so callers run
//! [`preprocess`] first and then pull [`TagEvent`]s from a [`TagStream`].
//! Tag names are lowercased because the wire protocol is inconsistent about
//! case. Empty elements (`<success/>`) yield a start event immediately
//! followed by the matching end event.

mod fields;
mod preprocess;

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::DecodeError;

pub(crate) use fields::{FieldAccumulator, assign, parse_bool};
pub use preprocess::{escape_text, preprocess};

/// One event of the tag stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagEvent {
    /// An element opened.
    Start {
        /// Lowercased tag name.
        name: String,
        /// Attribute name/value pairs in document order.
        attrs: Vec<(String, String)>,
    },
    /// An element closed.
    End {
        /// Lowercased tag name.
        name: String,
    },
    /// Character data between tags, with entities expanded.
    Text(String),
}

/// Pull-based tokenizer yielding [`TagEvent`]s.
///
/// End-tag names are not checked against their start tags. After the first
/// tokenizer error the stream yields that error once and then ends.
pub struct TagStream<'a> {
    reader: Reader<&'a [u8]>,
    pending_end: Option<String>,
    finished: bool,
}

impl<'a> TagStream<'a> {
    /// Creates a stream over already pre-processed text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.expand_empty_elements = false;
        config.trim_text(false);

        Self {
            reader,
            pending_end: None,
            finished: false,
        }
    }
}

impl Iterator for TagStream<'_> {
    type Item = Result<TagEvent, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.pending_end.take() {
            return Some(Ok(TagEvent::End { name }));
        }
        if self.finished {
            return None;
        }

        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(error) => {
                    self.finished = true;
                    let position = u64::try_from(self.reader.buffer_position()).unwrap_or(u64::MAX);
                    return Some(Err(DecodeError::malformed(position, error.to_string())));
                }
            };

            match event {
                Event::Start(start) => return Some(Ok(start_event(&start))),
                Event::Empty(start) => {
                    let event = start_event(&start);
                    if let TagEvent::Start { name, .. } = &event {
                        self.pending_end = Some(name.clone());
                    }
                    return Some(Ok(event));
                }
                Event::End(end) => {
                    return Some(Ok(TagEvent::End {
                        name: lowercase_name(end.name().as_ref()),
                    }));
                }
                Event::Text(text) => {
                    let content = match text.unescape() {
                        Ok(content) => content.into_owned(),
                        Err(_) => String::from_utf8_lossy(&text).into_owned(),
                    };
                    if !content.is_empty() {
                        return Some(Ok(TagEvent::Text(content)));
                    }
                }
                Event::CData(data) => {
                    let content = data.into_inner();
                    return Some(Ok(TagEvent::Text(
                        String::from_utf8_lossy(&content).into_owned(),
                    )));
                }
                Event::Eof => {
                    self.finished = true;
                    return None;
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
            }
        }
    }
}

fn start_event(start: &BytesStart<'_>) -> TagEvent {
    let attrs = start
        .attributes()
        .with_checks(false)
        .filter_map(Result::ok)
        .map(|attr| {
            let value = attr
                .unescape_value()
                .unwrap_or_else(|_| Cow::Owned(String::from_utf8_lossy(&attr.value).into_owned()));
            (lowercase_name(attr.key.as_ref()), value.into_owned())
        })
        .collect();

    TagEvent::Start {
        name: lowercase_name(start.name().as_ref()),
        attrs,
    }
}

fn lowercase_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}
