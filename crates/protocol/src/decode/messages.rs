use super::{Decoder, RecordBuilder, record_decoder};
use crate::records::{Message, Notice};
use crate::xml::{assign, parse_bool};

#[derive(Default)]
pub(crate) struct MessageBuilder(Message);

impl RecordBuilder for MessageBuilder {
    type Record = Message;
    const TAG: &'static str = "msg";

    fn field(&mut self, name: &str, text: &str) {
        let message = &mut self.0;
        match name {
            "project" => message.project = text.to_owned(),
            "pri" => assign(&mut message.priority, name, text),
            "seqno" => assign(&mut message.seqno, name, text),
            "time" => assign(&mut message.timestamp, name, text),
            "body" => message.body = text.to_owned(),
            _ => {}
        }
    }

    fn build(self) -> Option<Message> {
        (self.0.seqno > 0).then_some(self.0)
    }
}

#[derive(Default)]
pub(crate) struct NoticeBuilder(Notice);

impl RecordBuilder for NoticeBuilder {
    type Record = Notice;
    const TAG: &'static str = "notice";

    fn field(&mut self, name: &str, text: &str) {
        let notice = &mut self.0;
        match name {
            "seqno" => assign(&mut notice.seqno, name, text),
            "title" => notice.title = text.to_owned(),
            "description" => notice.description = text.to_owned(),
            "create_time" => assign(&mut notice.create_time, name, text),
            "arrival_time" => assign(&mut notice.arrival_time, name, text),
            "is_private" => notice.is_private = parse_bool(text),
            "project_name" => notice.project_name = text.to_owned(),
            "category" => {
                notice.category = text.to_owned();
                notice.is_client_notice = text == "client";
                notice.is_server_notice = text == "server";
            }
            "link" => notice.link = text.to_owned(),
            _ => {}
        }
    }

    fn build(self) -> Option<Notice> {
        (self.0.seqno > 0).then_some(self.0)
    }
}

record_decoder! {
    /// Decodes the reply to `get_messages`.
    MessagesDecoder: list of MessageBuilder => Message
}

record_decoder! {
    /// Decodes the reply to `get_notices` and `get_notices_public`.
    NoticesDecoder: list of NoticeBuilder => Notice
}

/// Decodes the reply to `get_message_count`.
#[derive(Debug, Default)]
pub struct MessageCountDecoder {
    seqno: Option<i32>,
}

impl MessageCountDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for MessageCountDecoder {
    type Output = Option<i32>;

    fn end(&mut self, name: &str, text: &str) {
        if name == "seqno" && self.seqno.is_none() {
            let mut seqno = -1;
            assign(&mut seqno, name, text);
            if seqno >= 0 {
                self.seqno = Some(seqno);
            }
        }
    }

    fn finish(self) -> Option<i32> {
        self.seqno
    }
}
