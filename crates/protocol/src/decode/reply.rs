use super::Decoder;
use crate::records::{SimpleReply, VersionInfo};
use crate::xml::assign;

/// Decodes the `<success/>`, `<failure/>` or `<error>` reply of a mutating command.
///
/// The first marker wins; anything after it is ignored.
#[derive(Debug, Default)]
pub struct SimpleReplyDecoder {
    reply: Option<SimpleReply>,
}

impl SimpleReplyDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for SimpleReplyDecoder {
    type Output = Option<SimpleReply>;

    fn end(&mut self, name: &str, text: &str) {
        if self.reply.is_some() {
            return;
        }
        self.reply = match name {
            "success" => Some(SimpleReply::Success),
            "failure" => Some(SimpleReply::Failure),
            "error" => Some(SimpleReply::Error(text.to_owned())),
            _ => None,
        };
    }

    fn finish(self) -> Option<SimpleReply> {
        self.reply
    }
}

/// What an `auth1` or `auth2` reply carried.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuthReply {
    /// First non-empty `<nonce>`.
    pub nonce: Option<String>,
    /// First verdict: `Some(true)` for `<authorized/>`, `Some(false)` for `<unauthorized/>`.
    pub authorized: Option<bool>,
}

/// Decodes both halves of the authentication handshake.
#[derive(Debug, Default)]
pub struct AuthDecoder {
    reply: AuthReply,
}

impl AuthDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for AuthDecoder {
    type Output = AuthReply;

    fn end(&mut self, name: &str, text: &str) {
        match name {
            "nonce" if self.reply.nonce.is_none() && !text.is_empty() => {
                self.reply.nonce = Some(text.to_owned());
            }
            "authorized" if self.reply.authorized.is_none() => self.reply.authorized = Some(true),
            "unauthorized" if self.reply.authorized.is_none() => {
                self.reply.authorized = Some(false);
            }
            _ => {}
        }
    }

    fn finish(self) -> AuthReply {
        self.reply
    }
}

/// Decodes the `<server_version>` reply of `exchange_versions`.
#[derive(Debug, Default)]
pub struct VersionDecoder {
    version: VersionInfo,
    seen: bool,
    inside: bool,
}

impl VersionDecoder {
    /// Creates an empty decoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for VersionDecoder {
    type Output = Option<VersionInfo>;

    fn start(&mut self, name: &str) {
        if name == "server_version" {
            self.inside = true;
            self.seen = true;
        }
    }

    fn end(&mut self, name: &str, text: &str) {
        if !self.inside {
            return;
        }
        match name {
            "server_version" => self.inside = false,
            "major" => assign(&mut self.version.major, name, text),
            "minor" => assign(&mut self.version.minor, name, text),
            "release" => assign(&mut self.version.release, name, text),
            _ => {}
        }
    }

    fn finish(self) -> Option<VersionInfo> {
        self.seen.then_some(self.version)
    }
}
