/// Failures that prevent a reply from being decoded at all.
///
/// Field-level conversion problems never surface here; they are logged and
/// the field keeps its default value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The reply contained no text.
    #[error("reply was empty")]
    Empty,
    /// The tokenizer could not make sense of the reply.
    #[error("malformed reply at byte {position}: {message}")]
    Malformed {
        /// Byte offset reported by the tokenizer.
        position: u64,
        /// Tokenizer diagnostic.
        message: String,
    },
}

impl DecodeError {
    pub(crate) fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }
}
