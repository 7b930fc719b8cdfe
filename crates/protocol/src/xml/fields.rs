use std::str::FromStr;

/// Collects the character data of the innermost open element.
///
/// The buffer is reset whenever an element opens, so at an end tag it holds
/// exactly the text of a leaf element. Composite elements end with whatever
/// trailing whitespace followed their last child, which trims to nothing.
#[derive(Debug, Default)]
pub(crate) struct FieldAccumulator {
    text: String,
}

impl FieldAccumulator {
    pub(crate) fn open(&mut self) {
        self.text.clear();
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Returns the trimmed text and resets the buffer.
    pub(crate) fn take(&mut self) -> String {
        let trimmed = self.text.trim().to_owned();
        self.text.clear();
        trimmed
    }
}

/// Parses `text` into `slot`, leaving the slot untouched on failure.
///
/// Empty text is silently ignored; anything else that fails to parse is
/// reported on the decode target together with the tag it came from.
pub(crate) fn assign<T: FromStr>(slot: &mut T, tag: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    match text.parse() {
        Ok(value) => *slot = value,
        Err(_) => {
            logging::trace_decode!(warn, "ignoring unparsable value {:?} in <{}>", text, tag);
        }
    }
}

/// Interprets a boolean field that is present in the reply.
///
/// The core client encodes flags either as an empty element (`<flag/>`) or as
/// `<flag>0</flag>`/`<flag>1</flag>`. Absence is handled by the caller's default.
pub(crate) fn parse_bool(text: &str) -> bool {
    text != "0"
}
