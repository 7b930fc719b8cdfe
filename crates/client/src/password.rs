use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use zeroize::Zeroizing;

/// Name of the file in the BOINC data directory holding the GUI-RPC password.
pub const PASSWORD_FILE_NAME: &str = "gui_rpc_auth.cfg";

/// GUI-RPC password, wiped from memory when dropped.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wraps a clear-text password.
    pub fn new(text: impl Into<String>) -> Self {
        Self(Zeroizing::new(text.into()))
    }

    /// Clear-text view for hashing.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` when no password is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl From<&str> for Password {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Password {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Reads the password from a `gui_rpc_auth.cfg` style file.
///
/// Only the first line is used, without its line terminator. The file
/// contents are wiped after the line is extracted.
pub fn read_password_file(path: &Path) -> io::Result<Password> {
    let contents = Zeroizing::new(fs::read_to_string(path)?);
    let first = contents.lines().next().unwrap_or_default();
    Ok(Password::new(first.trim_end_matches('\r')))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_first_line_only() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "s3cret\r\nsecond line\n").expect("write");
        let password = read_password_file(file.path()).expect("read");
        assert_eq!(password.expose(), "s3cret");
    }

    #[test]
    fn empty_file_yields_empty_password() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        assert!(read_password_file(file.path()).expect("read").is_empty());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = read_password_file(&dir.path().join(PASSWORD_FILE_NAME)).expect_err("missing");
        assert_eq!(error.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn debug_output_is_redacted() {
        assert_eq!(format!("{:?}", Password::new("hunter2")), "Password(<redacted>)");
    }
}
