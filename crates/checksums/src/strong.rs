use std::fmt;

use digest::Digest;

/// Length in bytes of an MD5 digest.
pub const MD5_DIGEST_LEN: usize = 16;

/// Streaming MD5 hasher.
#[derive(Clone, Default)]
pub struct Md5 {
    inner: ::md5::Md5,
}

impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5").finish_non_exhaustive()
    }
}

impl Md5 {
    /// Creates a hasher with an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ::md5::Md5::new(),
        }
    }

    /// Feeds additional bytes into the digest state.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalises the digest and returns the 128-bit MD5 output.
    #[must_use]
    pub fn finalize(self) -> [u8; MD5_DIGEST_LEN] {
        self.inner.finalize().into()
    }

    /// Finalises the digest and renders it as lowercase hex.
    #[must_use]
    pub fn finalize_hex(self) -> String {
        to_hex(&self.finalize())
    }

    /// Computes the MD5 digest for `data` in one shot.
    #[must_use]
    pub fn digest(data: &[u8]) -> [u8; MD5_DIGEST_LEN] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Renders `bytes` as a lowercase hexadecimal string.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(DIGITS[usize::from(byte >> 4)]));
        out.push(char::from(DIGITS[usize::from(byte & 0x0f)]));
    }
    out
}

/// One-shot MD5 rendered as lowercase hex.
#[must_use]
pub fn md5_hex(data: &[u8]) -> String {
    to_hex(&Md5::digest(data))
}

/// Hash sent in `<nonce_hash>` during the second authentication round trip.
///
/// The nonce is hashed first, immediately followed by the password bytes.
#[must_use]
pub fn nonce_hash(nonce: &str, password: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(nonce.as_bytes());
    hasher.update(password);
    hasher.finalize_hex()
}

/// Password hash transmitted by account lookup, creation and account-manager RPCs.
///
/// The identity (an e-mail address or user name) is lowercased before hashing
/// so that the server-side comparison is case-insensitive.
#[must_use]
pub fn account_password_hash(password: &str, identity: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(identity.to_lowercase().as_bytes());
    hasher.finalize_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn md5_streaming_matches_rfc_vectors() {
        let vectors = [
            (b"".as_slice(), "d41d8cd98f00b204e9800998ecf8427e"),
            (b"a".as_slice(), "0cc175b9c0f1b6a831c399e269772661"),
            (b"abc".as_slice(), "900150983cd24fb0d6963f7d28e17f72"),
            (
                b"message digest".as_slice(),
                "f96b697d7cb7938d525a2f31aaf161d0",
            ),
        ];

        for (input, expected_hex) in vectors {
            let mut hasher = Md5::new();
            let mid = input.len() / 2;
            hasher.update(&input[..mid]);
            hasher.update(&input[mid..]);
            assert_eq!(hasher.finalize_hex(), expected_hex);
            assert_eq!(md5_hex(input), expected_hex);
        }
    }

    #[test]
    fn to_hex_pads_small_bytes() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xa0, 0xff]), "000fa0ff");
    }

    #[test]
    fn nonce_hash_concatenates_nonce_then_password() {
        assert_eq!(
            nonce_hash("1234.5678", b"secret"),
            md5_hex(b"1234.5678secret")
        );
    }

    #[test]
    fn account_password_hash_lowercases_identity() {
        assert_eq!(
            account_password_hash("pw", "User@Example.ORG"),
            md5_hex(b"pwuser@example.org")
        );
    }
}
