#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` provides the single digest the BOINC GUI-RPC protocol relies
//! on: MD5 rendered as 32 lowercase hexadecimal characters. The core client
//! authenticates front-ends by hashing a server-issued nonce concatenated
//! with the GUI-RPC password, and account RPCs transmit
//! `md5(password + lowercase(identity))` instead of the clear-text password.
//!
//! # Examples
//!
//! ```
//! use checksums::{Md5, md5_hex};
//!
//! assert_eq!(md5_hex(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
//!
//! let mut hasher = Md5::new();
//! hasher.update(b"1234.5678");
//! hasher.update(b"secret");
//! assert_eq!(hasher.finalize_hex(), md5_hex(b"1234.5678secret"));
//! ```

mod strong;

pub use strong::{MD5_DIGEST_LEN, Md5, account_password_hash, md5_hex, nonce_hash, to_hex};
