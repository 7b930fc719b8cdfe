#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `rpc_io` moves GUI-RPC frames over a byte stream. It knows nothing about
//! the meaning of requests or replies: it frames a command body with the
//! request envelope, writes it, and reads bytes until the core client's ETX
//! terminator arrives.
//!
//! # Design
//!
//! - [`RpcAddress`] and [`TransportConfig`] describe where and how to connect.
//! - [`connect`] opens a TCP socket through `socket2` (so a connect timeout can
//!   be honoured) or, on Unix, a Unix-domain socket, and applies the I/O
//!   timeouts.
//! - [`Transport`] is generic over any `Read + Write` stream so tests can drive
//!   it with in-memory buffers. Bytes that arrive after a terminator are kept
//!   for the next reply.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//!
//! use rpc_io::Transport;
//!
//! let mut transport = Transport::new(Cursor::new(b"<boinc_gui_rpc_reply/>\x03".to_vec()));
//! assert_eq!(transport.receive().expect("terminated reply"), b"<boinc_gui_rpc_reply/>");
//! ```

mod address;
mod connect;
mod error;
mod framed;

pub use address::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT, DEFAULT_READ_TIMEOUT, RpcAddress, TransportConfig};
pub use connect::{RpcStream, connect};
pub use error::TransportError;
pub use framed::Transport;
