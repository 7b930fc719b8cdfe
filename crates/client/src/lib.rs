#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `client` is the entry point for applications that monitor or control a
//! BOINC core client. [`RpcClient`] owns one connection, runs the password
//! handshake, and exposes one method per GUI-RPC, returning the typed records
//! from the `protocol` crate.
//!
//! # Design
//!
//! - [`ClientConfig`] (built through [`ClientConfig::builder`]) names the
//!   endpoint, the [`TimeoutConfig`] and an optional [`Password`].
//! - [`authorize`] performs the `auth1`/`auth2` challenge on any
//!   [`rpc_io::Transport`].
//! - Calls that read state return `Ok(None)` or an empty list when a reply
//!   cannot be decoded; calls that change state return `Ok(false)` when the
//!   core client refuses and leave its message in
//!   [`RpcClient::last_error`]. Only connection problems are errors.
//! - Every [`ClientError`] carries an [`ExitCode`] so front-ends can report a
//!   stable process status.
//!
//! # Examples
//!
//! ```no_run
//! use client::{ClientConfig, RpcClient};
//!
//! let client = RpcClient::new(ClientConfig::builder().password("secret").build());
//! client.open()?;
//! for project in client.get_project_status()? {
//!     println!("{}", project.display_name());
//! }
//! # Ok::<(), client::ClientError>(())
//! ```

mod auth;
mod config;
mod error;
mod exit_code;
mod facade;
mod password;
mod timeout;

pub use auth::{AuthError, authorize};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::ClientError;
pub use exit_code::ExitCode;
pub use facade::{ConnectionState, RpcClient};
pub use password::{PASSWORD_FILE_NAME, Password, read_password_file};
pub use timeout::TimeoutConfig;

pub use protocol::command::{AccountIn, ProjectOp, ResultOp, TransferOp};
pub use protocol::{ERR_IN_PROGRESS, Mode};
pub use rpc_io::{DEFAULT_PORT, RpcAddress};
