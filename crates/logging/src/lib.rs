#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` centralises how the GUI-RPC workspace reports diagnostics. Library
//! crates never install a subscriber; they emit [`tracing`] events under the
//! `guirpc::*` targets through the macros exported here, and the host process
//! (the `boinc-rpc` binary, a test, or an embedding application) decides where
//! those events go.
//!
//! # Design
//!
//! - [`Subsystem`] names every target so filters can be written without
//!   guessing strings (`guirpc::transport`, `guirpc::decode`, ...).
//! - [`Verbosity`] maps the familiar `-v` count onto an `EnvFilter`
//!   directive.
//! - With the `subscriber` feature, [`init_tracing`] installs a formatted
//!   stderr subscriber. The `BOINC_RPC_LOG` environment variable overrides the
//!   verbosity-derived directive.
//!
//! # Examples
//!
//! ```
//! use logging::{Subsystem, Verbosity};
//!
//! assert_eq!(Subsystem::Transport.target(), "guirpc::transport");
//! assert_eq!(Verbosity::from_count(2).directive(), "guirpc=debug");
//! ```

mod tracing_macros;
mod verbosity;

#[cfg(feature = "subscriber")]
mod subscriber;

pub use verbosity::{Subsystem, Verbosity};

#[cfg(feature = "subscriber")]
pub use subscriber::{LOG_ENV_VAR, build_filter, init_tracing};

#[doc(hidden)]
pub use tracing;
