//! # proffil-client
//!
//! The working half of Proffil: an HTTP-backed [`ProfileSource`] and the
//! [`ProfileWatcher`] that drives it.
//!
//! A watcher observes one identifier at a time. Supplying a new identifier
//! cancels whatever fetch is still in flight before the replacement is
//! issued, and only the latest non-cancelled outcome ever reaches the state
//! channel — a late result for an identifier the consumer has already moved
//! past is discarded, never rendered.
//!
//! [`ProfileSource`]: proffil_core::ProfileSource

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod http;
pub mod watcher;

pub use config::SourceConfig;
pub use http::HttpSource;
pub use watcher::ProfileWatcher;
