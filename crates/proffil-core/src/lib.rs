//! # proffil-core
//!
//! Core vocabulary for Proffil: identifier and record types, the visible
//! watcher state machine, the error taxonomy, and the [`ProfileSource`]
//! trait that transports implement.
//!
//! The crates above this one follow a single rule: for any one consumer there
//! is at most one outstanding fetch, bound to the identifier that consumer is
//! currently interested in. This crate defines what flows across that seam.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod source;
pub mod types;

pub use error::{Error, Result};
pub use source::{ProfileSource, StaticSource};
pub use types::{Profile, ProfileState, UserId};
