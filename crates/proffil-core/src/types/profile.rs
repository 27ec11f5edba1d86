//! The profile record returned by a successful fetch.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user profile record.
///
/// Decoded from the JSON body of the profile endpoint. The endpoint may send
/// more fields than these (address, company, ...); anything unrecognized is
/// ignored on decode. Once received, a record is immutable — a watcher only
/// ever replaces it wholesale with the result of a newer fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identifier this record belongs to
    pub id: UserId,

    /// Full display name
    pub name: String,

    /// Contact email address
    pub email: String,

    /// Short login-style handle
    pub username: String,
}
