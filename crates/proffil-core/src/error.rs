//! Error types for Proffil.

use crate::types::UserId;

/// Errors that can occur while fetching a profile.
///
/// There are exactly two kinds: [`Error::Cancelled`], which is expected and
/// silent (the owner gave up on the fetch before it finished), and everything
/// else, which is a reportable fetch failure. Use [`Error::is_cancelled`] to
/// tell them apart.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The fetch was cancelled by its owner (identifier change or teardown).
    ///
    /// Never surfaced to consumers; a cancelled fetch produces no visible
    /// state transition.
    #[error("fetch cancelled")]
    Cancelled,

    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("transport error: {message}")]
    Transport {
        /// Human-readable description of the failure
        message: String,
        /// Underlying error, if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The endpoint answered with a non-success status other than 404.
    #[error("unexpected HTTP status {code}")]
    Status {
        /// The HTTP status code
        code: u16,
    },

    /// The endpoint has no record for the requested identifier.
    #[error("no profile for user {user}")]
    UserNotFound {
        /// Identifier that was requested
        user: UserId,
    },

    /// The response body was not a valid profile record.
    #[error("malformed profile body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid configuration (bad base URL, unbuildable client, ...).
    #[error("configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for Proffil operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is an expected cancellation.
    ///
    /// Cancellations are silent: the owner that aborted the fetch already
    /// knows about it, so completions carrying this error must be swallowed,
    /// not reported. Every other variant is a genuine fetch failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Creates a transport error with a message.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Error::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error with a message and source error.
    pub fn transport_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
