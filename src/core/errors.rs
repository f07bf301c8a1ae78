//! Shared error types for the analysis engines.
//!
//! The engines have no fatal error conditions: every failure path inside an
//! analyzer degrades to "no finding". The only error that crosses the public
//! boundary is cooperative cancellation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Analysis was cancelled through a [`CancellationToken`].
    ///
    /// [`CancellationToken`]: crate::core::cancellation::CancellationToken
    #[error("analysis cancelled")]
    Cancelled,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Wrapped external errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
