//! Output traits and types
//!
//! This module defines the notifier interface and the data carried in a
//! digest.

use crate::state::EnrichedJob;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to deliver digest: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// An aligned job picked for the digest, with the domain it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedJob {
    pub domain: String,
    pub job: EnrichedJob,
}

/// A composed digest, ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub subject: String,
    pub body: String,
}

/// Delivers a digest to its recipient
///
/// Implementations must be thread-safe.
pub trait Notifier: Send + Sync {
    /// Delivers the digest
    ///
    /// # Arguments
    ///
    /// * `digest` - The composed digest
    fn deliver(&self, digest: &Digest) -> OutputResult<()>;
}
