//! Output module for delivering run results
//!
//! This module handles:
//! - Composing the digest of selected jobs
//! - Delivering it through a notifier
//! - Printing store statistics

mod digest;
pub mod stats;
mod traits;

pub use digest::{compose_digest, format_digest_markdown, headline, FileNotifier};
pub use stats::{load_statistics, print_statistics, ScoutStatistics};
pub use traits::{Digest, Notifier, OutputError, OutputResult, SelectedJob};
