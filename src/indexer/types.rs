//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// The root is missing or not a directory
    #[error("Not a directory: {}", .0.display())]
    InvalidPath(PathBuf),
    /// Translation file patterns could not be compiled
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}
