//! Builds translation tables from a project directory.
/// Indexer type definitions
mod types;
/// Workspace traversal
mod workspace;

pub use types::IndexerError;
pub use workspace::{
    find_translation_files,
    load_translation_table,
};
