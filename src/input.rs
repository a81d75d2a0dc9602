//! Loading translation data from JSON.
/// Translation files
pub mod translation;

pub use translation::{
    LoadError,
    detect_language_from_path,
    flatten_json,
    read_translation_keys,
};
