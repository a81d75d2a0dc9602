use thiserror::Error;

/// Errors raised by translator accessors.
///
/// Missing translations are not errors; they are reported as diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslatorError {
    /// An accessor was used outside of [`crate::context::provide`].
    #[error("{accessor} must be used within a translation provider scope")]
    UnconfiguredContext { accessor: &'static str },
}
