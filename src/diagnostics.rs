//! Diagnostics emitted when a translation cannot be found.
//!
//! Missing translations never fail a call; the translator returns a
//! best-effort string and reports the miss through a [`DiagnosticSink`].

use std::fmt;
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use crate::config::Severity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A key has no template in the active language (nor in the default
    /// language when that fallback is enabled).
    MissingTranslationKey { key: String, language: Option<String> },
    /// Inline per-language content has neither the active nor the default language.
    MissingTranslationContent { language: Option<String>, available: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MissingTranslationKey { key, language: Some(language) } => {
                write!(f, "The key \"{key}\" was not found in the translations for \"{language}\"!")
            }
            DiagnosticKind::MissingTranslationKey { key, language: None } => {
                write!(f, "The key \"{key}\" was not found in the translations!")
            }
            DiagnosticKind::MissingTranslationContent { language, available } => write!(
                f,
                "No content for \"{}\" (available: {})",
                language.as_deref().unwrap_or("<unresolved>"),
                available.join(", ")
            ),
        }
    }
}

/// Receiver of translation diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Emits diagnostics as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!(kind = ?diagnostic.kind, "{diagnostic}"),
            Severity::Warning => tracing::warn!(kind = ?diagnostic.kind, "{diagnostic}"),
        }
    }
}

/// Keeps diagnostics in memory.
///
/// Clones share the same buffer, so a clone can be handed to a translator
/// while the original is used for inspection.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollector {
    diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
}

impl DiagnosticCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies of the collected diagnostics, oldest first.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner).push(diagnostic);
    }
}
