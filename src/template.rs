//! `{{placeholder}}` substitution.
//!
//! A template is split into literal text and placeholders of the exact form
//! `{{name}}` (one or more characters, none of them braces). Placeholders with a
//! matching substitution are replaced in place; the rest stay as literal text.
//!
//! When every replacement is a string the result collapses to a single
//! [`Translation::Text`]. As soon as one replacement is a fragment, the result is
//! an ordered [`Translation::Segments`] sequence whose segments carry their
//! position as a stable key.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Replacement value for a placeholder.
///
/// `F` is an opaque renderable unit (a widget, a markup node, ...). It is only
/// ever cloned and positioned, never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution<F> {
    Text(String),
    Fragment(F),
}

impl<F> From<String> for Substitution<F> {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<F> From<&str> for Substitution<F> {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Placeholder name → replacement value.
///
/// # Examples
/// ```
/// use i18n_translator::template::{Substitutions, substitute};
///
/// let substitutions = Substitutions::<()>::new().text("name", "World");
/// let translation = substitute("Hello {{name}}!", Some(&substitutions));
///
/// assert_eq!(translation.as_text(), Some("Hello World!"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitutions<F> {
    values: HashMap<String, Substitution<F>>,
}

impl<F> Default for Substitutions<F> {
    fn default() -> Self {
        Self { values: HashMap::new() }
    }
}

impl<F> Substitutions<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Substitution::Text(value.into()));
        self
    }

    #[must_use]
    pub fn fragment(mut self, name: impl Into<String>, fragment: F) -> Self {
        self.insert(name, Substitution::Fragment(fragment));
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: Substitution<F>,
    ) -> Option<Substitution<F>> {
        self.values.insert(name.into(), value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Substitution<F>> {
        self.values.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<F, K, V> FromIterator<(K, V)> for Substitutions<F>
where
    K: Into<String>,
    V: Into<Substitution<F>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// A piece of a resolved translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<F> {
    Text(String),
    Fragment(F),
}

impl<F> Segment<F> {
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Fragment(_) => None,
        }
    }
}

/// Segment tagged with its position, for keyed reconciliation in a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedSegment<F> {
    pub key: usize,
    pub segment: Segment<F>,
}

/// Result of a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation<F> {
    /// Every replacement was a string.
    Text(String),
    /// At least one replacement was a fragment.
    Segments(Vec<KeyedSegment<F>>),
}

impl<F> Translation<F> {
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Segments(_) => None,
        }
    }

    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Segments(_) => None,
        }
    }

    /// Keyed segments; empty for [`Translation::Text`].
    #[must_use]
    pub fn segments(&self) -> &[KeyedSegment<F>] {
        match self {
            Self::Text(_) => &[],
            Self::Segments(segments) => segments,
        }
    }

    /// Flattens the translation, rendering fragments with `render`.
    pub fn render_with(&self, mut render: impl FnMut(&F) -> String) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Segments(segments) => segments
                .iter()
                .map(|keyed| match &keyed.segment {
                    Segment::Text(text) => text.clone(),
                    Segment::Fragment(fragment) => render(fragment),
                })
                .collect(),
        }
    }
}

impl<F: fmt::Display> fmt::Display for Translation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Segments(segments) => segments.iter().try_for_each(|keyed| match &keyed.segment {
                Segment::Text(text) => f.write_str(text),
                Segment::Fragment(fragment) => fmt::Display::fmt(fragment, f),
            }),
        }
    }
}

/// Lexical unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    /// `raw` is the full `{{name}}` text, kept for unmatched placeholders.
    Placeholder { name: &'a str, raw: &'a str },
}

/// `{{name}}` where `name` has no braces.
#[allow(clippy::expect_used)]
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder regex should compile"));

/// Splits a template into literals and placeholders, dropping empty literals.
///
/// Placeholders are matched leftmost-first, so `{{{a}}}` yields `{`, `{{a}}`, `}`.
fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut literal_start = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(raw), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        if let Some(literal) = template.get(literal_start..raw.start()).filter(|s| !s.is_empty()) {
            tokens.push(Token::Literal(literal));
        }
        tokens.push(Token::Placeholder { name: name.as_str(), raw: raw.as_str() });
        literal_start = raw.end();
    }

    if let Some(literal) = template.get(literal_start..).filter(|s| !s.is_empty()) {
        tokens.push(Token::Literal(literal));
    }

    tokens
}

/// Distinct placeholder names in order of first appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for token in tokenize(template) {
        if let Token::Placeholder { name, .. } = token
            && !names.contains(&name)
        {
            names.push(name);
        }
    }
    names
}

/// Expands `{{name}}` placeholders of `template`.
///
/// Without substitutions (or with an empty map) the template is returned as is.
/// Substitutions that do not appear in the template are ignored.
#[must_use]
pub fn substitute<F: Clone>(template: &str, substitutions: Option<&Substitutions<F>>) -> Translation<F> {
    let Some(substitutions) = substitutions.filter(|s| !s.is_empty()) else {
        return Translation::Text(template.to_string());
    };

    let segments: Vec<Segment<F>> = tokenize(template)
        .into_iter()
        .map(|token| match token {
            Token::Literal(text) => Segment::Text(text.to_string()),
            Token::Placeholder { name, raw } => match substitutions.get(name) {
                Some(Substitution::Text(value)) => Segment::Text(value.clone()),
                Some(Substitution::Fragment(fragment)) => Segment::Fragment(fragment.clone()),
                None => Segment::Text(raw.to_string()),
            },
        })
        .collect();

    if segments.iter().all(Segment::is_text) {
        return Translation::Text(segments.iter().filter_map(Segment::as_text).collect());
    }

    Translation::Segments(
        segments.into_iter().enumerate().map(|(key, segment)| KeyedSegment { key, segment }).collect(),
    )
}
