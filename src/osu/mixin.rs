//! Mixin types for structures.
//!
//! - `SourceRangeMixin` is a generic wrapper that attaches the source line and its byte span to a value.
//! - `SourceRangeMixinExt` provides extension methods to wrap any value with a position.

use std::ops::Range;

/// A generic wrapper that attaches position information (line number and index span) to a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRangeMixin<T> {
    /// Wrapped content value
    content: T,
    /// The line number, starts with 1.
    line: usize,
    /// Start index in the source string (0-based, inclusive)
    start: usize,
    /// End index in the source string (0-based, exclusive)
    end: usize,
}

impl<T> SourceRangeMixin<T> {
    /// Instances a new `SourceRangeMixin`
    pub fn new(content: T, line: usize, range: Range<usize>) -> Self {
        Self {
            content,
            line,
            start: range.start,
            end: range.end,
        }
    }

    /// Returns the wrapped content.
    pub const fn content(&self) -> &T {
        &self.content
    }

    /// Leans the content out of the wrapper.
    pub fn into_content(self) -> T {
        self.content
    }

    /// Returns the line number of the source, starts with 1.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the source span.
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Maps the content of the wrapper.
    pub fn map<U, F>(self, f: F) -> SourceRangeMixin<U>
    where
        F: FnOnce(T) -> U,
    {
        SourceRangeMixin::new(f(self.content), self.line, self.start..self.end)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for SourceRangeMixin<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at line {}", self.content, self.line)
    }
}

impl<T: std::error::Error + 'static> std::error::Error for SourceRangeMixin<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.content)
    }
}

/// Extension methods for `SourceRangeMixin`.
pub trait SourceRangeMixinExt {
    /// Instances a new `SourceRangeMixin` at the given line and span.
    fn into_wrapper_line(self, line: usize, range: Range<usize>) -> SourceRangeMixin<Self>
    where
        Self: Sized,
    {
        SourceRangeMixin::new(self, line, range)
    }
}

impl<T> SourceRangeMixinExt for T {}
