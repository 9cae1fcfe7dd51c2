//! Fancy diagnostics support using `ariadne`.
//!
//! This module provides convenient methods to convert the positioned reader diagnostics
//! (`LexWarningWithRange` and `SyntaxErrorWithRange`) to `ariadne::Report`.
//!
//! Since `SourceRangeMixin` contains index span information (start/end byte offsets), this module
//! lets ariadne automatically handle row/column calculations for display purposes.
//!
//! # Usage Example
//!
//! ```rust
//! use osu_rs::{diagnostics::emit_lex_warnings, osu::lex::parse};
//!
//! let source = "osu file format v14\n[General]\nAudioFilename audio.mp3\n";
//! let output = parse(source).unwrap();
//!
//! // Output all warnings
//! emit_lex_warnings("map.osu", source, &output.lex_warnings);
//! ```

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};

use crate::osu::lex::{LexWarningWithRange, SyntaxErrorWithRange};

/// Simple source container that holds the filename and source text.
/// Ariadne will automatically handle row/column calculations from byte offsets.
///
/// # Usage Example
///
/// ```rust
/// use osu_rs::diagnostics::SimpleSource;
///
/// let source_text = "osu file format v14\n[General]\n";
/// let source = SimpleSource::new("map.osu", source_text);
///
/// assert_eq!(source.text(), source_text);
/// assert_eq!(source.name(), "map.osu");
/// ```
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned diagnostics to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert the diagnostic to ariadne Report.
    ///
    /// # Parameters
    /// * `src` - Source file container (used for filename, ariadne handles row/column calculation)
    fn to_report<'a>(&self, src: &SimpleSource<'a>)
    -> Report<'a, (String, std::ops::Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` consistently.
///
/// `range` is in bytes, as carried by [`SourceRangeMixin`](crate::osu::mixin::SourceRangeMixin).
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: std::ops::Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, std::ops::Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_config(Config::new().with_index_type(IndexType::Byte))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

impl ToAriadne for LexWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        build_report(
            src,
            ReportKind::Warning,
            self.range(),
            "Skipped line",
            self.content(),
            Color::Yellow,
        )
    }
}

impl ToAriadne for SyntaxErrorWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        build_report(
            src,
            ReportKind::Error,
            self.range(),
            "Not a beatmap",
            self.content(),
            Color::Red,
        )
    }
}

/// Convenience method: batch render a list of reader warnings.
///
/// # Parameters
/// * `name` - Name of the source file, used for display in diagnostic information
/// * `source` - Complete `.osu` source text
/// * `warnings` - List of warnings to display
pub fn emit_lex_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a LexWarningWithRange>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for w in warnings {
        let report = w.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Collect `ariadne::Report` instances for a list of reader warnings without printing.
///
/// This is useful in tests to verify diagnostics can be generated while keeping test output clean.
#[must_use]
pub fn collect_lex_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a LexWarningWithRange>,
) -> Vec<Report<'a, (String, std::ops::Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings.into_iter().map(|w| w.to_report(&simple)).collect()
}
