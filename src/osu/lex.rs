//! Format reader of the `.osu` format.
//!
//! Raw [String] == [parse] ==> [`RawFields`] (in [`LexOutput`]) == [`Beatmap`](super::model::Beatmap) ==> record
//!
//! The reader is a single pass over the lines with no lookahead. The current [`Section`] decides
//! how each line is treated:
//!
//! - before any header, the line is the format version declaration `osu file format vN`,
//! - in `[General]`, `[Editor]`, `[Metadata]` and `[Difficulty]`, the line is `Key: Value`,
//! - in `[Events]`, the line is classified by [`EventLine`],
//! - in the other sections, the line is dropped.

mod cursor;
pub mod event;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::util::StrExtension;

use self::{
    cursor::{Cursor, Line},
    event::{BackgroundEvent, EventLine, VideoEvent},
};
use super::{
    mixin::{SourceRangeMixin, SourceRangeMixinExt},
    section::Section,
};

/// Keys under which the reader stores the values it derives itself.
pub mod key {
    /// The format version, from `osu file format vN`.
    pub const FILE_FORMAT: &str = "FileFormat";
    /// The background file name from the events, or [`super::NO_BACKGROUND`].
    pub const BACKGROUND: &str = "Background";
    /// The video file name from the events.
    pub const VIDEO: &str = "Video";
    /// The video start offset from the events.
    pub const VIDEO_OFFSET: &str = "VideoOffset";
}

/// Prefix of the format version declaration. The version follows it directly.
pub const FORMAT_PREFIX: &str = "osu file format v";

/// Stored as [`key::BACKGROUND`] when the events declare no background.
pub const NO_BACKGROUND: &str = "none";

/// A syntax error which makes the whole file unreadable.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxError {
    /// The header names no known section.
    #[error("unknown section `[{0}]`")]
    UnknownSection(String),
    /// The first content line is too short to hold a version after `osu file format v`.
    #[error("malformed format version `{0}`")]
    MalformedVersion(String),
}

/// A syntax error with position information.
pub type SyntaxErrorWithRange = SourceRangeMixin<SyntaxError>;

/// A malformed line which was skipped or read leniently.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexWarning {
    /// A line of a key/value section has no `:`.
    #[error("expected `Key: Value`, but found `{0}`")]
    MissingDelimiter(String),
    /// A video event has fewer than three fields.
    #[error("expected `Video,offset,\"file\"`, but found `{0}`")]
    MalformedVideoEvent(String),
    /// The first content line does not start with `osu file format v`. The text after the
    /// prefix length is taken as the version anyway.
    #[error("expected `osu file format vN`, but found `{0}`")]
    UnexpectedVersionPrefix(String),
    /// A content line after the format version but before the first section.
    #[error("line `{0}` is outside of any section")]
    StrayLine(String),
}

/// A lex warning with position information.
pub type LexWarningWithRange = SourceRangeMixin<LexWarning>;

/// An error occurred when reading a `.osu` file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormatError {
    /// The file could not be read.
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        /// The file path.
        path: PathBuf,
        /// The cause.
        source: std::io::Error,
    },
    /// The file contents are not in the `.osu` format.
    #[error("failed to read `{}`: {error}", .path.display())]
    Syntax {
        /// The file path.
        path: PathBuf,
        /// The cause with its position.
        #[source]
        error: SyntaxErrorWithRange,
    },
}

/// Fields read from a `.osu` file.
///
/// Keys are unique and the last occurrence wins. The events also keep their own records, but
/// their values are mirrored under [`key::BACKGROUND`], [`key::VIDEO`] and [`key::VIDEO_OFFSET`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFields {
    fields: HashMap<String, String>,
    background: Option<BackgroundEvent>,
    video: Option<VideoEvent>,
}

impl RawFields {
    /// Returns the value of the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns whether the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates over all fields in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The last background event, if any.
    #[must_use]
    pub const fn background(&self) -> Option<&BackgroundEvent> {
        self.background.as_ref()
    }

    /// The last video event, if any.
    #[must_use]
    pub const fn video(&self) -> Option<&VideoEvent> {
        self.video.as_ref()
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    fn push_event(&mut self, event: EventLine) {
        match event {
            EventLine::Background(background) => {
                self.insert(key::BACKGROUND, background.file.as_str());
                self.background = Some(background);
            }
            EventLine::Video(video) => {
                self.insert(key::VIDEO_OFFSET, video.offset.as_str());
                self.insert(key::VIDEO, video.file.as_str());
                self.video = Some(video);
            }
            EventLine::Storyboard(_) => {}
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RawFields {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut fields = Self::default();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

/// Lex Parsing Results, includes fields and warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct LexOutput {
    /// The fields read.
    pub fields: RawFields,
    /// Lines that were skipped as malformed.
    pub lex_warnings: Vec<LexWarningWithRange>,
}

/// Reads the `.osu` format text into [`RawFields`].
///
/// # Errors
///
/// Fails on a header naming an unknown section or on a first line too short to hold a format
/// version. Nothing read before the failure is returned.
pub fn parse(source: &str) -> Result<LexOutput, SyntaxErrorWithRange> {
    let mut scanner = Scanner::default();
    for line in Cursor::new(source) {
        scanner.feed(line)?;
    }
    Ok(scanner.finish())
}

/// Reads the `.osu` file into [`RawFields`].
///
/// The file is not required to be valid UTF-8. Invalid sequences are replaced.
///
/// # Errors
///
/// Fails if the file cannot be read or [`parse`] fails on its contents.
pub fn read(path: impl AsRef<Path>) -> Result<LexOutput, FormatError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let output = parse(&String::from_utf8_lossy(&bytes)).map_err(|error| FormatError::Syntax {
        path: path.to_path_buf(),
        error,
    })?;
    log::debug!(
        "read {} fields from {} with {} warnings",
        output.fields.len(),
        path.display(),
        output.lex_warnings.len()
    );
    Ok(output)
}

#[derive(Default)]
struct Scanner {
    section: Section,
    fields: RawFields,
    warnings: Vec<LexWarningWithRange>,
}

impl Scanner {
    fn feed(&mut self, line: Line<'_>) -> Result<(), SyntaxErrorWithRange> {
        let Line {
            number,
            range,
            text,
        } = line;
        if text.trim().is_empty() || text.starts_with("//") {
            return Ok(());
        }
        if let Some(name) = Section::header_of(text) {
            self.section = name.parse().map_err(|()| {
                SyntaxError::UnknownSection(name.to_owned()).into_wrapper_line(number, range)
            })?;
            return Ok(());
        }
        let warning = match self.section {
            Section::FormatUnknown => self
                .format_version(text)
                .map_err(|error| error.into_wrapper_line(number, range.clone()))?,
            Section::General | Section::Editor | Section::Metadata | Section::Difficulty => {
                self.key_value(text)
            }
            Section::Events => EventLine::parse(text)
                .map(|event| self.fields.push_event(event))
                .err(),
            Section::TimingPoints | Section::Colours | Section::HitObjects => None,
        };
        if let Some(warning) = warning {
            self.warnings.push(warning.into_wrapper_line(number, range));
        }
        Ok(())
    }

    fn format_version(&mut self, text: &str) -> Result<Option<LexWarning>, SyntaxError> {
        if self.fields.contains_key(key::FILE_FORMAT) {
            return Ok(Some(LexWarning::StrayLine(text.to_owned())));
        }
        let line = text.trim();
        if let Some(version) = line.strip_prefix_ignore_case(FORMAT_PREFIX) {
            self.fields.insert(key::FILE_FORMAT, version.trim());
            return Ok(None);
        }
        // Whatever follows the prefix length is taken, but the line must be long enough.
        let version = line
            .char_indices()
            .map(|(i, _)| i)
            .find(|&i| i >= FORMAT_PREFIX.len())
            .and_then(|i| line.get(i..))
            .map(str::trim)
            .filter(|version| !version.is_empty())
            .ok_or_else(|| SyntaxError::MalformedVersion(text.to_owned()))?;
        self.fields.insert(key::FILE_FORMAT, version);
        Ok(Some(LexWarning::UnexpectedVersionPrefix(text.to_owned())))
    }

    fn key_value(&mut self, text: &str) -> Option<LexWarning> {
        let Some((key, value)) = text.split_once(':') else {
            return Some(LexWarning::MissingDelimiter(text.to_owned()));
        };
        self.fields.insert(key.trim(), value.trim());
        None
    }

    fn finish(mut self) -> LexOutput {
        if !self.fields.contains_key(key::BACKGROUND) {
            self.fields.insert(key::BACKGROUND, NO_BACKGROUND);
        }
        LexOutput {
            fields: self.fields,
            lex_warnings: self.warnings,
        }
    }
}
