//! Sections of the `.osu` format and the scanner state built on them.

use std::str::FromStr;

/// The section a line of `.osu` source belongs to.
///
/// The reader starts in [`Section::FormatUnknown`] and only moves on a header line `[Name]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Section {
    /// Before any header. The first content line is the format version declaration.
    #[default]
    FormatUnknown,
    /// `[General]`, audio file and gameplay flags.
    General,
    /// `[Editor]`, editor state such as bookmarks.
    Editor,
    /// `[Metadata]`, artist, title, tags and ids.
    Metadata,
    /// `[Difficulty]`, difficulty parameters.
    Difficulty,
    /// `[Events]`, background, video and storyboard commands.
    Events,
    /// `[TimingPoints]`.
    TimingPoints,
    /// `[Colours]`.
    Colours,
    /// `[HitObjects]`.
    HitObjects,
}

impl Section {
    /// All sections which can be named by a header line.
    pub const HEADERS: [Self; 8] = [
        Self::General,
        Self::Editor,
        Self::Metadata,
        Self::Difficulty,
        Self::Events,
        Self::TimingPoints,
        Self::Colours,
        Self::HitObjects,
    ];

    /// The name as written in a header, or `None` for [`Section::FormatUnknown`].
    #[must_use]
    pub const fn header_name(self) -> Option<&'static str> {
        Some(match self {
            Self::FormatUnknown => return None,
            Self::General => "General",
            Self::Editor => "Editor",
            Self::Metadata => "Metadata",
            Self::Difficulty => "Difficulty",
            Self::Events => "Events",
            Self::TimingPoints => "TimingPoints",
            Self::Colours => "Colours",
            Self::HitObjects => "HitObjects",
        })
    }

    /// Extracts the section name from a header line such as `[Events]`.
    ///
    /// Returns `None` if the line is not shaped like a header.
    #[must_use]
    pub fn header_of(line: &str) -> Option<&str> {
        line.trim_end()
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .map(str::trim)
    }
}

impl FromStr for Section {
    type Err = ();

    /// Matches a header name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::HEADERS
            .into_iter()
            .find(|section| {
                section
                    .header_name()
                    .is_some_and(|name| name.eq_ignore_ascii_case(s))
            })
            .ok_or(())
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.header_name() {
            Some(name) => write!(f, "[{name}]"),
            None => write!(f, "<before first section>"),
        }
    }
}
