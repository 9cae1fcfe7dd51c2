//! Lines of the `[Events]` section.
//!
//! Only background and video declarations are extracted. Every other line is a storyboard
//! command, which is classified just enough to be dropped.

use itertools::Itertools;

use crate::util::StrExtension;

use super::LexWarning;

/// Prefix of a background declaration, `0,0,"file"`.
pub const BACKGROUND_PREFIX: &str = "0,0,\"";

/// The background image declared by the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackgroundEvent {
    /// The image file name, relative to the map's directory.
    pub file: String,
}

/// The background video declared by the map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoEvent {
    /// The start offset in milliseconds, as written.
    pub offset: String,
    /// The video file name, relative to the map's directory.
    pub file: String,
}

/// Kinds of storyboard lines the reader recognizes and ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StoryboardKind {
    /// `Sprite,...` or `4,...`.
    Sprite,
    /// `Animation,...` or `6,...`.
    Animation,
    /// `Sample,...` or `5,...`.
    Sample,
    /// An indented command belonging to the preceding object, such as ` F,0,500,,1`.
    Command,
    /// Anything else, such as break periods or background colour changes.
    Other,
}

/// A classified line of the `[Events]` section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventLine {
    /// `0,0,"file"[,x,y]`.
    Background(BackgroundEvent),
    /// `1,offset,"file"` or `Video,offset,"file"`.
    Video(VideoEvent),
    /// A storyboard line, intentionally not parsed further.
    Storyboard(StoryboardKind),
}

impl EventLine {
    /// Classifies a line, checking background, then video, then storyboard.
    ///
    /// # Errors
    ///
    /// Returns [`LexWarning::MalformedVideoEvent`] if a video line has fewer than three fields.
    pub fn parse(line: &str) -> Result<Self, LexWarning> {
        if let Some(rest) = line.strip_prefix(BACKGROUND_PREFIX) {
            let file = rest.split_once('"').map_or(rest, |(file, _)| file);
            return Ok(Self::Background(BackgroundEvent {
                file: file.to_owned(),
            }));
        }
        if line.starts_with("1,") || line.starts_with("Video") {
            let (_, offset, file) = line
                .split(',')
                .next_tuple()
                .ok_or_else(|| LexWarning::MalformedVideoEvent(line.to_owned()))?;
            return Ok(Self::Video(VideoEvent {
                offset: offset.trim().to_owned(),
                file: file.trim().strip_quotes().to_owned(),
            }));
        }
        Ok(Self::Storyboard(StoryboardKind::of(line)))
    }
}

impl StoryboardKind {
    fn of(line: &str) -> Self {
        if line.starts_with([' ', '_']) {
            return Self::Command;
        }
        let head = line.split(',').next().unwrap_or_default().trim();
        match head {
            "Sprite" | "4" => Self::Sprite,
            "Animation" | "6" => Self::Animation,
            "Sample" | "5" => Self::Sample,
            _ => Self::Other,
        }
    }
}
