//! This module introduces struct [`Beatmap`], the record built from the fields of a `.osu` file.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    num::ParseIntError,
    path::{Component, Path, PathBuf},
};

use thiserror::Error;

use super::{
    OsuError,
    id::SyntheticIds,
    lex::{self, RawFields, key},
};

/// Shown when the map has no `Artist`.
pub const UNKNOWN_ARTIST: &str = "<unknown artist>";
/// Shown when the map has no `Title`.
pub const UNKNOWN_TITLE: &str = "<unknown title>";
/// Shown when the map has no `Source`.
pub const UNKNOWN_SOURCE: &str = "<unknown source>";
/// Shown when the map has no `Creator`.
pub const UNKNOWN_CREATOR: &str = "<unknown creator>";

/// Separator of the entries in `Tags`.
pub const TAG_SEPARATOR: char = '=';

/// A structurally valid file lacks what a [`Beatmap`] needs.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// The field is required but absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// The field must be an integer.
    #[error("field `{key}` is not an integer: `{value}`")]
    InvalidInteger {
        /// The field name.
        key: &'static str,
        /// The value as written.
        value: String,
        /// The cause.
        #[source]
        source: ParseIntError,
    },
    /// The map declares no `BeatmapID` and no synthetic id is left to give it.
    #[error("no synthetic beatmap id left")]
    SyntheticIdsExhausted,
}

/// The background video of a [`Beatmap`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeatmapVideo {
    /// The video file, in the directory of the `.osu` file.
    pub path: PathBuf,
    /// When the video starts, in milliseconds relative to the audio.
    pub offset_ms: i32,
}

/// Metadata of a beatmap.
///
/// Two beatmaps are equal, and ordered, only by their romanized artist and then their romanized
/// title. The id and the files are not compared, so difficulties of one song are equal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beatmap {
    id: i32,
    artist: String,
    artist_romanized: String,
    title: String,
    title_romanized: String,
    source: String,
    creator: String,
    tags: Vec<String>,
    tags_string: String,
    format_version: Option<String>,
    source_file: PathBuf,
    audio_path: PathBuf,
    video: Option<BeatmapVideo>,
    background_path: PathBuf,
}

impl Beatmap {
    /// Reads the `.osu` file and builds the record.
    ///
    /// A synthetic id is taken from `ids` if the file declares no `BeatmapID`.
    ///
    /// # Errors
    ///
    /// Returns [`OsuError::Format`] if the file cannot be read, or [`OsuError::Data`] if the
    /// fields are insufficient.
    pub fn from_file(path: impl AsRef<Path>, ids: &SyntheticIds) -> Result<Self, OsuError> {
        super::read_beatmap_with_ids(path, ids).map(|output| output.beatmap)
    }

    /// Builds the record from fields read out of `source_file`.
    ///
    /// Relative file names are resolved against the directory of `source_file`. The path itself
    /// is stored as given. A synthetic id is taken from `ids` only when everything else succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if `AudioFilename` is absent, if `Video` comes without
    /// `VideoOffset`, if `BeatmapID` or `VideoOffset` are not integers, or if a synthetic id is
    /// needed but `ids` is exhausted.
    pub fn from_fields(
        source_file: impl Into<PathBuf>,
        fields: &RawFields,
        ids: &SyntheticIds,
    ) -> Result<Self, DataError> {
        let source_file = source_file.into();
        let dir = source_file.parent().unwrap_or_else(|| Path::new(""));

        let audio = fields
            .get("AudioFilename")
            .ok_or(DataError::MissingField("AudioFilename"))?;
        let audio_path = resolve(dir, audio);

        let video = fields
            .get(key::VIDEO)
            .map(|file| -> Result<BeatmapVideo, DataError> {
                let offset = fields
                    .get(key::VIDEO_OFFSET)
                    .ok_or(DataError::MissingField(key::VIDEO_OFFSET))?;
                Ok(BeatmapVideo {
                    path: resolve(dir, file),
                    offset_ms: parse_int(key::VIDEO_OFFSET, offset)?,
                })
            })
            .transpose()?;

        let background = fields.get(key::BACKGROUND).unwrap_or(lex::NO_BACKGROUND);
        let background_path = resolve(dir, background);

        let declared_id = fields
            .get("BeatmapID")
            .map(|id| parse_int("BeatmapID", id))
            .transpose()?;

        let artist_romanized = fields.get("Artist").unwrap_or(UNKNOWN_ARTIST).to_owned();
        let title_romanized = fields.get("Title").unwrap_or(UNKNOWN_TITLE).to_owned();
        let (artist, title) = match (fields.get("ArtistUnicode"), fields.get("TitleUnicode")) {
            (Some(artist), Some(title)) => (artist.to_owned(), title.to_owned()),
            _ => (artist_romanized.clone(), title_romanized.clone()),
        };

        let (tags, tags_string): (Vec<String>, String) =
            fields.get("Tags").map_or_else(Default::default, |tags| {
                (
                    tags.split(TAG_SEPARATOR).map(str::to_owned).collect(),
                    tags.to_owned(),
                )
            });

        let id = match declared_id {
            Some(id) => id,
            None => ids.next_id().ok_or(DataError::SyntheticIdsExhausted)?,
        };

        Ok(Self {
            id,
            artist,
            artist_romanized,
            title,
            title_romanized,
            source: fields.get("Source").unwrap_or(UNKNOWN_SOURCE).to_owned(),
            creator: fields.get("Creator").unwrap_or(UNKNOWN_CREATOR).to_owned(),
            tags,
            tags_string,
            format_version: fields.get(key::FILE_FORMAT).map(str::to_owned),
            audio_path,
            video,
            background_path,
            source_file,
        })
    }

    /// The declared `BeatmapID`, or a negative synthetic id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Whether [`Beatmap::id`] is synthetic.
    #[must_use]
    pub const fn has_synthetic_id(&self) -> bool {
        self.id < 0
    }

    /// The artist for display, in its original script if the map provides one.
    #[must_use]
    pub fn artist(&self) -> &str {
        &self.artist
    }

    /// The romanized artist.
    #[must_use]
    pub fn artist_romanized(&self) -> &str {
        &self.artist_romanized
    }

    /// The title for display, in its original script if the map provides one.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The romanized title.
    #[must_use]
    pub fn title_romanized(&self) -> &str {
        &self.title_romanized
    }

    /// Where the song comes from, such as a game or an anime.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Who mapped it.
    #[must_use]
    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// The search tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The search tags as written in the file.
    #[must_use]
    pub fn tags_string(&self) -> &str {
        &self.tags_string
    }

    /// The version from `osu file format vN`.
    #[must_use]
    pub fn format_version(&self) -> Option<&str> {
        self.format_version.as_deref()
    }

    /// The `.osu` file, as it was given.
    #[must_use]
    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    /// The audio file.
    #[must_use]
    pub fn audio_path(&self) -> &Path {
        &self.audio_path
    }

    /// The background video, if any.
    #[must_use]
    pub const fn video(&self) -> Option<&BeatmapVideo> {
        self.video.as_ref()
    }

    /// The video file, if any.
    #[must_use]
    pub fn video_path(&self) -> Option<&Path> {
        self.video.as_ref().map(|video| video.path.as_path())
    }

    /// The video start offset in milliseconds, if any.
    #[must_use]
    pub fn video_offset_ms(&self) -> Option<i32> {
        self.video.as_ref().map(|video| video.offset_ms)
    }

    /// The background image.
    ///
    /// This is always set. A map without background points to a file named
    /// [`NO_BACKGROUND`](lex::NO_BACKGROUND) which usually does not exist, so check the file
    /// system rather than the name.
    #[must_use]
    pub fn background_path(&self) -> &Path {
        &self.background_path
    }

    fn sort_key(&self) -> (&str, &str) {
        (&self.artist_romanized, &self.title_romanized)
    }
}

/// Joins a file name from the map onto `dir`. Root and prefix components are dropped, so the
/// result stays under `dir` even for a name like `/etc/audio.mp3`.
fn resolve(dir: &Path, name: &str) -> PathBuf {
    dir.join(
        Path::new(name)
            .components()
            .filter(|c| {
                matches!(
                    c,
                    Component::Normal(_) | Component::CurDir | Component::ParentDir
                )
            })
            .collect::<PathBuf>(),
    )
}

fn parse_int(key: &'static str, value: &str) -> Result<i32, DataError> {
    value
        .trim()
        .parse()
        .map_err(|source| DataError::InvalidInteger {
            key,
            value: value.to_owned(),
            source,
        })
}

impl PartialEq for Beatmap {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Beatmap {}

impl PartialOrd for Beatmap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Beatmap {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl Hash for Beatmap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sort_key().hash(state);
    }
}

impl std::fmt::Display for Beatmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist_romanized, self.title_romanized)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn build(pairs: &[(&str, &str)]) -> Result<Beatmap, DataError> {
        let fields: RawFields = pairs.iter().copied().collect();
        Beatmap::from_fields("songs/1 xi - Blue Zenith/map.osu", &fields, &SyntheticIds::new())
    }

    #[test]
    fn defaults() {
        let beatmap = build(&[("AudioFilename", "audio.mp3")]).unwrap();
        assert_eq!(beatmap.id(), -1);
        assert!(beatmap.has_synthetic_id());
        assert_eq!(beatmap.artist(), UNKNOWN_ARTIST);
        assert_eq!(beatmap.artist_romanized(), UNKNOWN_ARTIST);
        assert_eq!(beatmap.title(), UNKNOWN_TITLE);
        assert_eq!(beatmap.title_romanized(), UNKNOWN_TITLE);
        assert_eq!(beatmap.source(), UNKNOWN_SOURCE);
        assert_eq!(beatmap.creator(), UNKNOWN_CREATOR);
        assert!(beatmap.tags().is_empty());
        assert_eq!(beatmap.tags_string(), "");
        assert_eq!(beatmap.format_version(), None);
        assert_eq!(beatmap.video(), None);
        assert_eq!(
            beatmap.source_file(),
            Path::new("songs/1 xi - Blue Zenith/map.osu")
        );
        assert_eq!(
            beatmap.audio_path(),
            Path::new("songs/1 xi - Blue Zenith/audio.mp3")
        );
        assert_eq!(
            beatmap.background_path(),
            Path::new("songs/1 xi - Blue Zenith/none")
        );
    }

    #[test]
    fn unicode_needs_both_fields() {
        let both = build(&[
            ("AudioFilename", "a.mp3"),
            ("Artist", "Hatsune Miku"),
            ("Title", "Senbonzakura"),
            ("ArtistUnicode", "初音ミク"),
            ("TitleUnicode", "千本桜"),
        ])
        .unwrap();
        assert_eq!(both.artist(), "初音ミク");
        assert_eq!(both.title(), "千本桜");
        assert_eq!(both.artist_romanized(), "Hatsune Miku");
        assert_eq!(both.title_romanized(), "Senbonzakura");

        let only_artist = build(&[
            ("AudioFilename", "a.mp3"),
            ("Artist", "Hatsune Miku"),
            ("Title", "Senbonzakura"),
            ("ArtistUnicode", "初音ミク"),
        ])
        .unwrap();
        assert_eq!(only_artist.artist(), "Hatsune Miku");
        assert_eq!(only_artist.title(), "Senbonzakura");
    }

    #[test]
    fn tags_split_on_equals() {
        let beatmap = build(&[("AudioFilename", "a.mp3"), ("Tags", "foo=bar=baz")]).unwrap();
        assert_eq!(beatmap.tags(), ["foo", "bar", "baz"]);
        assert_eq!(beatmap.tags_string(), "foo=bar=baz");

        let spaced = build(&[("AudioFilename", "a.mp3"), ("Tags", "foo bar")]).unwrap();
        assert_eq!(spaced.tags(), ["foo bar"]);

        let gaps = build(&[("AudioFilename", "a.mp3"), ("Tags", "=a==b")]).unwrap();
        assert_eq!(gaps.tags(), ["", "a", "", "b"]);
        assert_eq!(gaps.tags_string(), "=a==b");

        let blank = build(&[("AudioFilename", "a.mp3"), ("Tags", "")]).unwrap();
        assert_eq!(blank.tags(), [""]);
        assert_eq!(blank.tags_string(), "");
    }

    #[test]
    fn video() {
        let beatmap = build(&[
            ("AudioFilename", "a.mp3"),
            ("Video", "clip.avi"),
            ("VideoOffset", "5000"),
        ])
        .unwrap();
        assert_eq!(
            beatmap.video_path(),
            Some(Path::new("songs/1 xi - Blue Zenith/clip.avi"))
        );
        assert_eq!(beatmap.video_offset_ms(), Some(5000));

        assert_eq!(
            build(&[("AudioFilename", "a.mp3"), ("Video", "clip.avi")]).unwrap_err(),
            DataError::MissingField("VideoOffset")
        );
        assert!(matches!(
            build(&[
                ("AudioFilename", "a.mp3"),
                ("Video", "clip.avi"),
                ("VideoOffset", "soon"),
            ]),
            Err(DataError::InvalidInteger {
                key: "VideoOffset",
                ..
            })
        ));
    }

    #[test]
    fn absolute_names_stay_in_the_map_directory() {
        let beatmap = build(&[
            ("AudioFilename", "/etc/audio.mp3"),
            ("Background", "/bg.jpg"),
            ("Video", "/tmp/clip.avi"),
            ("VideoOffset", "0"),
        ])
        .unwrap();
        assert_eq!(
            beatmap.audio_path(),
            Path::new("songs/1 xi - Blue Zenith/etc/audio.mp3")
        );
        assert_eq!(
            beatmap.background_path(),
            Path::new("songs/1 xi - Blue Zenith/bg.jpg")
        );
        assert_eq!(
            beatmap.video_path(),
            Some(Path::new("songs/1 xi - Blue Zenith/tmp/clip.avi"))
        );

        let nested = build(&[("AudioFilename", "sub/audio.mp3")]).unwrap();
        assert_eq!(
            nested.audio_path(),
            Path::new("songs/1 xi - Blue Zenith/sub/audio.mp3")
        );
    }

    #[test]
    fn audio_is_mandatory() {
        assert_eq!(
            build(&[("Title", "t"), ("BeatmapID", "1")]).unwrap_err(),
            DataError::MissingField("AudioFilename")
        );
    }

    #[test]
    fn declared_id() {
        let ids = SyntheticIds::new();
        let fields: RawFields = [("AudioFilename", "a.mp3"), ("BeatmapID", "658127")]
            .into_iter()
            .collect();
        let beatmap = Beatmap::from_fields("map.osu", &fields, &ids).unwrap();
        assert_eq!(beatmap.id(), 658127);
        assert!(!beatmap.has_synthetic_id());
        assert_eq!(ids.peek(), SyntheticIds::FIRST);

        assert!(matches!(
            build(&[("AudioFilename", "a.mp3"), ("BeatmapID", "abc")]),
            Err(DataError::InvalidInteger {
                key: "BeatmapID",
                ..
            })
        ));
    }

    #[test]
    fn failed_build_takes_no_synthetic_id() {
        let ids = SyntheticIds::new();
        let fields: RawFields = [("Title", "t")].into_iter().collect();
        assert!(Beatmap::from_fields("map.osu", &fields, &ids).is_err());
        assert_eq!(ids.peek(), SyntheticIds::FIRST);
    }

    #[test]
    fn exhausted_ids_fail_only_maps_without_id() {
        let ids = SyntheticIds::starting_at(i32::MIN);
        let anonymous: RawFields = [("AudioFilename", "a.mp3")].into_iter().collect();
        assert_eq!(
            Beatmap::from_fields("map.osu", &anonymous, &ids).unwrap_err(),
            DataError::SyntheticIdsExhausted
        );

        let declared: RawFields = [("AudioFilename", "a.mp3"), ("BeatmapID", "3")]
            .into_iter()
            .collect();
        assert_eq!(
            Beatmap::from_fields("map.osu", &declared, &ids).unwrap().id(),
            3
        );
    }

    #[test]
    fn compared_by_romanized_artist_and_title() {
        let ids = SyntheticIds::new();
        let a: RawFields = [("AudioFilename", "a.mp3"), ("Artist", "xi"), ("Title", "Blue Zenith")]
            .into_iter()
            .collect();
        let b: RawFields = [
            ("AudioFilename", "b.ogg"),
            ("Artist", "xi"),
            ("Title", "Blue Zenith"),
            ("BeatmapID", "42"),
        ]
        .into_iter()
        .collect();
        let c: RawFields = [("AudioFilename", "a.mp3"), ("Artist", "xi"), ("Title", "FREEDOM DiVE")]
            .into_iter()
            .collect();
        let a = Beatmap::from_fields("x/hard.osu", &a, &ids).unwrap();
        let b = Beatmap::from_fields("y/easy.osu", &b, &ids).unwrap();
        let c = Beatmap::from_fields("z/insane.osu", &c, &ids).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert!(a < c);
        assert_eq!(a.to_string(), "xi - Blue Zenith");
    }
}
