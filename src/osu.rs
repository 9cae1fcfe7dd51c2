//! The reader of osu! beatmap (`.osu`) files.
//!
//! This module consists of two phases: reading fields and building the record.
//!
//! `lex` module reads the line-oriented, section-delimited text into [`lex::RawFields`]. It
//! tolerates lines it cannot make sense of, but fails on the things which make the whole file
//! suspicious: an unreadable file, an unknown section header and a first line too short to
//! hold a format version.
//!
//! `model` module builds a [`model::Beatmap`] from the fields, filling in placeholders and
//! resolving the referenced files against the directory of the `.osu` file.
//!
//! In detail, our policies are:
//!
//! - Read metadata only. Timing points, colours and hit objects are skipped.
//! - Extract the background and the video from the events, but not the storyboard.
//! - Never write to beatmap files.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod id;
pub mod lex;
pub mod mixin;
pub mod model;
pub mod prelude;
pub mod section;

use self::{
    id::SyntheticIds,
    lex::{FormatError, LexOutput, LexWarningWithRange},
    model::{Beatmap, DataError},
};

/// An error occurred when building a [`Beatmap`] from a file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OsuError {
    /// The file is unreadable or not in the `.osu` format.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The file lacks what a [`Beatmap`] needs.
    #[error("invalid beatmap `{}`: {source}", .path.display())]
    Data {
        /// The file path.
        path: PathBuf,
        /// The cause.
        source: DataError,
    },
}

/// Output of reading a beatmap file.
#[derive(Debug, Clone)]
#[must_use]
pub struct OsuOutput {
    /// The built record.
    pub beatmap: Beatmap,
    /// Lines that were skipped as malformed.
    pub warnings: Vec<LexWarningWithRange>,
}

/// Reads a beatmap file, taking synthetic ids from the process-wide [`SyntheticIds::global`].
///
/// # Example
///
/// ```no_run
/// use osu_rs::osu::{OsuOutput, read_beatmap};
///
/// let OsuOutput { beatmap, warnings } = read_beatmap("Songs/1 xi - Blue Zenith/map.osu")?;
/// println!("{beatmap} ({} warnings)", warnings.len());
/// println!("Audio: {}", beatmap.audio_path().display());
/// # Ok::<(), osu_rs::osu::OsuError>(())
/// ```
///
/// # Errors
///
/// See [`read_beatmap_with_ids`].
pub fn read_beatmap(path: impl AsRef<Path>) -> Result<OsuOutput, OsuError> {
    read_beatmap_with_ids(path, SyntheticIds::global())
}

/// Reads a beatmap file, taking synthetic ids from `ids`.
///
/// A step of [`read_beatmap`].
///
/// # Errors
///
/// Returns [`OsuError::Format`] if the file cannot be read or is not in the `.osu` format, and
/// [`OsuError::Data`] if it lacks a field required by [`Beatmap::from_fields`].
pub fn read_beatmap_with_ids(
    path: impl AsRef<Path>,
    ids: &SyntheticIds,
) -> Result<OsuOutput, OsuError> {
    let path = path.as_ref();
    let LexOutput {
        fields,
        lex_warnings,
    } = lex::read(path)?;
    let beatmap = Beatmap::from_fields(path, &fields, ids).map_err(|source| OsuError::Data {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(OsuOutput {
        beatmap,
        warnings: lex_warnings,
    })
}
