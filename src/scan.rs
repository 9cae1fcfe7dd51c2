//! Searching a songs folder for beatmaps.
//!
//! Every `.osu` file under the root is read on its own. A file which fails is logged and
//! recorded in [`ScanOutput::failures`], and the scan goes on with the next one. With the
//! `parallel` feature, files are read on the rayon thread pool. The only state shared between
//! the reads are the [`SyntheticIds`] and the [`ScanProgress`], both atomic.

pub mod install;

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::osu::{OsuError, id::SyntheticIds, model::Beatmap, read_beatmap_with_ids};

/// The extension of beatmap files.
pub const BEATMAP_EXTENSION: &str = "osu";

/// The scan could not start.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ScanError {
    /// Specified path does not exist
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),
    /// Path exists but is not a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Options of [`scan_directory_with_ids`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extension of the files to read, compared case-insensitively.
    pub extension: String,
    /// Whether to keep only the first of beatmaps that are equal, i.e. share the romanized
    /// artist and title. Beatmaps sharing an id are always reduced to the first.
    pub dedupe_songs: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: BEATMAP_EXTENSION.to_owned(),
            dedupe_songs: true,
        }
    }
}

/// How far a running scan is. Can be read from another thread.
#[derive(Debug, Default)]
pub struct ScanProgress {
    read: AtomicUsize,
    total: AtomicUsize,
}

impl ScanProgress {
    /// Creates a progress at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            read: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
        }
    }

    /// The number of files attempted so far.
    #[must_use]
    pub fn read(&self) -> usize {
        self.read.load(Ordering::Relaxed)
    }

    /// The number of files found, once the directory has been walked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    fn start(&self, total: usize) {
        self.read.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    fn advance(&self) {
        self.read.fetch_add(1, Ordering::Relaxed);
    }
}

/// A file which could not be made into a [`Beatmap`].
#[derive(Debug)]
pub struct ScanFailure {
    /// The file.
    pub path: PathBuf,
    /// Why it failed.
    pub error: OsuError,
}

/// Result of a scan.
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// The beatmaps keyed by [`Beatmap::id`].
    pub beatmaps: HashMap<i32, Beatmap>,
    /// The files that failed.
    pub failures: Vec<ScanFailure>,
    /// The number of beatmaps read successfully but left out as duplicates.
    pub duplicates: usize,
}

/// Lists the files with `extension` under `root`, recursively and sorted by path.
///
/// Entries which cannot be accessed are logged and skipped.
///
/// # Errors
///
/// Fails if `root` is not an existing directory.
pub fn find_beatmap_files(
    root: impl AsRef<Path>,
    extension: &str,
) -> Result<Vec<PathBuf>, ScanError> {
    let root = root.as_ref();
    if !root.exists() {
        return Err(ScanError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("error accessing entry: {e}");
                continue;
            }
        };
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if entry.file_type().is_file() && matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Scans `root` with the default options, the process-wide synthetic ids and a fresh progress.
///
/// # Errors
///
/// See [`find_beatmap_files`].
pub fn scan_directory(root: impl AsRef<Path>) -> Result<ScanOutput, ScanError> {
    scan_directory_with_ids(
        root,
        &ScanOptions::default(),
        SyntheticIds::global(),
        &ScanProgress::new(),
    )
}

/// Reads every beatmap file under `root`.
///
/// A step of [`scan_directory`].
///
/// # Errors
///
/// See [`find_beatmap_files`]. Failures of single files are not errors of the scan.
pub fn scan_directory_with_ids(
    root: impl AsRef<Path>,
    options: &ScanOptions,
    ids: &SyntheticIds,
    progress: &ScanProgress,
) -> Result<ScanOutput, ScanError> {
    let root = root.as_ref();
    let files = find_beatmap_files(root, &options.extension)?;
    progress.start(files.len());
    log::info!("found {} beatmap files under {}", files.len(), root.display());

    let read_one = |path: &PathBuf| {
        let result = read_beatmap_with_ids(path, ids);
        progress.advance();
        match result {
            Ok(output) => {
                for warning in &output.warnings {
                    log::warn!("{}: skipped {warning}", path.display());
                }
                Ok(output.beatmap)
            }
            Err(error) => {
                log::warn!("failed to read beatmap: {error}");
                Err(error)
            }
        }
    };
    #[cfg(feature = "parallel")]
    let results: Vec<_> = files.par_iter().map(read_one).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<_> = files.iter().map(read_one).collect();

    let mut output = ScanOutput::default();
    let mut songs = HashSet::new();
    for (path, result) in files.into_iter().zip(results) {
        let beatmap = match result {
            Ok(beatmap) => beatmap,
            Err(error) => {
                output.failures.push(ScanFailure { path, error });
                continue;
            }
        };
        let song = (
            beatmap.artist_romanized().to_owned(),
            beatmap.title_romanized().to_owned(),
        );
        let is_duplicate = output.beatmaps.contains_key(&beatmap.id())
            || (options.dedupe_songs && songs.contains(&song));
        if is_duplicate {
            output.duplicates += 1;
            continue;
        }
        songs.insert(song);
        output.beatmaps.insert(beatmap.id(), beatmap);
    }

    log::info!(
        "scanned {}: {} beatmaps, {} duplicates, {} failures",
        root.display(),
        output.beatmaps.len(),
        output.duplicates,
        output.failures.len()
    );
    Ok(output)
}
