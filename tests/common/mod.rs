//! Helpers to lay out beatmap fixtures on disk.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const BLUE_ZENITH: &str = include_str!("../files/blue_zenith.osu");
pub const SENBONZAKURA: &str = include_str!("../files/senbonzakura.osu");
pub const UNKNOWN_SECTION: &str = include_str!("../files/unknown_section.osu");
pub const NO_AUDIO: &str = include_str!("../files/no_audio.osu");

/// Writes `source` to `dir/relative`, creating the parent folders.
pub fn write_map(dir: &Path, relative: &str, source: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, source).unwrap();
    path
}
