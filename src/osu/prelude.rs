//! Prelude module for the osu crate.
//!
//! This module re-exports all public types from the osu module for convenient access.
//! You can use `use osu_rs::osu::prelude::*;` to import all osu types at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{SimpleSource, ToAriadne, emit_lex_warnings};

pub use super::{
    OsuError, OsuOutput,
    id::SyntheticIds,
    lex::{
        FORMAT_PREFIX, FormatError, LexOutput, LexWarning, LexWarningWithRange, NO_BACKGROUND,
        RawFields, SyntaxError, SyntaxErrorWithRange,
        event::{BackgroundEvent, EventLine, StoryboardKind, VideoEvent},
        key, parse, read,
    },
    mixin::{SourceRangeMixin, SourceRangeMixinExt},
    model::{
        Beatmap, BeatmapVideo, DataError, UNKNOWN_ARTIST, UNKNOWN_CREATOR, UNKNOWN_SOURCE,
        UNKNOWN_TITLE,
    },
    read_beatmap, read_beatmap_with_ids,
    section::Section,
};

#[cfg(feature = "scan")]
pub use crate::scan::{
    ScanError, ScanFailure, ScanOptions, ScanOutput, ScanProgress, find_beatmap_files,
    install::{find_installation, songs_directory},
    scan_directory, scan_directory_with_ids,
};
