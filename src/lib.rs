//! The osu! beatmap (`.osu`) metadata reader.
//!
//! - [`osu`] reads a single `.osu` file into a [`osu::model::Beatmap`].
//! - [`scan`] searches a songs folder for beatmaps and reads them all, isolating failures.
//! - [`diagnostics`] renders the positions of skipped lines and syntax errors.

#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod osu;
#[cfg(feature = "scan")]
pub mod scan;
pub mod util;
