//! Example: Scan a songs folder and print the beatmaps as JSON
//!
//! Without a folder argument, the `Songs` folder of a detected osu! installation is scanned.
//!
//! ```bash
//! RUST_LOG=info cargo run --example scan_songs --features serde -- ~/osu!/Songs
//! ```

use std::path::PathBuf;

use clap::Parser;
use osu_rs::osu::prelude::*;

/// Scan a songs folder for beatmaps
#[derive(Parser, Debug)]
#[clap(name = "scan-songs")]
struct Args {
    /// Folder to scan, defaults to the songs folder of the installation
    root: Option<PathBuf>,

    /// Keep beatmaps sharing artist and title
    #[clap(long)]
    keep_duplicates: bool,

    /// Extension of the beatmap files
    #[clap(long, default_value = "osu")]
    extension: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let Some(root) = args
        .root
        .or_else(|| find_installation().map(songs_directory))
    else {
        eprintln!("no osu! installation found, pass a folder to scan");
        std::process::exit(2);
    };

    let options = ScanOptions {
        extension: args.extension,
        dedupe_songs: !args.keep_duplicates,
    };
    let output = match scan_directory_with_ids(
        &root,
        &options,
        SyntheticIds::global(),
        &ScanProgress::new(),
    ) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut beatmaps: Vec<_> = output.beatmaps.into_values().collect();
    beatmaps.sort();
    match serde_json::to_string_pretty(&beatmaps) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to serialize beatmaps: {e}"),
    }

    for failure in &output.failures {
        eprintln!("{}", failure.error);
    }
    eprintln!(
        "{} beatmaps, {} duplicates, {} failures",
        beatmaps.len(),
        output.duplicates,
        output.failures.len()
    );
}
