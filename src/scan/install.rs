//! Locating an osu! installation without asking the user.

use std::path::{Path, PathBuf};

/// The file whose presence marks an installation folder.
pub const EXECUTABLE: &str = "osu!.exe";

/// Folders osu! is commonly installed to, probed in order.
pub const USUAL_PATHS: [&str; 18] = [
    "C:\\Program Files/osu!",
    "C:\\Programme/osu!",
    "C:\\Programme (x86)/osu!",
    "C:\\Program Files (x86)/osu!",
    "C:\\osu!",
    "C:\\Games/osu!",
    "D:\\Games/osu!",
    "E:\\Games/osu!",
    "C:\\Spiele/osu!",
    "D:\\Spiele/osu!",
    "E:\\Spiele/osu!",
    "D:\\osu!",
    "E:\\osu!",
    "F:\\osu!",
    "G:\\osu!",
    "H:\\osu!",
    ".",
    "..",
];

/// Whether `dir` contains [`EXECUTABLE`].
#[must_use]
pub fn is_installation(dir: impl AsRef<Path>) -> bool {
    dir.as_ref().join(EXECUTABLE).is_file()
}

/// Probes [`USUAL_PATHS`].
#[must_use]
pub fn find_installation() -> Option<PathBuf> {
    find_installation_in(USUAL_PATHS)
}

/// Returns the first of `candidates` which is an installation, made absolute if possible.
#[must_use]
pub fn find_installation_in<P: AsRef<Path>>(
    candidates: impl IntoIterator<Item = P>,
) -> Option<PathBuf> {
    let found = candidates
        .into_iter()
        .find(|candidate| is_installation(candidate))?;
    let found = found.as_ref();
    log::debug!("found installation at {}", found.display());
    Some(std::path::absolute(found).unwrap_or_else(|_| found.to_path_buf()))
}

/// The folder holding the beatmap sets of an installation.
#[must_use]
pub fn songs_directory(root: impl AsRef<Path>) -> PathBuf {
    root.as_ref().join("Songs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_folder_with_executable() {
        let empty = tempfile::tempdir().unwrap();
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join(EXECUTABLE), b"").unwrap();
        std::fs::write(second.path().join(EXECUTABLE), b"").unwrap();

        assert!(!is_installation(empty.path()));
        assert!(is_installation(first.path()));
        assert_eq!(
            find_installation_in([empty.path(), first.path(), second.path()]),
            Some(first.path().to_path_buf())
        );
        assert_eq!(find_installation_in([empty.path()]), None);
    }

    #[test]
    fn songs_folder() {
        assert_eq!(
            songs_directory("C:\\osu!"),
            Path::new("C:\\osu!").join("Songs")
        );
    }
}
