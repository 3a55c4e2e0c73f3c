//! Finding MP4-family files on disk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions accepted when walking directories, compared case-insensitively.
pub const MP4_EXTENSIONS: &[&str] = &["m4v", "mp4", "m4a"];

/// Check if a path has an MP4-family extension.
///
/// ```
/// use std::path::Path;
/// use mp4reader::discover::is_mp4_file;
///
/// assert!(is_mp4_file(Path::new("Green.M4V")));
/// assert!(!is_mp4_file(Path::new("notes.txt")));
/// ```
pub fn is_mp4_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MP4_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand `root` into the MP4 files it names. A file is returned as-is
/// whatever its extension; a directory is walked recursively.
pub fn find_mp4_files(root: &Path) -> Vec<PathBuf> {
    if !root.is_dir() {
        return vec![root.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "error walking directory");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_mp4_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}
