use crate::domain::models::ExcludeList;
use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Enumerates every non-directory entry under `root`, depth-first, in the
/// same visiting order and with the same exclusion semantics as the tree
/// renderer. Directories are traversed into but never emitted. Symlinks are
/// not followed, so a link to a directory counts as a leaf here just as it
/// does in the rendered tree.
pub fn collect_files(root: &Path, excludes: &ExcludeList) -> anyhow::Result<Vec<PathBuf>> {
    debug!("Collecting files under: {}", root.display());
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            // The root itself is never filtered, only entries below it.
            e.depth() == 0 || !excludes.contains(&e.file_name().to_string_lossy())
        })
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        debug!("Collected: {}", entry.path().display());
        files.push(entry.path().to_path_buf());
    }

    info!("Collected {} files", files.len());
    Ok(files)
}
