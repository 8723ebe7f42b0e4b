use crate::domain::models::ExcludeList;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// One entry of a single directory level, in filesystem read order.
/// `is_dir` comes from the non-following file-type check, so a symlink to a
/// directory reports as a leaf and is never recursed into.
#[derive(Debug, Clone)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Lists one directory level, dropping excluded names. Order is whatever
/// the filesystem reports; it is not sorted, so the tree view and the
/// selection list stay consistent with each other rather than with any
/// particular collation.
pub fn list_entries(dir: &Path, excludes: &ExcludeList) -> anyhow::Result<Vec<DirEntryInfo>> {
    debug!("Listing directory: {}", dir.display());
    let mut entries = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();

        if excludes.contains(&name) {
            debug!("Excluding entry: {}", name);
            continue;
        }

        let is_dir = entry.file_type()?.is_dir();
        entries.push(DirEntryInfo {
            name,
            path: entry.path(),
            is_dir,
        });
    }

    Ok(entries)
}

/// What a selected file's bytes turned out to be.
#[derive(Debug)]
pub enum FileText {
    Text(String),
    Binary,
}

/// Reads a file for aggregation. I/O failures propagate; bytes that are not
/// valid UTF-8 come back as `Binary` so the caller can skip the file
/// instead of aborting the whole run.
pub fn read_file_text(path: &Path) -> anyhow::Result<FileText> {
    debug!("Reading file: {}", path.display());
    let bytes = fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(text) => {
            debug!("Read {} bytes of text", text.len());
            Ok(FileText::Text(text))
        }
        Err(_) => {
            warn!("File is not valid UTF-8: {}", path.display());
            Ok(FileText::Binary)
        }
    }
}
