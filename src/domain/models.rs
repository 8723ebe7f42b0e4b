use std::collections::HashSet;
use std::path::PathBuf;

/// Directory and file names skipped by default at every traversal level.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", ".idea"];

/// Literal entry names excluded from traversal. Matching is exact and
/// case-sensitive; there is no globbing. An excluded directory's whole
/// subtree is never visited.
#[derive(Debug, Clone)]
pub struct ExcludeList {
    names: HashSet<String>,
}

impl ExcludeList {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExcludeList {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds the list from a comma-separated CLI value. The result
    /// *replaces* the defaults entirely rather than extending them.
    pub fn from_csv(list: &str) -> Self {
        ExcludeList {
            names: list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExcludeList {
    fn default() -> Self {
        ExcludeList::from_names(DEFAULT_EXCLUDES.iter().copied())
    }
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub root: PathBuf,
    pub excludes: ExcludeList,
    pub copy: bool,
}

/// Result of concatenating the selected files.
#[derive(Debug)]
pub struct AggregatedPayload {
    pub text: String,
    pub file_count: usize,
    pub skipped: Vec<PathBuf>,
}
