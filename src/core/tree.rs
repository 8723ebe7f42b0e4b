use crate::domain::models::ExcludeList;
use crate::infra::file_system::list_entries;
use log::debug;
use std::path::Path;

const TEE: &str = "├── ";
const CORNER: &str = "└── ";
const BAR_PAD: &str = "│   ";
const BLANK_PAD: &str = "    ";

/// Renders the tree rooted at `root` as display lines, depth-first
/// pre-order. The last entry of each sibling group gets the corner
/// connector; ancestors that were last contribute blank padding to the
/// prefix, the rest contribute a vertical bar. The root line itself is the
/// caller's to print.
pub fn render_tree(root: &Path, excludes: &ExcludeList) -> anyhow::Result<Vec<String>> {
    debug!("Rendering tree for: {}", root.display());
    render_level(root, "", excludes)
}

fn render_level(dir: &Path, prefix: &str, excludes: &ExcludeList) -> anyhow::Result<Vec<String>> {
    let entries = list_entries(dir, excludes)?;
    let mut lines = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let is_last = index + 1 == entries.len();
        let connector = if is_last { CORNER } else { TEE };
        lines.push(format!("{}{}{}", prefix, connector, entry.name));

        if entry.is_dir {
            let pad = if is_last { BLANK_PAD } else { BAR_PAD };
            let child_prefix = format!("{}{}", prefix, pad);
            lines.extend(render_level(&entry.path, &child_prefix, excludes)?);
        }
    }

    Ok(lines)
}
