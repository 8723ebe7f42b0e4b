use crate::domain::models::AggregatedPayload;
use crate::infra::file_system::FileText;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Concatenates the selected files in selection order. Each included file
/// contributes a `// ----- path -----` header line, its content, and a
/// blank line. Files whose bytes are not decodable text are skipped and
/// recorded; read failures propagate.
pub fn aggregate(
    selected: &[PathBuf],
    read: impl Fn(&Path) -> anyhow::Result<FileText>,
) -> anyhow::Result<AggregatedPayload> {
    let mut text = String::new();
    let mut file_count = 0;
    let mut skipped = Vec::new();

    for path in selected {
        match read(path)? {
            FileText::Text(content) => {
                debug!("Aggregating {}", path.display());
                text.push_str(&format!("// ----- {} -----\n{}\n\n", path.display(), content));
                file_count += 1;
            }
            FileText::Binary => {
                warn!("Skipping non-text file: {}", path.display());
                skipped.push(path.clone());
            }
        }
    }

    Ok(AggregatedPayload {
        text,
        file_count,
        skipped,
    })
}
