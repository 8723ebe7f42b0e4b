use log::{debug, info};

/// Puts the aggregated text on the system clipboard. A missing clipboard
/// mechanism is an error for the caller to report, never silently dropped.
#[cfg(feature = "clipboard-support")]
pub fn write_clipboard(content: &str) -> anyhow::Result<()> {
    use clipboard::{ClipboardContext, ClipboardProvider};
    use log::warn;

    debug!("Writing {} bytes to clipboard", content.len());

    let mut ctx: ClipboardContext = match ClipboardProvider::new() {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!("Failed to access clipboard: {}", e);
            return Err(anyhow::anyhow!("Failed to access clipboard: {}", e));
        }
    };

    match ctx.set_contents(content.to_owned()) {
        Ok(_) => {
            info!("Copied {} bytes to clipboard", content.len());
            Ok(())
        }
        Err(e) => {
            warn!("Failed to copy to clipboard: {}", e);
            Err(anyhow::anyhow!("Failed to copy to clipboard: {}", e))
        }
    }
}

#[cfg(not(feature = "clipboard-support"))]
pub fn write_clipboard(content: &str) -> anyhow::Result<()> {
    debug!("Clipboard support disabled; {} bytes dropped", content.len());
    info!("Built without clipboard support");
    Err(anyhow::anyhow!(
        "This build has no clipboard support (clipboard-support feature disabled)"
    ))
}
