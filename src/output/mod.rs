use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::pipeline::TranscriptResult;

/// Render a result in the requested format
fn render(result: &TranscriptResult, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => result.as_text(),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
    })
}

/// Save a transcript to a file, creating parent directories as needed.
///
/// The content is rendered fully before any write happens, so a failed run
/// never leaves a partial transcript behind.
pub fn save_to_file(result: &TranscriptResult, path: &Path, format: &OutputFormat) -> Result<()> {
    let content = render(result, format)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs_err::create_dir_all(parent)?;
        }
    }

    fs_err::write(path, content)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;
    Ok(())
}

/// Print a transcript to stdout
pub fn print_to_console(result: &TranscriptResult, format: &OutputFormat) -> Result<()> {
    println!("{}", render(result, format)?);
    Ok(())
}
