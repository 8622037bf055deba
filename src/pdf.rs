// PDF text acquisition - all pages concatenated into one buffer

use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Extract the text of every page of a PDF into a single string.
///
/// The extraction pass has no notion of layout; downstream pattern rules
/// run against this one concatenated buffer.
pub fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read PDF file: {}", path.display()))?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| anyhow!("Failed to extract text from {}: {e}", path.display()))?;

    log::info!(
        "Extracted {} characters from {}",
        text.len(),
        path.display()
    );

    Ok(text)
}
