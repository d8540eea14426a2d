//! Output shaping and writing for CLI results
//!
//! Shaping (`--format`, `--json`, `--pretty`) happens after the response is
//! received and never influences what gets signed.

use crate::cli::ContentFormat;
use crate::error::CaptureError;
use crate::types::{ContentResponse, MetadataResponse};
use crate::utils::{format_bytes, is_stdout_target};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Pick the requested part of a content response, or the whole response as
/// indented JSON when `json` is set.
pub fn render_content(
    content: &ContentResponse,
    format: ContentFormat,
    json: bool,
) -> Result<Vec<u8>, CaptureError> {
    if json {
        return Ok(serde_json::to_vec_pretty(content)?);
    }

    let text = match format {
        ContentFormat::Html => &content.html,
        ContentFormat::Text => &content.text_content,
        ContentFormat::Markdown => &content.markdown,
    };
    Ok(text.clone().into_bytes())
}

pub fn render_metadata(metadata: &MetadataResponse, pretty: bool) -> Result<Vec<u8>, CaptureError> {
    let rendered = if pretty {
        serde_json::to_vec_pretty(metadata)?
    } else {
        serde_json::to_vec(metadata)?
    };
    Ok(rendered)
}

/// File to write to, or `None` when the output goes to stdout.
pub fn output_path(output: Option<&str>) -> Option<&Path> {
    output
        .filter(|target| !is_stdout_target(target))
        .map(Path::new)
}

/// Write `data` to `output`, or to stdout when no file (or `-`, or an empty
/// name) is given.
pub async fn write_output(data: &[u8], output: Option<&str>) -> Result<(), CaptureError> {
    let path = match output_path(output) {
        Some(path) => path,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(data)
                .await
                .map_err(|e| CaptureError::Io(format!("failed to write to stdout: {e}")))?;
            stdout.flush().await?;
            return Ok(());
        }
    };

    fs::write(path, data)
        .await
        .map_err(|e| CaptureError::Io(format!("failed to write to {}: {e}", path.display())))?;

    info!("Written to {} ({})", path.display(), format_bytes(data.len()));
    Ok(())
}
