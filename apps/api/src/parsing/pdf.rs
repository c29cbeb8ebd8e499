//! PDF text source — decodes an uploaded PDF into the line sequence the
//! segmenter works on. Decoding is CPU-bound; async callers go through
//! [`extract_lines_blocking`].

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not extract text from PDF: {0}")]
    Decode(String),

    #[error("PDF extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Extracts all page text from `bytes` and splits it into lines.
pub fn extract_lines(bytes: &[u8]) -> Result<Vec<String>, PdfError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| PdfError::Decode(e.to_string()))?;
    let lines = split_lines(&text);
    debug!(lines = lines.len(), "pdf text extracted");
    Ok(lines)
}

/// Runs [`extract_lines`] on the blocking pool.
pub async fn extract_lines_blocking(bytes: Vec<u8>) -> Result<Vec<String>, PdfError> {
    tokio::task::spawn_blocking(move || extract_lines(&bytes)).await?
}

/// Splits on `\n` or `\r\n`, keeping blank lines so indices stay aligned with the page text.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
