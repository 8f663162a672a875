//! Text Source: pulls raw text out of an uploaded resume.
//!
//! Direct in-memory extraction runs first. When it fails, the bytes are
//! written to a named temp file and extracted from disk; the temp file is
//! removed when its guard drops, whichever way the second attempt ends.

pub mod pdf;

use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

pub use pdf::{is_pdf_upload, PdfExtractSource};

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Both the direct and the temp-file path failed.
    #[error("Error reading PDF: {direct} | {fallback}")]
    Failed { direct: String, fallback: String },

    #[error("The document contains no extractable text")]
    NoText,
}

/// A backend capable of turning document bytes (or a file on disk) into text.
pub trait TextSource: Send + Sync {
    fn extract_from_mem(&self, data: &[u8]) -> Result<String, String>;
    fn extract_from_path(&self, path: &Path) -> Result<String, String>;
}

/// Extracts text from `data`, falling back to a scoped temp file.
pub fn extract_document_text(
    source: &dyn TextSource,
    data: &[u8],
) -> Result<String, ExtractionError> {
    let text = match source.extract_from_mem(data) {
        Ok(text) => text,
        Err(direct) => {
            warn!("Direct extraction failed, retrying from temp file: {direct}");
            extract_via_temp_file(source, data)
                .map_err(|fallback| ExtractionError::Failed { direct, fallback })?
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }

    debug!(chars = text.len(), "Extracted document text");
    Ok(text)
}

fn extract_via_temp_file(source: &dyn TextSource, data: &[u8]) -> Result<String, String> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-analyzer-")
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| format!("failed to create temp file: {e}"))?;

    file.write_all(data)
        .and_then(|_| file.flush())
        .map_err(|e| format!("failed to write temp file: {e}"))?;

    // `file` is dropped (and unlinked) on return from either arm.
    source.extract_from_path(file.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Fake source with scripted outcomes; records the temp path it was given.
    struct ScriptedSource {
        mem: Result<String, String>,
        path: Result<String, String>,
        seen_path: Mutex<Option<PathBuf>>,
    }

    impl ScriptedSource {
        fn new(mem: Result<&str, &str>, path: Result<&str, &str>) -> Self {
            Self {
                mem: mem.map(String::from).map_err(String::from),
                path: path.map(String::from).map_err(String::from),
                seen_path: Mutex::new(None),
            }
        }

        fn seen_path(&self) -> Option<PathBuf> {
            self.seen_path.lock().unwrap().clone()
        }
    }

    impl TextSource for ScriptedSource {
        fn extract_from_mem(&self, _data: &[u8]) -> Result<String, String> {
            self.mem.clone()
        }

        fn extract_from_path(&self, path: &Path) -> Result<String, String> {
            assert!(path.exists(), "temp file should exist during extraction");
            assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.4 body");
            *self.seen_path.lock().unwrap() = Some(path.to_path_buf());
            self.path.clone()
        }
    }

    #[test]
    fn test_direct_extraction_skips_temp_file() {
        let source = ScriptedSource::new(Ok("Jane Doe\nPython"), Err("unused"));
        let text = extract_document_text(&source, b"%PDF-1.4 body").unwrap();
        assert_eq!(text, "Jane Doe\nPython");
        assert!(source.seen_path().is_none());
    }

    #[test]
    fn test_fallback_succeeds_and_removes_temp_file() {
        let source = ScriptedSource::new(Err("stream error"), Ok("Recovered text"));
        let text = extract_document_text(&source, b"%PDF-1.4 body").unwrap();
        assert_eq!(text, "Recovered text");

        let path = source.seen_path().expect("fallback path should run");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert!(!path.exists(), "temp file must be deleted after success");
    }

    #[test]
    fn test_both_paths_fail_combines_reasons_and_removes_temp_file() {
        let source = ScriptedSource::new(Err("stream error"), Err("invalid xref"));
        let err = extract_document_text(&source, b"%PDF-1.4 body").unwrap_err();

        match &err {
            ExtractionError::Failed { direct, fallback } => {
                assert_eq!(direct, "stream error");
                assert_eq!(fallback, "invalid xref");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Error reading PDF: stream error | invalid xref");

        let path = source.seen_path().expect("fallback path should run");
        assert!(!path.exists(), "temp file must be deleted after failure");
    }

    #[test]
    fn test_whitespace_only_text_is_no_text() {
        let source = ScriptedSource::new(Ok("  \n\t "), Err("unused"));
        let err = extract_document_text(&source, b"%PDF-1.4 body").unwrap_err();
        assert!(matches!(err, ExtractionError::NoText));
    }
}
