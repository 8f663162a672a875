use std::any::Any;
use std::panic::{self, UnwindSafe};
use std::path::Path;

use super::TextSource;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// `TextSource` backed by the `pdf-extract` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractSource;

impl TextSource for PdfExtractSource {
    fn extract_from_mem(&self, data: &[u8]) -> Result<String, String> {
        guarded(|| pdf_extract::extract_text_from_mem(data))
    }

    fn extract_from_path(&self, path: &Path) -> Result<String, String> {
        guarded(|| pdf_extract::extract_text(path))
    }
}

/// pdf-extract panics on some malformed documents; treat that as a failed attempt.
fn guarded<F, E>(f: F) -> Result<String, String>
where
    F: FnOnce() -> Result<String, E> + UnwindSafe,
    E: std::fmt::Display,
{
    match panic::catch_unwind(f) {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(payload) => Err(format!("PDF parser panicked: {}", panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Accepts an upload when any of file name, declared content type, or leading
/// bytes identify it as a PDF.
pub fn is_pdf_upload(file_name: Option<&str>, content_type: Option<&str>, data: &[u8]) -> bool {
    let by_name = file_name
        .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    let by_type = content_type
        .map(|t| t.eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    by_name || by_type || data.starts_with(PDF_MAGIC)
}
