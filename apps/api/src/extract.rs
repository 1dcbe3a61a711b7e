//! File-text-extraction collaborator: uploaded bytes in, plain text out.
//!
//! Format parsing itself is delegated (pdf-extract for PDFs); anything this
//! module cannot hand off fails with a caller-facing message rather than a
//! guess. The output is untrusted, unstructured text for the pipeline.

use crate::errors::AppError;

const SUPPORTED_FORMATS: &str = "PDF, TXT, MD";

/// Extracts plain text from an uploaded file, dispatching on extension.
/// CPU-bound (PDF parsing); call from a blocking task.
pub fn text_from_upload(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let text = match extension.as_str() {
        "pdf" => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            AppError::UserInput(format!("could not read '{filename}' as a PDF: {e}"))
        })?,
        "txt" | "md" => String::from_utf8_lossy(bytes).into_owned(),
        _ => {
            return Err(AppError::UserInput(format!(
                "unsupported file format for '{filename}' (supported: {SUPPORTED_FORMATS})"
            )))
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::UserInput(format!(
            "no text could be extracted from '{filename}'"
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let text = text_from_upload("resume.txt", b"Jan Kowalski, jan@x.com").unwrap();
        assert_eq!(text, "Jan Kowalski, jan@x.com");
    }

    #[test]
    fn test_markdown_passes_through() {
        assert!(text_from_upload("resume.md", b"# Jan Kowalski").is_ok());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(text_from_upload("RESUME.TXT", b"Jan Kowalski").is_ok());
    }

    #[test]
    fn test_unsupported_format_is_user_input_error() {
        let err = text_from_upload("resume.docx", b"irrelevant").unwrap_err();
        let AppError::UserInput(msg) = err else {
            panic!("expected UserInput error");
        };
        assert!(msg.contains("docx"));
        assert!(msg.contains(SUPPORTED_FORMATS));
    }

    #[test]
    fn test_missing_extension_is_user_input_error() {
        assert!(matches!(
            text_from_upload("resume", b"text"),
            Err(AppError::UserInput(_))
        ));
    }

    #[test]
    fn test_whitespace_only_text_rejected() {
        assert!(matches!(
            text_from_upload("resume.txt", b"   \n\t  "),
            Err(AppError::UserInput(_))
        ));
    }
}
