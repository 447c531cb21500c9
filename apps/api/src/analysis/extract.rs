//! Document text extraction.

use tracing::warn;

/// Extracts plain text from an uploaded PDF document.
///
/// Never fails past this boundary: malformed bytes, unsupported encodings and
/// parser panics all collapse to the empty string, which the caller treats as
/// missing input.
pub fn extract_text(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    // pdf-extract can panic on some malformed documents; keep that inside
    // the extraction boundary too.
    let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("PDF extraction failed: {e}");
            String::new()
        }
        Err(_) => {
            warn!("PDF extraction panicked on malformed input");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_text() {
        assert_eq!(extract_text(&[]), "");
    }

    #[test]
    fn test_non_pdf_bytes_yield_empty_text() {
        assert_eq!(extract_text(b"plain text, not a PDF"), "");
    }

    #[test]
    fn test_truncated_pdf_header_yields_empty_text() {
        // A PDF magic number with no body behind it.
        assert_eq!(extract_text(b"%PDF-1.7\n"), "");
    }
}
