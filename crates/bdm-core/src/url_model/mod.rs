//! URL validation and destination filename derivation.
//!
//! A job's destination name comes from the last URL path segment, lower-cased
//! and sanitized for Linux filesystems; anything that does not end in `.pdf`
//! has no usable destination.

mod path;
mod sanitize;
mod validate;

pub use path::filename_from_url_path;
pub use sanitize::sanitize_filename_for_linux;
pub use validate::{is_valid_url, parse_valid_url};

use url::Url;

/// Extension required of every derived destination filename.
pub const PDF_EXTENSION: &str = ".pdf";

/// Derives the destination filename for `url`, or `None` when the URL does
/// not point at a PDF.
///
/// The last path segment is lower-cased, must end in `.pdf`
/// (case-insensitive), and is sanitized for Linux before use. Percent-encoded
/// bytes in the segment are kept literal.
///
/// # Examples
///
/// - `https://example.org/files/Report.PDF` → `Some("report.pdf")`
/// - `https://example.org/image.png` → `None`
/// - `https://example.org/` → `None`
pub fn derive_pdf_filename(url: &Url) -> Option<String> {
    let segment = filename_from_url_path(url)?.to_lowercase();
    if !segment.ends_with(PDF_EXTENSION) {
        return None;
    }
    let sanitized = sanitize_filename_for_linux(&segment);
    if !sanitized.ends_with(PDF_EXTENSION) {
        return None;
    }
    Some(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn derive_lowercases_the_segment() {
        assert_eq!(
            derive_pdf_filename(&parsed("https://example.org/files/Report.PDF")).as_deref(),
            Some("report.pdf")
        );
        assert_eq!(
            derive_pdf_filename(&parsed("https://example.org/doc.pdf")).as_deref(),
            Some("doc.pdf")
        );
    }

    #[test]
    fn derive_rejects_non_pdf_targets() {
        assert_eq!(derive_pdf_filename(&parsed("https://example.org/image.png")), None);
        assert_eq!(derive_pdf_filename(&parsed("https://example.org/docs/manual")), None);
        assert_eq!(derive_pdf_filename(&parsed("https://example.org/")), None);
        assert_eq!(derive_pdf_filename(&parsed("https://example.org")), None);
    }

    #[test]
    fn derive_ignores_query_and_keeps_percent_encoding() {
        assert_eq!(
            derive_pdf_filename(&parsed("https://example.org/a.pdf?token=XYZ")).as_deref(),
            Some("a.pdf")
        );
        assert_eq!(
            derive_pdf_filename(&parsed("https://example.org/My%20File.PDF")).as_deref(),
            Some("my%20file.pdf")
        );
    }

    #[test]
    fn derive_rejects_extension_only_segments() {
        assert_eq!(derive_pdf_filename(&parsed("https://example.org/.pdf")), None);
    }
}
