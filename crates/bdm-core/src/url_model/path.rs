//! Filename extraction from URL path.

use url::Url;

/// Extracts the last non-empty path segment of `url` for use as a filename
/// hint.
///
/// Returns `None` if the path is empty/root or the segment is a dot name.
pub fn filename_from_url_path(url: &Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn normal() {
        assert_eq!(
            filename_from_url_path(&parsed("https://example.com/a/b/file.pdf")).as_deref(),
            Some("file.pdf")
        );
        assert_eq!(
            filename_from_url_path(&parsed("https://example.com/single")).as_deref(),
            Some("single")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(filename_from_url_path(&parsed("https://example.com/")), None);
        assert_eq!(filename_from_url_path(&parsed("https://example.com")), None);
    }

    #[test]
    fn trailing_slash_uses_last_segment() {
        assert_eq!(
            filename_from_url_path(&parsed("https://example.com/dir/")).as_deref(),
            Some("dir")
        );
    }

    #[test]
    fn with_query() {
        assert_eq!(
            filename_from_url_path(&parsed("https://example.com/file.pdf?token=abc")).as_deref(),
            Some("file.pdf")
        );
    }
}
