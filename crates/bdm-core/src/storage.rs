//! Download-directory file lifecycle.
//!
//! The browser writes completed downloads into a hidden subdirectory of the
//! output directory; placement is a single atomic rename onto the final path,
//! which stays on one filesystem because the two directories share a parent.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Suffix Chrome appends to a file while it is still being written.
pub const PARTIAL_DOWNLOAD_SUFFIX: &str = ".crdownload";

/// True if `name` still carries the in-progress download marker.
pub fn is_partial_download(name: &str) -> bool {
    name.ends_with(PARTIAL_DOWNLOAD_SUFFIX)
}

/// Incoming-download directory for a given output directory.
pub fn incoming_dir(output_dir: &Path, incoming_subdir: &str) -> PathBuf {
    output_dir.join(incoming_subdir)
}

/// Creates `dir` (and parents) if absent.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))
}

/// Removes regular files directly under `dir`, ignoring ones that vanish.
/// Used to clear stale browser deposits out of the incoming directory.
pub fn clear_dir_files(dir: &Path) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list directory: {}", dir.display()))?
            .path();
        if path.is_file() {
            let _ = std::fs::remove_file(&path);
        }
    }
    Ok(())
}

/// Atomically renames a completed download onto its final path.
/// Fails if the two paths are on different filesystems.
pub fn place_completed(downloaded: &Path, final_path: &Path) -> Result<()> {
    std::fs::rename(downloaded, final_path).with_context(|| {
        format!(
            "failed to rename {} to {}",
            downloaded.display(),
            final_path.display()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_marker_detection() {
        assert!(is_partial_download("doc.pdf.crdownload"));
        assert!(!is_partial_download("doc.pdf"));
        assert!(!is_partial_download("crdownload.pdf"));
    }

    #[test]
    fn incoming_dir_is_under_output() {
        let dir = incoming_dir(Path::new("/data/PDFs"), ".incoming");
        assert_eq!(dir, PathBuf::from("/data/PDFs/.incoming"));
    }

    #[test]
    fn ensure_dir_creates_nested() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn clear_dir_files_removes_files_only() {
        let root = tempfile::tempdir().unwrap();
        let sub = root.path().join("keep");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(root.path().join("a.pdf"), b"x").unwrap();
        std::fs::write(root.path().join("b.pdf.crdownload"), b"y").unwrap();

        clear_dir_files(root.path()).unwrap();

        assert!(sub.is_dir());
        assert_eq!(std::fs::read_dir(root.path()).unwrap().count(), 1);
    }

    #[test]
    fn place_completed_moves_the_file() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("incoming/doc.pdf");
        let dst = root.path().join("doc.pdf");
        std::fs::create_dir(root.path().join("incoming")).unwrap();
        std::fs::write(&src, b"%PDF-1.4").unwrap();

        place_completed(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(std::fs::read(&dst).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn place_completed_reports_missing_source() {
        let root = tempfile::tempdir().unwrap();
        let err = place_completed(&root.path().join("absent.pdf"), &root.path().join("out.pdf"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("failed to rename"));
    }
}
