//! Output directory reset and static asset copying.
//!
//! These run before page generation so every build starts from a clean
//! output tree. Asset copying mirrors the static directory recursively,
//! preserving relative paths.

use std::fs;
use std::path::Path;

use crate::SiteError;

/// Delete the output directory and recreate it empty.
///
/// Removing a directory that doesn't exist is not an error; the result is
/// the same either way, an empty output directory.
///
/// # Errors
///
/// Returns an I/O error if removal or creation fails.
pub fn clean_output(output_dir: &Path) -> Result<(), SiteError> {
    if output_dir.exists() {
        tracing::debug!(path = %output_dir.display(), "removing output directory");
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)?;
    Ok(())
}

/// Recursively copy the static directory into the output directory.
///
/// Returns the number of files copied. A missing static directory copies
/// nothing; sites without assets are valid.
///
/// # Errors
///
/// Returns an I/O error if any directory read, creation, or file copy fails.
pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<usize, SiteError> {
    if !static_dir.exists() {
        tracing::debug!(path = %static_dir.display(), "no static directory, skipping");
        return Ok(0);
    }
    let mut copied = 0;
    copy_tree(static_dir, output_dir, &mut copied)?;
    Ok(copied)
}

/// Copy every entry under `src` into `dest`, recursing into subdirectories.
fn copy_tree(src: &Path, dest: &Path, copied: &mut usize) -> Result<(), SiteError> {
    fs::create_dir_all(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_tree(&src_path, &dest_path, copied)?;
        } else {
            tracing::debug!(
                from = %src_path.display(),
                to = %dest_path.display(),
                "copying asset"
            );
            fs::copy(&src_path, &dest_path)?;
            *copied += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_clean_output_creates_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("public");

        clean_output(&output).unwrap();

        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn test_clean_output_removes_stale_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("public");
        fs::create_dir_all(output.join("old")).unwrap();
        fs::write(output.join("old/page.html"), "<p>stale</p>").unwrap();

        clean_output(&output).unwrap();

        assert!(output.is_dir());
        assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
    }

    #[test]
    fn test_copy_static_missing_dir_copies_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output = temp_dir.path().join("public");
        fs::create_dir_all(&output).unwrap();

        let copied = copy_static(&temp_dir.path().join("static"), &output).unwrap();

        assert_eq!(copied, 0);
    }

    #[test]
    fn test_copy_static_flat_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let static_dir = temp_dir.path().join("static");
        let output = temp_dir.path().join("public");
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(static_dir.join("styles.css"), "body {}").unwrap();
        fs::write(static_dir.join("logo.svg"), "<svg/>").unwrap();

        let copied = copy_static(&static_dir, &output).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(output.join("styles.css")).unwrap(),
            "body {}"
        );
        assert!(output.join("logo.svg").exists());
    }

    #[test]
    fn test_copy_static_preserves_nested_structure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let static_dir = temp_dir.path().join("static");
        let output = temp_dir.path().join("public");
        fs::create_dir_all(static_dir.join("images/icons")).unwrap();
        fs::write(static_dir.join("index.css"), "").unwrap();
        fs::write(static_dir.join("images/photo.png"), "png").unwrap();
        fs::write(static_dir.join("images/icons/star.svg"), "svg").unwrap();

        let copied = copy_static(&static_dir, &output).unwrap();

        assert_eq!(copied, 3);
        assert!(output.join("index.css").exists());
        assert!(output.join("images/photo.png").exists());
        assert!(output.join("images/icons/star.svg").exists());
    }

    #[test]
    fn test_copy_static_into_existing_output_keeps_other_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let static_dir = temp_dir.path().join("static");
        let output = temp_dir.path().join("public");
        fs::create_dir_all(&static_dir).unwrap();
        fs::create_dir_all(&output).unwrap();
        fs::write(static_dir.join("app.js"), "js").unwrap();
        fs::write(output.join("index.html"), "<html></html>").unwrap();

        let copied = copy_static(&static_dir, &output).unwrap();

        assert_eq!(copied, 1);
        assert!(output.join("app.js").exists());
        assert!(output.join("index.html").exists());
    }
}
