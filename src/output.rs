//! Output path resolution and image persistence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::models::DEFAULT_OUTPUT_DIR;

/// Resolve where an image part should land, creating directories as needed.
///
/// An explicit path is used verbatim after ensuring its parent directory
/// exists. Otherwise the default directory gets a timestamped
/// `nano_YYYYMMDD_HHMMSS.<ext>` name, the extension taken from the declared
/// MIME subtype (`png` when absent). Second-precision timestamps can collide
/// under rapid fire; the last writer wins.
pub fn resolve_output_path(
    explicit: Option<&Path>,
    default_dir: &Path,
    mime_type: Option<&str>,
) -> io::Result<PathBuf> {
    match explicit {
        Some(path) => {
            match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    fs::create_dir_all(parent)?;
                }
                // No directory component, lands in the current directory.
                _ => {}
            }
            Ok(path.to_path_buf())
        }
        None => {
            fs::create_dir_all(default_dir)?;
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let ext = extension_from_mime(mime_type);
            Ok(default_dir.join(format!("nano_{timestamp}.{ext}")))
        }
    }
}

/// Convenience wrapper over the crate-wide default directory.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// MIME subtype as file extension, `png` when no type was declared.
pub fn extension_from_mime(mime_type: Option<&str>) -> &str {
    mime_type
        .and_then(|m| m.split('/').last())
        .filter(|s| !s.is_empty())
        .unwrap_or("png")
}

/// Best-effort MIME type for a reference image, from its extension.
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    }
}

pub fn save_image(path: &Path, bytes: &[u8]) -> io::Result<()> {
    fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extension_falls_back_to_png() {
        assert_eq!(extension_from_mime(None), "png");
        assert_eq!(extension_from_mime(Some("image/jpeg")), "jpeg");
        assert_eq!(extension_from_mime(Some("image/webp")), "webp");
    }

    #[test]
    fn default_name_is_timestamped() {
        let dir = tempdir().unwrap();
        let path = resolve_output_path(None, dir.path(), Some("image/png")).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("nano_"), "got {name}");
        assert!(name.ends_with(".png"));
        // nano_ + YYYYMMDD + _ + HHMMSS
        let stem = name.trim_start_matches("nano_").trim_end_matches(".png");
        assert_eq!(stem.len(), 15);
        assert_eq!(stem.chars().filter(|c| c.is_ascii_digit()).count(), 14);
    }

    #[test]
    fn default_dir_is_created_on_demand() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("out");
        assert!(!nested.exists());
        resolve_output_path(None, &nested, None).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn explicit_path_is_used_verbatim_and_parent_created() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a/b/pic.png");
        let resolved = resolve_output_path(Some(&target), dir.path(), None).unwrap();
        assert_eq!(resolved, target);
        assert!(target.parent().unwrap().is_dir());
    }

    #[test]
    fn bare_filename_needs_no_directory() {
        let resolved =
            resolve_output_path(Some(Path::new("pic.png")), Path::new("unused"), None).unwrap();
        assert_eq!(resolved, PathBuf::from("pic.png"));
    }

    #[test]
    fn mime_guess_covers_common_extensions() {
        assert_eq!(mime_from_path(Path::new("ref.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("ref.jpeg")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("ref.webp")), "image/webp");
        assert_eq!(mime_from_path(Path::new("ref")), "image/png");
    }

    #[test]
    fn save_image_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("img.png");
        save_image(&path, b"first").unwrap();
        save_image(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }
}
