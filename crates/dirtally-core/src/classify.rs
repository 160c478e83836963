//! Image classification by file extension.

use std::path::Path;

/// Known image extensions, dotted and lower-case.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".tiff", ".bmp", ".svg", ".webp", ".heif", ".heic", ".raw",
    ".cr2", ".nef", ".orf", ".sr2", ".arw", ".dng", ".eps", ".ico", ".jfif", ".psd", ".tif",
    ".xcf", ".ai", ".cdr", ".indd", ".webm",
];

/// Check whether a file name carries a known image extension.
///
/// The extension is taken after the last `.` of the final path component,
/// lower-cased, and compared with a single leading `.` against
/// [`IMAGE_EXTENSIONS`]. Names like `.png` have no extension and never match.
pub fn is_image(name: impl AsRef<Path>) -> bool {
    let Some(ext) = name.as_ref().extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if ext.is_empty() {
        return false;
    }

    let dotted = format!(".{}", ext.to_ascii_lowercase());
    IMAGE_EXTENSIONS.contains(&dotted.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_images() {
        assert!(is_image("photo.jpg"));
        assert!(is_image("scan.png"));
        assert!(is_image("clip.webm"));
        assert!(is_image("/some/dir/layers.psd"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_image("PHOTO.JPG"));
        assert!(is_image("Raw.Cr2"));
    }

    #[test]
    fn test_non_images() {
        assert!(!is_image("doc.txt"));
        assert!(!is_image("archive.png.gz"));
        assert!(!is_image("Makefile"));
        assert!(!is_image("trailing."));
    }

    #[test]
    fn test_dot_only_name_is_not_image() {
        assert!(!is_image(".png"));
        assert!(!is_image("/dir/.jpg"));
    }

    #[test]
    fn test_extension_list_is_dotted_lowercase() {
        assert_eq!(IMAGE_EXTENSIONS.len(), 27);
        for ext in IMAGE_EXTENSIONS {
            assert!(ext.starts_with('.'));
            assert_eq!(*ext, ext.to_ascii_lowercase());
        }
    }
}
