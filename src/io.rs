use crate::{OverlayError, Result};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::*;

/// Opens and decodes the image at `path`.
///
/// The format is detected from the file contents, so a mislabeled or
/// extensionless file still loads. The extension is only used when the contents
/// are not recognized.
///
/// # Errors
/// Returns [`OverlayError::FileAccess`] if the file is missing, unreadable or not a
/// supported image.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    info!("Loading {}", path.display());
    let access = |source: ImageError| OverlayError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| access(ImageError::IoError(e)))?;
    debug!("Detected format {:?}", reader.format());
    reader.decode().map_err(access)
}

/// Default output path: `-grid` inserted before the extension.
///
/// # Examples
///
/// ```
/// use overlay_grid::derive_output_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(derive_output_path(Path::new("form.png")), PathBuf::from("form-grid.png"));
/// assert_eq!(derive_output_path(Path::new("scans/a.b.jpg")), PathBuf::from("scans/a.b-grid.jpg"));
/// assert_eq!(derive_output_path(Path::new("README")), PathBuf::from("README-grid"));
/// ```
pub fn derive_output_path(input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push("-grid");
    if let Some(extension) = input.extension() {
        name.push(".");
        name.push(extension);
    }
    input.with_file_name(name)
}

/// Encodes `image` in the format implied by the extension of `path`, then writes it.
///
/// Encoding happens in memory first, so an unsupported extension or encoder
/// failure leaves no file behind.
///
/// # Errors
/// Returns [`OverlayError::FileAccess`] if the format is unknown or the file cannot
/// be written.
pub fn save_image(image: &RgbImage, path: &Path) -> Result<()> {
    let access = |source: ImageError| OverlayError::FileAccess {
        path: path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(access)?;
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).map_err(access)?;
    debug!(
        "Encoded {} bytes as {:?}",
        buffer.get_ref().len(),
        format
    );

    std::fs::write(path, buffer.into_inner()).map_err(|e| access(ImageError::IoError(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_derive_output_path_edge_cases() {
        assert_eq!(
            derive_output_path(Path::new("/tmp/scan.v2.tiff")),
            PathBuf::from("/tmp/scan.v2-grid.tiff")
        );
        assert_eq!(
            derive_output_path(Path::new(".hidden")),
            PathBuf::from(".hidden-grid")
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_image(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, OverlayError::FileAccess { .. }));
        assert!(err.to_string().contains("definitely/not/here.png"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.png");
        let image = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));

        save_image(&image, &path).unwrap();
        let loaded = load_image(&path).unwrap().into_rgb8();

        assert_eq!(loaded, image);
    }

    #[test]
    fn test_load_sniffs_format_from_contents() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));
        let mislabeled = dir.path().join("page.jpg");
        let bare = dir.path().join("page");
        image.save_with_format(&mislabeled, ImageFormat::Png).unwrap();
        image.save_with_format(&bare, ImageFormat::Png).unwrap();

        assert_eq!(load_image(&mislabeled).unwrap().into_rgb8(), image);
        assert_eq!(load_image(&bare).unwrap().into_rgb8(), image);
    }

    #[test]
    fn test_save_unknown_extension_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.notaformat");

        let err = save_image(&RgbImage::new(2, 2), &path).unwrap_err();

        assert!(matches!(err, OverlayError::FileAccess { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("page.png");

        let err = save_image(&RgbImage::new(2, 2), &path).unwrap_err();
        assert!(matches!(err, OverlayError::FileAccess { .. }));
    }
}
