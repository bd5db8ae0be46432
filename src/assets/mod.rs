//! Cat images shown for each phase.
//!
//! The two images are read once at startup from fixed file names. A missing
//! or unreadable file never stops the program: it is replaced by a blank
//! placeholder of the display size and a warning is logged.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::types::Phase;

/// Side length, in pixels, at which the images are displayed.
pub const DISPLAY_SIZE: u32 = 300;

/// Image shown during work phases.
pub const WORK_IMAGE_FILE: &str = "work_cat.png";

/// Image shown during break phases.
pub const BREAK_IMAGE_FILE: &str = "break_cat.png";

/// PNG file signature.
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Errors that can occur while loading an image asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The image file does not exist.
    #[error("画像ファイルが見つかりません: {}", .0.display())]
    MissingAssetFile(PathBuf),

    /// The file exists but could not be read.
    #[error("画像ファイルを読み込めませんでした: {}: {source}", .path.display())]
    Unreadable {
        /// Image path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not a PNG image.
    #[error("PNG画像ではありません: {}", .0.display())]
    NotAnImage(PathBuf),
}

/// Where an image came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Loaded from a file
    File(PathBuf),
    /// Blank stand-in for a missing file
    Placeholder,
}

/// One loaded phase image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatImage {
    /// Phase the image belongs to
    pub phase: Phase,
    /// Origin of the image
    pub source: ImageSource,
    /// Size of the original image in pixels (width, height)
    pub original_size: (u32, u32),
}

impl CatImage {
    /// Creates the blank placeholder for a phase.
    pub fn placeholder(phase: Phase) -> Self {
        Self {
            phase,
            source: ImageSource::Placeholder,
            original_size: (DISPLAY_SIZE, DISPLAY_SIZE),
        }
    }

    /// Returns true if this is the blank placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.source == ImageSource::Placeholder
    }

    /// Returns a short label for the image.
    pub fn label(&self) -> String {
        match &self.source {
            ImageSource::File(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{} ({}x{})", name, self.original_size.0, self.original_size.1)
            }
            ImageSource::Placeholder => format!("blank ({}x{})", DISPLAY_SIZE, DISPLAY_SIZE),
        }
    }
}

/// The pair of images, one per phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseImages {
    work: CatImage,
    break_: CatImage,
}

impl PhaseImages {
    /// Loads both images from `dir`, substituting placeholders as needed.
    pub fn load(dir: &Path) -> Self {
        Self {
            work: load_or_placeholder(dir, Phase::Work),
            break_: load_or_placeholder(dir, Phase::Break),
        }
    }

    /// Returns a pair of placeholders.
    pub fn placeholders() -> Self {
        Self {
            work: CatImage::placeholder(Phase::Work),
            break_: CatImage::placeholder(Phase::Break),
        }
    }

    /// Returns the image for `phase`.
    pub fn get(&self, phase: Phase) -> &CatImage {
        match phase {
            Phase::Work => &self.work,
            Phase::Break => &self.break_,
        }
    }
}

/// Returns the fixed file name of the image for `phase`.
pub fn image_file_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Work => WORK_IMAGE_FILE,
        Phase::Break => BREAK_IMAGE_FILE,
    }
}

/// Loads the image for `phase` from `dir`.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not a PNG.
pub fn load_cat_image(dir: &Path, phase: Phase) -> Result<CatImage, AssetError> {
    let path = dir.join(image_file_name(phase));
    if !path.exists() {
        return Err(AssetError::MissingAssetFile(path));
    }

    let bytes = std::fs::read(&path).map_err(|source| AssetError::Unreadable {
        path: path.clone(),
        source,
    })?;
    let original_size = png_dimensions(&bytes).ok_or_else(|| AssetError::NotAnImage(path.clone()))?;

    debug!(path = %path.display(), width = original_size.0, height = original_size.1, "Image loaded");

    Ok(CatImage {
        phase,
        source: ImageSource::File(path),
        original_size,
    })
}

fn load_or_placeholder(dir: &Path, phase: Phase) -> CatImage {
    load_cat_image(dir, phase).unwrap_or_else(|e| {
        warn!("{}; using a blank image", e);
        CatImage::placeholder(phase)
    })
}

/// Reads width and height from the IHDR chunk of a PNG file.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if !bytes.starts_with(PNG_SIGNATURE) || bytes.get(12..16)? != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes(bytes.get(16..20)?.try_into().ok()?);
    let height = u32::from_be_bytes(bytes.get(20..24)?.try_into().ok()?);
    Some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PNG header with an IHDR chunk.
    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_load_existing_image() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(WORK_IMAGE_FILE), png_header(512, 480)).unwrap();

        let image = load_cat_image(dir.path(), Phase::Work).unwrap();

        assert_eq!(image.phase, Phase::Work);
        assert_eq!(image.original_size, (512, 480));
        assert!(!image.is_placeholder());
        assert_eq!(image.label(), "work_cat.png (512x480)");
    }

    #[test]
    fn test_missing_image_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_cat_image(dir.path(), Phase::Break);
        assert!(matches!(result, Err(AssetError::MissingAssetFile(_))));
    }

    #[test]
    fn test_non_png_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BREAK_IMAGE_FILE), b"not an image").unwrap();

        let result = load_cat_image(dir.path(), Phase::Break);

        assert!(matches!(result, Err(AssetError::NotAnImage(_))));
    }

    #[test]
    fn test_phase_images_substitute_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(WORK_IMAGE_FILE), png_header(300, 300)).unwrap();

        let images = PhaseImages::load(dir.path());

        assert!(!images.get(Phase::Work).is_placeholder());
        let placeholder = images.get(Phase::Break);
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.phase, Phase::Break);
        assert_eq!(placeholder.original_size, (DISPLAY_SIZE, DISPLAY_SIZE));
        assert_eq!(placeholder.label(), "blank (300x300)");
    }

    #[test]
    fn test_image_file_names() {
        assert_eq!(image_file_name(Phase::Work), "work_cat.png");
        assert_eq!(image_file_name(Phase::Break), "break_cat.png");
    }
}
