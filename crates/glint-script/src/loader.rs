//! File and image loading for scripts
//!
//! Loads run synchronously; the deferred variants in the API only delay when
//! the script's callback sees the result.

use glint_core::{GlintError, Result};
use std::path::Path;

/// Decoded image, always RGBA8
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

pub fn read_text(path: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

pub fn load_image(path: &Path) -> Result<ImageData> {
    let img = image::open(path)
        .map_err(|e| GlintError::Image(format!("{}: {}", path.display(), e)))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(ImageData {
        width,
        height,
        data: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.txt");
        std::fs::write(&path, "##..##").unwrap();
        assert_eq!(read_text(&path).unwrap(), "##..##");
    }

    #[test]
    fn read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, GlintError::Io(_)));
    }

    #[test]
    fn load_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tile.png");
        let mut img = image::RgbaImage::new(2, 3);
        img.put_pixel(1, 2, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (2, 3));
        assert_eq!(loaded.data.len(), 2 * 3 * 4);
        let last = &loaded.data[loaded.data.len() - 4..];
        assert_eq!(last, &[255, 0, 0, 255]);
    }

    #[test]
    fn load_image_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(load_image(&path), Err(GlintError::Image(_))));
    }
}
