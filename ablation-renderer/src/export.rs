//! Frame export to PNG.
//!
//! Encodes a rendered [`Surface`] with the `image` crate, either to bytes
//! or straight to a file.

use std::path::Path;

use image::ImageEncoder;

use crate::error::{RenderError, RenderResult};
use crate::Surface;

/// Encode the surface as an RGBA PNG.
///
/// # Errors
///
/// Returns an error if the pixel data does not match the surface size or
/// encoding fails.
pub fn export_png(surface: &dyn Surface) -> RenderResult<Vec<u8>> {
    let size = surface.size();
    let pixels = surface.pixels();
    let expected = size as usize * size as usize * 4;
    if pixels.len() != expected {
        return Err(RenderError::Export(format!(
            "surface holds {} bytes, expected {expected}",
            pixels.len()
        )));
    }

    let mut buf = std::io::Cursor::new(Vec::new());
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(pixels, size, size, image::ExtendedColorType::Rgba8)
        .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))?;

    tracing::debug!(size, bytes = buf.get_ref().len(), "Exported PNG");
    Ok(buf.into_inner())
}

/// Encode the surface as PNG and write it to `path`.
///
/// # Errors
///
/// Returns an error if encoding or writing the file fails.
pub fn save_png(surface: &dyn Surface, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let bytes = export_png(surface)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), "Saved frame");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelSurface;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_png_signature() {
        let mut surface = PixelSurface::new(16);
        surface.clear([255, 255, 255, 255]);
        let png = export_png(&surface).expect("png export");
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_png_decodes_to_same_pixels() {
        let mut surface = PixelSurface::new(8);
        surface.clear([0, 0, 0, 255]);
        surface.fill_circle(ablation_core::Point::new(4.0, 4.0), 2.0, [255, 0, 0, 255]);

        let png = export_png(&surface).expect("png export");
        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
            .expect("decode")
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (8, 8));
        assert_eq!(decoded.as_raw().as_slice(), surface.pixels());
    }
}
