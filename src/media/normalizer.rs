//! Image Normalizer
//!
//! Every uploaded image goes through the same pipeline before its
//! filename is stored in the database:
//!
//! 1. decode from the raw upload bytes;
//! 2. apply the EXIF rotation for the 180° and both 90° orientation
//!    codes, so stored pixels are display-correct without viewer-side
//!    metadata handling; mirrored orientation codes are intentionally
//!    left alone;
//! 3. flatten alpha/palette color modes to 8-bit RGB (JPEG has no alpha);
//! 4. downscale to fit the bounding box, aspect preserved, never upscale;
//! 5. re-encode as JPEG at the configured quality;
//! 6. persist under a random 16-hex-character filename in the uploads
//!    directory.
//!
//! Any failure is logged and surfaces as `None`; callers must treat that
//! as a hard failure of the enclosing variant write. Files already written
//! when a later step fails are an accepted, unreferenced leak; there is no
//! garbage collection.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, imageops::FilterType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Afbeelding onleesbaar: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Bestandsfout: {0}")]
    Io(#[from] std::io::Error),
}

/// Image normalization pipeline, configured once from the server config.
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    upload_dir: PathBuf,
    max_dim: u32,
    quality: u8,
}

impl ImageNormalizer {
    pub fn new(upload_dir: PathBuf, max_dim: u32, quality: u8) -> Self {
        Self {
            upload_dir,
            max_dim,
            quality,
        }
    }

    /// Normalize an uploaded image and persist it.
    ///
    /// Empty input yields `None` (nothing to save, not an error); so does
    /// every decode/transform/encode/write failure, after a log entry.
    /// On success returns the bare filename for storage as the database
    /// reference.
    pub fn normalize(&self, data: &[u8]) -> Option<String> {
        if data.is_empty() {
            return None;
        }
        match self.normalize_inner(data) {
            Ok(bestand) => Some(bestand),
            Err(e) => {
                tracing::warn!(error = %e, bytes = data.len(), "Image normalization failed");
                None
            }
        }
    }

    fn normalize_inner(&self, data: &[u8]) -> Result<String, NormalizeError> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let mut decoder = reader.into_decoder()?;

        // Orientation must be read before the pixels are consumed
        let orientation = decoder
            .orientation()
            .unwrap_or(Orientation::NoTransforms);
        let mut img = DynamicImage::from_decoder(decoder)?;

        // Only the three pure rotations; other codes stay uncorrected
        match orientation {
            Orientation::Rotate180 => img = img.rotate180(),
            Orientation::Rotate90 => img = img.rotate90(),
            Orientation::Rotate270 => img = img.rotate270(),
            _ => {}
        }

        // Flatten alpha / palette modes; JPEG output is three-channel
        let mut img = DynamicImage::ImageRgb8(img.to_rgb8());

        if img.width() > self.max_dim || img.height() > self.max_dim {
            img = img.resize(self.max_dim, self.max_dim, FilterType::Lanczos3);
        }
        let (breedte, hoogte) = (img.width(), img.height());

        let mut buffer = Vec::new();
        {
            let mut cursor = Cursor::new(&mut buffer);
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, self.quality);
            img.into_rgb8().write_with_encoder(encoder)?;
        }

        fs::create_dir_all(&self.upload_dir)?;
        let bestand = format!("{}.jpg", hex::encode(rand::random::<[u8; 8]>()));
        fs::write(self.upload_dir.join(&bestand), &buffer)?;

        tracing::debug!(
            bestand = %bestand,
            breedte,
            hoogte,
            bytes = buffer.len(),
            "Image normalized"
        );
        Ok(bestand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb, Rgba};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buf = ImageBuffer::from_pixel(width, height, Rgba::<u8>([10, 120, 30, 128]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(buf)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// JPEG with the left half red, the right half blue, and an EXIF APP1
    /// segment carrying the given orientation code.
    fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
        let buf = ImageBuffer::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255u8, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(buf)
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        // TIFF body: little-endian header, one IFD entry (tag 0x0112,
        // SHORT, count 1) and no next IFD
        let mut tiff = vec![
            b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00, // IFD0 at offset 8
            0x01, 0x00, // entry count
            0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, // orientation tag
        ];
        tiff.extend_from_slice(&orientation.to_le_bytes());
        tiff.extend_from_slice(&[0x00, 0x00]); // value padding
        tiff.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // next IFD offset

        let mut app1 = vec![0xFF, 0xE1];
        app1.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        app1.extend_from_slice(b"Exif\0\0");
        app1.extend_from_slice(&tiff);

        // Splice the APP1 segment directly after SOI
        let mut out = Vec::with_capacity(jpeg.len() + app1.len());
        out.extend_from_slice(&jpeg[..2]);
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    fn is_red(px: &Rgb<u8>) -> bool {
        px.0[0] > 128 && px.0[2] < 128
    }

    fn is_blue(px: &Rgb<u8>) -> bool {
        px.0[2] > 128 && px.0[0] < 128
    }

    fn normalizer(dir: &std::path::Path) -> ImageNormalizer {
        ImageNormalizer::new(dir.to_path_buf(), 800, 85)
    }

    #[test]
    fn empty_input_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(normalizer(dir.path()).normalize(&[]), None);
    }

    #[test]
    fn undecodable_input_produces_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(normalizer(dir.path()).normalize(b"geen afbeelding"), None);
    }

    #[test]
    fn alpha_png_becomes_bounded_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let bestand = normalizer(dir.path()).normalize(&png_bytes(1200, 900)).unwrap();

        // 16 hex chars + fixed extension
        assert_eq!(bestand.len(), 20);
        assert!(bestand.ends_with(".jpg"));
        assert!(bestand[..16].chars().all(|c| c.is_ascii_hexdigit()));

        let opnieuw = image::open(dir.path().join(&bestand)).unwrap();
        assert!(opnieuw.width() <= 800 && opnieuw.height() <= 800);
        // Aspect ratio preserved: 1200x900 fits as 800x600
        assert_eq!((opnieuw.width(), opnieuw.height()), (800, 600));
    }

    #[test]
    fn small_images_are_never_upscaled() {
        let dir = tempfile::tempdir().unwrap();
        let bestand = normalizer(dir.path()).normalize(&png_bytes(200, 100)).unwrap();
        let opnieuw = image::open(dir.path().join(&bestand)).unwrap();
        assert_eq!((opnieuw.width(), opnieuw.height()), (200, 100));
    }

    #[test]
    fn exif_rotate_180_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let bestand = normalizer(dir.path())
            .normalize(&jpeg_with_orientation(300, 200, 3))
            .unwrap();
        let img = image::open(dir.path().join(&bestand)).unwrap().to_rgb8();

        // 180 degrees: red (left) ends on the right
        assert_eq!((img.width(), img.height()), (300, 200));
        assert!(is_blue(img.get_pixel(20, 100)));
        assert!(is_red(img.get_pixel(280, 100)));
    }

    #[test]
    fn exif_rotate_90_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let bestand = normalizer(dir.path())
            .normalize(&jpeg_with_orientation(300, 200, 6))
            .unwrap();
        let img = image::open(dir.path().join(&bestand)).unwrap().to_rgb8();

        // Clockwise: red (left) ends on top
        assert_eq!((img.width(), img.height()), (200, 300));
        assert!(is_red(img.get_pixel(100, 20)));
        assert!(is_blue(img.get_pixel(100, 280)));
    }

    #[test]
    fn exif_rotate_270_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let bestand = normalizer(dir.path())
            .normalize(&jpeg_with_orientation(300, 200, 8))
            .unwrap();
        let img = image::open(dir.path().join(&bestand)).unwrap().to_rgb8();

        // Counter-clockwise: red (left) ends at the bottom
        assert_eq!((img.width(), img.height()), (200, 300));
        assert!(is_blue(img.get_pixel(100, 20)));
        assert!(is_red(img.get_pixel(100, 280)));
    }

    #[test]
    fn mirrored_exif_codes_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let bestand = normalizer(dir.path())
            .normalize(&jpeg_with_orientation(300, 200, 2))
            .unwrap();
        let img = image::open(dir.path().join(&bestand)).unwrap().to_rgb8();

        // Horizontal mirror is not corrected: red stays on the left
        assert_eq!((img.width(), img.height()), (300, 200));
        assert!(is_red(img.get_pixel(20, 100)));
        assert!(is_blue(img.get_pixel(280, 100)));
    }

    #[test]
    fn renormalization_is_dimension_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let norm = normalizer(dir.path());

        let eerste = norm.normalize(&png_bytes(1600, 1600)).unwrap();
        let eerste_bytes = fs::read(dir.path().join(&eerste)).unwrap();
        let eerste_img = image::open(dir.path().join(&eerste)).unwrap();

        let tweede = norm.normalize(&eerste_bytes).unwrap();
        let tweede_img = image::open(dir.path().join(&tweede)).unwrap();
        assert_eq!(
            (eerste_img.width(), eerste_img.height()),
            (tweede_img.width(), tweede_img.height())
        );
    }
}
