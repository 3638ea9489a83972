//! Raster image embedding.
//!
//! Decoding and re-encoding are delegated to the `image` crate; the
//! assembly engine itself never touches pixel formats. An embedded image
//! is either a raw 8-bit RGB buffer (written into the file unfiltered) or
//! a JPEG byte stream passed through as-is under the DCTDecode filter —
//! the engine never recompresses.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Error, Result};
use crate::object::{Dict, Object};

/// JPEG re-encode quality used when compression is requested.
const JPEG_QUALITY: u8 = 85;

/// A decoded image ready for embedding as an XObject.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Raw RGB rows, or a complete JPEG byte stream when compressed
    pub data: Vec<u8>,
    /// Whether `data` is a JPEG stream (DCTDecode) rather than raw RGB
    pub compressed: bool,
}

impl EmbeddedImage {
    /// Load an image from `path`, decoding to 8-bit RGB.
    ///
    /// With `compress` set the pixels are re-encoded as JPEG (quality 85)
    /// and the resulting byte stream is embedded verbatim; otherwise the
    /// raw 3-bytes-per-pixel rows are embedded.
    ///
    /// A missing file is [`Error::ImageNotFound`]; any other codec
    /// failure maps to [`Error::Image`].
    pub fn open(path: impl AsRef<Path>, compress: bool) -> Result<Self> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(ref io) if io.kind() == ErrorKind::NotFound => {
                Error::ImageNotFound(path.to_path_buf())
            },
            other => Error::Image(other.to_string()),
        })?;

        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        let (data, compressed) = if compress {
            let mut buf = Vec::new();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .encode(rgb.as_raw(), width, height, image::ColorType::Rgb8)
                .map_err(|e| Error::Image(e.to_string()))?;
            (buf, true)
        } else {
            (rgb.into_raw(), false)
        };

        Ok(Self {
            width,
            height,
            data,
            compressed,
        })
    }

    /// Build an image from already-prepared parts.
    ///
    /// Used when the caller has its own decode path; `data` must match
    /// the layout implied by `compressed`.
    pub fn from_parts(width: u32, height: u32, data: Vec<u8>, compressed: bool) -> Self {
        Self {
            width,
            height,
            data,
            compressed,
        }
    }

    /// Build the XObject stream dictionary for this image.
    ///
    /// `/Length` is intentionally absent; the serializer derives it from
    /// the actual payload so the declared and written sizes cannot drift.
    pub fn xobject_dict(&self) -> Dict {
        let mut dict = Dict::new();
        dict.insert("Type".to_string(), Object::name("XObject"));
        dict.insert("Subtype".to_string(), Object::name("Image"));
        dict.insert("Width".to_string(), Object::Integer(self.width as i64));
        dict.insert("Height".to_string(), Object::Integer(self.height as i64));
        dict.insert("ColorSpace".to_string(), Object::name("DeviceRGB"));
        dict.insert("BitsPerComponent".to_string(), Object::Integer(8));
        if self.compressed {
            dict.insert("Filter".to_string(), Object::name("DCTDecode"));
        }
        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_image_not_found() {
        let result = EmbeddedImage::open("/nonexistent/picture.png", false);
        assert!(matches!(result, Err(Error::ImageNotFound(_))));
    }

    #[test]
    fn test_xobject_dict_raw() {
        let img = EmbeddedImage::from_parts(4, 2, vec![0u8; 4 * 2 * 3], false);
        let dict = img.xobject_dict();
        assert_eq!(dict.get("Subtype"), Some(&Object::name("Image")));
        assert_eq!(dict.get("Width"), Some(&Object::Integer(4)));
        assert_eq!(dict.get("Height"), Some(&Object::Integer(2)));
        assert_eq!(dict.get("ColorSpace"), Some(&Object::name("DeviceRGB")));
        assert!(dict.get("Filter").is_none());
    }

    #[test]
    fn test_xobject_dict_jpeg_has_dct_filter() {
        let img = EmbeddedImage::from_parts(4, 2, vec![0xFF, 0xD8, 0xFF], true);
        let dict = img.xobject_dict();
        assert_eq!(dict.get("Filter"), Some(&Object::name("DCTDecode")));
    }

    #[test]
    fn test_open_decodes_and_encodes_round_trip() {
        // Write a tiny PNG with the image crate, then embed it both ways.
        let dir = std::env::temp_dir().join("pdf_scribe_image_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dot.png");
        let buf = image::RgbImage::from_pixel(3, 3, image::Rgb([200u8, 10, 10]));
        buf.save(&path).unwrap();

        let raw = EmbeddedImage::open(&path, false).unwrap();
        assert_eq!((raw.width, raw.height), (3, 3));
        assert!(!raw.compressed);
        assert_eq!(raw.data.len(), 3 * 3 * 3);

        let jpeg = EmbeddedImage::open(&path, true).unwrap();
        assert!(jpeg.compressed);
        // JPEG streams start with the SOI marker.
        assert_eq!(&jpeg.data[..2], &[0xFF, 0xD8]);

        let _ = std::fs::remove_file(&path);
    }
}
