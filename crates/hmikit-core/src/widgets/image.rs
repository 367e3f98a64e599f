//! Raster image widget with a placeholder fallback.

use crate::error::ImageLoadError;
use kurbo::{Size, Vec2};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Image format of a loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        None
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub rgba: Vec<u8>,
}

impl LoadedImage {
    /// Decode PNG, JPEG or WebP data.
    pub fn decode(data: &[u8]) -> Result<Self, ImageLoadError> {
        Self::decode_with_hint(data, None)
    }

    /// Decode, using `hint` when the magic bytes name no known format.
    pub fn decode_with_hint(
        data: &[u8],
        hint: Option<ImageFormat>,
    ) -> Result<Self, ImageLoadError> {
        let format = ImageFormat::from_magic_bytes(data)
            .or(hint)
            .ok_or(ImageLoadError::UnsupportedFormat)?;
        let decoded = image::load_from_memory_with_format(data, format.into())?.to_rgba8();
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageLoadError::Empty);
        }
        Ok(Self {
            width,
            height,
            format,
            rgba: decoded.into_raw(),
        })
    }

    /// Scale factors that stretch the pixels over `size`.
    pub fn scale_to(&self, size: Size) -> Vec2 {
        Vec2::new(
            size.width / f64::from(self.width),
            size.height / f64::from(self.height),
        )
    }
}

/// Image state: pixels once loaded, a placeholder otherwise.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageWidget {
    source: Option<PathBuf>,
    #[serde(rename = "loaded", serialize_with = "serialize_loaded")]
    pixels: Option<LoadedImage>,
}

fn serialize_loaded<S: Serializer>(
    pixels: &Option<LoadedImage>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(pixels.is_some())
}

impl ImageWidget {
    /// Load and decode an image file.
    ///
    /// On failure the widget keeps whatever it showed before.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ImageLoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let hint = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension);
        let pixels = LoadedImage::decode_with_hint(&data, hint)?;
        if hint.is_some_and(|ext| ext != pixels.format) {
            log::debug!(
                "{} holds {:?} data despite its extension",
                path.display(),
                pixels.format
            );
        }
        self.pixels = Some(pixels);
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Decode an in-memory image.
    pub fn load_from_bytes(&mut self, data: &[u8]) -> Result<(), ImageLoadError> {
        self.pixels = Some(LoadedImage::decode(data)?);
        self.source = None;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn pixels(&self) -> Option<&LoadedImage> {
        self.pixels.as_ref()
    }

    /// File the pixels were loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
