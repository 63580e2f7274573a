use std::fmt;
use std::path::Path;

use crate::{ColorKey, MapOffset};

/// Immutable grid of classification colors decoded from the map image.
///
/// The grid is row-major and fixed at load time; sampling outside the
/// half-open bounds `[0, width) x [0, height)` yields the sentinel color,
/// so callers never have to range-check first.
pub struct TemplateMap {
    width: u32,
    height: u32,
    pixels: Vec<ColorKey>,
}

impl TemplateMap {
    /// Decodes a raster file into an RGB template. Any format the `image`
    /// crate understands is accepted; alpha is dropped.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let img = image::open(path.as_ref())?.to_rgb8();
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|px| ColorKey::from(*px)).collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a template from raw row-major pixels, padding or truncating
    /// with sentinel fill when the input length does not match.
    pub fn from_pixels(width: u32, height: u32, mut pixels: Vec<ColorKey>) -> Self {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            pixels.resize(expected, ColorKey::SENTINEL);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color of the pixel at (px, py), sentinel when out of bounds.
    #[inline]
    pub fn color_at(&self, px: i32, py: i32) -> ColorKey {
        if px < 0 || py < 0 {
            return ColorKey::SENTINEL;
        }
        let (px, py) = (px as u32, py as u32);
        if px >= self.width || py >= self.height {
            return ColorKey::SENTINEL;
        }
        self.pixels[py as usize * self.width as usize + px as usize]
    }

    /// Samples the template by world column instead of pixel, using the
    /// inverse of the scan's pixel-to-world walk.
    #[inline]
    pub fn color_at_world(&self, offset: MapOffset, wx: i32, wz: i32) -> ColorKey {
        let (px, py) = offset.world_to_pixel(wx, wz);
        self.color_at(px, py)
    }
}

impl fmt::Debug for TemplateMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateMap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[derive(Debug)]
pub enum TemplateError {
    /// The image file could not be opened or decoded.
    Decode(image::ImageError),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Decode(err) => write!(f, "unable to decode map image: {}", err),
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<image::ImageError> for TemplateError {
    fn from(err: image::ImageError) -> Self {
        TemplateError::Decode(err)
    }
}
