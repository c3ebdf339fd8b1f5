//! # Image Preprocessing
//!
//! Grayscale conversion, brightness/contrast and resampling that turn a
//! decoded RGBA picture into a [`HeightField`]. Dark pixels become thick
//! relief, bright pixels thin, as a backlit print needs.

use crate::error::{LithophaneError, LithophaneResult};
use crate::height_field::HeightField;
use config::constants::GRAYSCALE_WEIGHTS;
use tracing::debug;

/// Contrast values beyond this saturate the 8-bit contrast curve.
const MAX_CONTRAST: f64 = 255.0;

/// An 8-bit single channel image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Wraps a grayscale pixel buffer.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> LithophaneResult<Self> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(LithophaneError::invalid_image(format!(
                "expected {expected} gray pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Converts an RGBA buffer to luma. Alpha is ignored.
    ///
    /// ```rust
    /// use lithophane_mesh::GrayImage;
    ///
    /// let image = GrayImage::from_rgba(2, 1, &[255, 255, 255, 255, 0, 0, 0, 255]).unwrap();
    /// assert_eq!(image.pixels(), &[255, 0]);
    /// ```
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> LithophaneResult<Self> {
        let expected = pixel_count(width, height)?
            .checked_mul(4)
            .ok_or_else(|| LithophaneError::invalid_image("image size overflows"))?;
        if rgba.len() != expected {
            return Err(LithophaneError::invalid_image(format!(
                "expected {expected} RGBA bytes for {width}x{height}, got {}",
                rgba.len()
            )));
        }

        let [wr, wg, wb] = GRAYSCALE_WEIGHTS;
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| {
                let luma = wr * f64::from(px[0]) + wg * f64::from(px[1]) + wb * f64::from(px[2]);
                to_channel(luma)
            })
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Applies contrast then brightness with 8-bit canvas semantics.
    ///
    /// `contrast` lies in `[-255, 255]` (0 leaves the image unchanged) and
    /// `brightness` is a non-negative multiplier (1 leaves it unchanged).
    ///
    /// ```rust
    /// use lithophane_mesh::GrayImage;
    ///
    /// let image = GrayImage::new(3, 1, vec![0, 128, 200]).unwrap();
    /// assert_eq!(image.adjust(1.0, 0.0).unwrap(), image);
    /// assert_eq!(image.adjust(0.5, 0.0).unwrap().pixels(), &[0, 64, 100]);
    /// ```
    pub fn adjust(&self, brightness: f64, contrast: f64) -> LithophaneResult<Self> {
        if !(brightness >= 0.0) || !brightness.is_finite() {
            return Err(LithophaneError::invalid_image(format!(
                "brightness must be a non-negative number, got {brightness}"
            )));
        }
        if !(contrast.abs() <= MAX_CONTRAST) {
            return Err(LithophaneError::invalid_image(format!(
                "contrast must lie in [-255, 255], got {contrast}"
            )));
        }

        let factor = 259.0 * (255.0 + contrast) / (255.0 * (259.0 - contrast));
        let pixels = self
            .pixels
            .iter()
            .map(|&v| to_channel((factor * (f64::from(v) - 128.0) + 128.0) * brightness))
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    /// Nearest-neighbour resampling to `width × height`.
    pub fn resample_nearest(&self, width: usize, height: usize) -> LithophaneResult<Self> {
        pixel_count(width, height)?;
        if self.pixels.is_empty() {
            return Err(LithophaneError::invalid_image("cannot resample an empty image"));
        }

        // Sample at pixel centres: src = floor((dst + 0.5) * src_len / dst_len).
        let source = |dst: usize, dst_len: usize, src_len: usize| {
            ((2 * dst + 1) * src_len / (2 * dst_len)).min(src_len - 1)
        };
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = source(y, height, self.height) * self.width;
            for x in 0..width {
                pixels.push(self.pixels[row + source(x, width, self.width)]);
            }
        }
        debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "resampled image"
        );
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Maps each pixel `v` to the height sample `1 - v / 255`.
    ///
    /// ```rust
    /// use lithophane_mesh::GrayImage;
    ///
    /// let field = GrayImage::new(2, 1, vec![0, 255]).unwrap().to_height_field();
    /// assert_eq!(field.samples(), &[1.0, 0.0]);
    /// ```
    pub fn to_height_field(&self) -> HeightField {
        HeightField::from_fn(self.width, self.height, |x, z| {
            1.0 - f64::from(self.pixels[z * self.width + x]) / 255.0
        })
    }
}

fn pixel_count(width: usize, height: usize) -> LithophaneResult<usize> {
    if width == 0 || height == 0 {
        return Err(LithophaneError::invalid_image(format!(
            "image must not be empty, got {width}x{height}"
        )));
    }
    width
        .checked_mul(height)
        .ok_or_else(|| LithophaneError::invalid_image("image size overflows"))
}

#[inline]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}
