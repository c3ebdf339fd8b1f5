//! # Height Field
//!
//! Row-major grid of normalized heights, the input to the mesh builder.

use crate::error::{LithophaneError, LithophaneResult};
use serde::{Deserialize, Serialize};

/// A `width × height` grid of samples in `[0, 1]`, row-major with the origin
/// at sample `(0, 0)`.
///
/// Values are not range checked; the builder maps whatever it is given.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::HeightField;
///
/// let field = HeightField::new(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// assert_eq!(field.get(1, 0), 1.0);
/// assert_eq!(field.len(), 4);
/// ```
///
/// Deserialization goes through [`HeightField::new`], so a decoded field
/// always holds exactly `width * height` samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HeightFieldData")]
pub struct HeightField {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

/// Unchecked wire form of [`HeightField`].
#[derive(Deserialize)]
struct HeightFieldData {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

impl TryFrom<HeightFieldData> for HeightField {
    type Error = LithophaneError;

    fn try_from(data: HeightFieldData) -> LithophaneResult<Self> {
        Self::new(data.width, data.height, data.samples)
    }
}

impl HeightField {
    /// Creates a height field, checking that `samples` holds exactly
    /// `width * height` values.
    pub fn new(width: usize, height: usize, samples: Vec<f64>) -> LithophaneResult<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            LithophaneError::invalid_dimensions(format!("{width}x{height} grid overflows"))
        })?;
        if samples.len() != expected {
            return Err(LithophaneError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Creates a height field by evaluating `f(x, z)` for every sample.
    ///
    /// ```rust
    /// use lithophane_mesh::HeightField;
    ///
    /// let ramp = HeightField::from_fn(4, 2, |x, _| x as f64 / 3.0);
    /// assert_eq!(ramp.get(3, 1), 1.0);
    /// ```
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut samples = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                samples.push(f(x, z));
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// Samples per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the field holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the sample at column `x`, row `z`.
    #[inline]
    pub fn get(&self, x: usize, z: usize) -> f64 {
        self.samples[z * self.width + x]
    }

    /// Returns all samples in row-major order.
    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}
