//! # Binary Mask
//!
//! A host-side 2D boolean grid. Boundary extraction and distance transforms
//! are sequential scans, so mask planes are read off the device once and
//! processed here.

/// Row-major 2D binary mask with shape `[height, width]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    height: usize,
    width: usize,
    data: Vec<bool>,
}

impl BinaryMask {
    /// Creates an all-background mask.
    pub fn empty(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            data: vec![false; height * width],
        }
    }

    /// Creates a mask by evaluating `f(y, x)` for every pixel.
    pub fn from_fn(height: usize, width: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(height * width);
        for y in 0..height {
            for x in 0..width {
                data.push(f(y, x));
            }
        }
        Self {
            height,
            width,
            data,
        }
    }

    /// Creates a mask from row-major values, treating every non-zero value as foreground.
    ///
    /// # Panics
    /// If `values.len() != height * width`.
    pub fn from_values(height: usize, width: usize, values: &[f64]) -> Self {
        assert_eq!(
            values.len(),
            height * width,
            "from_values requires exactly height * width values"
        );
        Self {
            height,
            width,
            data: values.iter().map(|&v| v != 0.0).collect(),
        }
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    /// `[height, width]`
    pub const fn dims(&self) -> [usize; 2] {
        [self.height, self.width]
    }

    pub fn get(&self, y: usize, x: usize) -> bool {
        self.data[y * self.width + x]
    }

    /// Whether any pixel is foreground.
    pub fn any(&self) -> bool {
        self.data.iter().any(|&v| v)
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Foreground pixel coordinates `(y, x)` in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v)
            .map(move |(i, _)| (i / width, i % width))
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Copies the window `[y0, y1) x [x0, x1)` into a new mask.
    pub(crate) fn crop(&self, y0: usize, y1: usize, x0: usize, x1: usize) -> Self {
        Self::from_fn(y1 - y0, x1 - x0, |y, x| self.get(y0 + y, x0 + x))
    }

    /// Bounding box `(y0, y1, x0, x1)` (exclusive ends) of the foreground, if any.
    pub(crate) fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        self.coords().fold(None, |acc, (y, x)| match acc {
            None => Some((y, y + 1, x, x + 1)),
            Some((y0, y1, x0, x1)) => Some((y0.min(y), y1.max(y + 1), x0.min(x), x1.max(x + 1))),
        })
    }
}
