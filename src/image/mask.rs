//! Owned binary raster in row-major layout (stride == width).
//!
//! Every pixel holds 0 or 1. Masks are built once (by a constructor, a
//! binarizer or a collaborator such as the skeleton reducer) and then only
//! read; stages hand them around by shared reference.
use super::traits::ImageView;
use crate::error::{ExtractError, Result};
use image::{GrayImage, Luma};

/// 8-neighbor offsets, edge-adjacent first, then diagonals.
pub const NEIGHBORS_8: [(isize, isize); 8] = [
    (0, -1),
    (-1, 0),
    (1, 0),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

#[derive(Clone, PartialEq, Eq)]
pub struct BinaryMask {
    /// Mask width in pixels
    pub w: usize,
    /// Mask height in pixels
    pub h: usize,
    data: Vec<u8>,
}

impl BinaryMask {
    /// All-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Build a mask by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(u8::from(f(x, y)));
            }
        }
        Self { w, h, data }
    }

    /// Wrap raw row-major bytes; any non-zero byte counts as foreground.
    pub fn from_raw(w: usize, h: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != w * h {
            return Err(ExtractError::InvalidParams(format!(
                "mask buffer holds {} bytes, expected {}x{}",
                data.len(),
                w,
                h
            )));
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self { w, h, data })
    }

    /// Foreground is every non-zero pixel of `img`.
    pub fn from_gray(img: &GrayImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        let data = img.as_raw().iter().map(|&v| u8::from(v != 0)).collect();
        Self { w, h, data }
    }

    /// Render as 0/255 grayscale, suitable for saving or for `imageproc`.
    pub fn to_gray_image(&self) -> GrayImage {
        let mut out = GrayImage::new(self.w as u32, self.h as u32);
        for (y, row) in self.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                out.put_pixel(x as u32, y as u32, Luma([if v != 0 { 255 } else { 0 }]));
            }
        }
        out
    }

    #[inline]
    /// Convert (x, y) to a linear index into the backing buffer.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[self.idx(x, y)] != 0
    }

    /// Bounds-checked lookup; anything outside the mask is background.
    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        let i = self.idx(x, y);
        self.data[i] = u8::from(v);
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Foreground pixel coordinates `[x, y]` in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let w = self.w.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(i, _)| [i % w, i / w])
    }

    /// Number of foreground 8-neighbors of `(x, y)`.
    pub fn degree(&self, x: usize, y: usize) -> usize {
        NEIGHBORS_8
            .iter()
            .filter(|(dx, dy)| self.get_signed(x as isize + dx, y as isize + dy))
            .count()
    }

    /// Fail unless `other` has the same dimensions as `self`.
    pub fn ensure_same_size(&self, other: &BinaryMask) -> Result<()> {
        if self.w == other.w && self.h == other.h {
            return Ok(());
        }
        Err(ExtractError::DimensionMismatch {
            expected_w: self.w,
            expected_h: self.h,
            actual_w: other.w,
            actual_h: other.h,
        })
    }
}

impl std::fmt::Debug for BinaryMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryMask")
            .field("w", &self.w)
            .field("h", &self.h)
            .field("set", &self.count())
            .finish()
    }
}

impl ImageView for BinaryMask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
