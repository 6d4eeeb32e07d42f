use super::traits::ImageView;
use crate::error::{ExtractError, Result};
use image::GrayImage;

/// Borrowed 8-bit grayscale view over a caller-owned buffer. Rows may be
/// padded: `stride >= w` bytes separate consecutive rows.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view; fails when `data` is not exactly `w * h` bytes.
    pub fn packed(w: usize, h: usize, data: &'a [u8]) -> Result<Self> {
        let view = Self {
            w,
            h,
            stride: w,
            data,
        };
        view.validate()?;
        Ok(view)
    }

    /// Check that the stride and buffer length cover every visible pixel.
    pub fn validate(&self) -> Result<()> {
        if self.stride < self.w {
            return Err(ExtractError::InvalidParams(format!(
                "stride {} is smaller than width {}",
                self.stride, self.w
            )));
        }
        let needed = match self.h {
            0 => 0,
            h => (h - 1) * self.stride + self.w,
        };
        if self.data.len() < needed {
            return Err(ExtractError::InvalidParams(format!(
                "{}x{} view with stride {} needs {} bytes, buffer has {}",
                self.w,
                self.h,
                self.stride,
                needed,
                self.data.len()
            )));
        }
        Ok(())
    }

    /// Copy the visible pixels into a packed `GrayImage` for `imageproc`.
    pub fn to_gray_image(&self) -> GrayImage {
        let mut packed = Vec::with_capacity(self.w * self.h);
        for row in self.rows() {
            packed.extend_from_slice(row);
        }
        GrayImage::from_fn(self.w as u32, self.h as u32, |x, y| {
            image::Luma([packed[y as usize * self.w + x as usize]])
        })
    }
}

impl ImageView for ImageU8<'_> {
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
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_rows_skip_padding() {
        let data = [1u8, 2, 9, 3, 4, 9];
        let view = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            data: &data,
        };
        assert!(view.validate().is_ok());
        let rows: Vec<&[u8]> = view.rows().collect();
        assert_eq!(rows, vec![&[1u8, 2][..], &[3u8, 4][..]]);
        assert_eq!(view.pixel(1, 1), 4);
        assert_eq!(view.to_gray_image().as_raw(), &vec![1u8, 2, 3, 4]);
    }

    #[test]
    fn short_buffers_are_rejected() {
        let data = [0u8; 5];
        assert!(ImageU8::packed(3, 2, &data).is_err());
        let bad_stride = ImageU8 {
            w: 4,
            h: 1,
            stride: 2,
            data: &data,
        };
        assert!(bad_stride.validate().is_err());
        // A padded last row may end early.
        let tail = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            data: &data,
        };
        assert!(tail.validate().is_ok());
    }
}
