use crate::error::DataError;

/// Read-only 1bpp bitmap.
///
/// Pixel `(x, y)` is bit `y % 8` of byte `(y / 8) * width + x`; a set bit is
/// a lit pixel.
#[derive(Debug, Clone, Copy)]
pub struct Texture<'a> {
    data: &'a [u8],
    width: u8,
    height: u8,
}

impl<'a> Texture<'a> {
    #[inline]
    pub const fn byte_len(width: u8, height: u8) -> usize {
        (height as usize).div_ceil(8) * width as usize
    }

    /// Raw pixel data with dimensions supplied separately.
    pub fn new(data: &'a [u8], width: u8, height: u8) -> Result<Self, DataError> {
        if width == 0 || height == 0 {
            return Err(DataError::ZeroDimension);
        }
        let expected = Self::byte_len(width, height);
        if data.len() < expected {
            return Err(DataError::Truncated {
                expected,
                actual: data.len(),
            });
        }
        log::debug!("texture {width}x{height}");
        Ok(Self {
            data: &data[..expected],
            width,
            height,
        })
    }

    /// Self-describing data: width byte, height byte, then pixels.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DataError> {
        match data {
            [] => Err(DataError::Empty),
            [_] => Err(DataError::Truncated {
                expected: 2,
                actual: 1,
            }),
            [width, height, pixels @ ..] => Self::new(pixels, *width, *height),
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u8 {
        self.height
    }

    /// 0 or 1. Coordinates outside the bitmap read as 0.
    #[inline]
    pub fn pixel(&self, x: u8, y: u8) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        let index = usize::from(y / 8) * usize::from(self.width) + usize::from(x);
        (self.data[index] >> (y % 8)) & 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 8x8 with a diagonal from top-left to bottom-right
    const DIAGONAL: [u8; 10] = [8, 8, 0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

    #[test]
    fn reads_self_describing() {
        let t = Texture::from_bytes(&DIAGONAL).unwrap();
        assert_eq!((t.width(), t.height()), (8, 8));
        for i in 0..8 {
            assert_eq!(t.pixel(i, i), 1);
        }
        assert_eq!(t.pixel(1, 0), 0);
        assert_eq!(t.pixel(0, 7), 0);
    }

    #[test]
    fn rows_span_pages() {
        // 2 wide, 10 high: second page holds rows 8 and 9
        let data = [0x00, 0x80, 0x02, 0x00];
        let t = Texture::new(&data, 2, 10).unwrap();
        assert_eq!(t.pixel(1, 7), 1);
        assert_eq!(t.pixel(0, 9), 1);
        assert_eq!(t.pixel(1, 9), 0);
    }

    #[test]
    fn out_of_range_reads_zero() {
        let t = Texture::from_bytes(&DIAGONAL).unwrap();
        assert_eq!(t.pixel(8, 0), 0);
        assert_eq!(t.pixel(0, 200), 0);
    }

    #[test]
    fn validates_length_and_size() {
        assert_eq!(Texture::from_bytes(&[]).unwrap_err(), DataError::Empty);
        assert_eq!(
            Texture::new(&[], 0, 8).unwrap_err(),
            DataError::ZeroDimension
        );
        assert_eq!(
            Texture::from_bytes(&[8, 9, 0, 0]).unwrap_err(),
            DataError::Truncated {
                expected: 16,
                actual: 2
            }
        );
    }
}
