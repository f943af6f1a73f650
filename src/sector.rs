use crate::error::DataError;
use crate::geometry::{Point2F, Point2U8};

/// Most vertices a sector may carry; sizes the renderers' scratch buffers.
pub const MAX_POINTS: usize = 16;

/// Closed polygon of world-space vertices, borrowed from packed data.
///
/// Encoding: byte 0 is the vertex count `N`, then `N` `(x, y)` byte pairs
/// in winding order. Vertex `i` and vertex `(i + 1) % N` form a wall.
#[derive(Debug, Clone, Copy)]
pub struct Sector<'a> {
    points: &'a [u8],
    point_count: u8,
}

impl<'a> Sector<'a> {
    pub const MAX_POINTS: usize = MAX_POINTS;

    /// Validates the header against [`Self::MAX_POINTS`] and the slice
    /// length. Trailing bytes are ignored.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DataError> {
        let (&count, rest) = data.split_first().ok_or(DataError::Empty)?;
        Self::from_points(rest, count)
    }

    /// Headerless vertex pairs with the count supplied separately.
    pub fn from_points(points: &'a [u8], point_count: u8) -> Result<Self, DataError> {
        let count = usize::from(point_count);
        if count > Self::MAX_POINTS {
            return Err(DataError::TooManyPoints {
                count,
                max: Self::MAX_POINTS,
            });
        }
        let expected = count * 2;
        if points.len() < expected {
            return Err(DataError::Truncated {
                expected,
                actual: points.len(),
            });
        }
        log::debug!("sector with {count} points");
        Ok(Self {
            points: &points[..expected],
            point_count,
        })
    }

    #[inline]
    pub fn point_count(&self) -> u8 {
        self.point_count
    }

    pub fn raw_point(&self, index: u8) -> Option<Point2U8> {
        let i = usize::from(index) * 2;
        let pair = self.points.get(i..i + 2)?;
        Some(Point2U8::new(pair[0], pair[1]))
    }

    /// World-space vertex, `None` past [`Self::point_count`].
    #[inline]
    pub fn point(&self, index: u8) -> Option<Point2F> {
        self.raw_point(index).map(Point2U8::to_f32)
    }

    pub fn points(&self) -> impl Iterator<Item = Point2F> + '_ {
        self.points
            .chunks_exact(2)
            .map(|pair| Point2U8::new(pair[0], pair[1]).to_f32())
    }

    /// `(i, (i + 1) % N)` index pairs, one per wall.
    pub fn edges(&self) -> impl Iterator<Item = (u8, u8)> {
        let n = self.point_count;
        (0..n).map(move |i| (i, if i + 1 == n { 0 } else { i + 1 }))
    }
}
