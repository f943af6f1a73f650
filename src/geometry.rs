//! 2D point and displacement types.
//!
//! Points and vectors are kept distinct: `Point2 - Point2` yields a
//! `Vector2`, `Point2 + Vector2` yields a `Point2`.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2<T> {
    pub x: T,
    pub y: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

pub type Point2F = Point2<f32>;
pub type Vector2F = Vector2<f32>;
pub type Point2U8 = Point2<u8>;

impl<T> Point2<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> Vector2<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl Point2U8 {
    #[inline]
    pub fn to_f32(self) -> Point2F {
        Point2F::new(f32::from(self.x), f32::from(self.y))
    }
}

impl<T: Copy + Mul<Output = T> + Add<Output = T>> Vector2<T> {
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn magnitude_squared(self) -> T {
        self.dot(self)
    }
}

impl<T: Copy + PartialEq + Default> Vector2<T> {
    #[inline]
    pub fn is_zero_length(self) -> bool {
        self.x == T::default() && self.y == T::default()
    }
}

impl Vector2F {
    /// Unit vector at `angle` radians from the +X axis.
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns the zero vector unchanged rather than dividing by zero.
    pub fn normalized(self) -> Self {
        let len = self.magnitude();
        if len <= f32::EPSILON {
            return self;
        }
        self / len
    }

    /// Rotated a quarter turn counter-clockwise: `(x, y) -> (-y, x)`.
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl<T: Sub<Output = T>> Sub for Point2<T> {
    type Output = Vector2<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Vector2<T> {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Add<Output = T>> Add<Vector2<T>> for Point2<T> {
    type Output = Point2<T>;

    #[inline]
    fn add(self, rhs: Vector2<T>) -> Point2<T> {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub<Vector2<T>> for Point2<T> {
    type Output = Point2<T>;

    #[inline]
    fn sub(self, rhs: Vector2<T>) -> Point2<T> {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: AddAssign> AddAssign<Vector2<T>> for Point2<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2<T>) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: SubAssign> SubAssign<Vector2<T>> for Point2<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector2<T>) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Add<Output = T>> Add for Vector2<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for Vector2<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: AddAssign> AddAssign for Vector2<T> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: SubAssign> SubAssign for Vector2<T> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vector2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Copy + Div<Output = T>> Div<T> for Vector2<T> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: T) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: Neg<Output = T>> Neg for Vector2<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_difference_is_vector() {
        let a = Point2F::new(3.0, 5.0);
        let b = Point2F::new(1.0, 1.0);
        assert_eq!(a - b, Vector2F::new(2.0, 4.0));
        assert_eq!(b + (a - b), a);
    }

    #[test]
    fn integer_vectors_support_dot() {
        let v = Vector2::<i32>::new(3, 4);
        assert_eq!(v.magnitude_squared(), 25);
        assert_eq!(v.dot(Vector2::new(1, 0)), 3);
        assert!(Vector2::<i32>::new(0, 0).is_zero_length());
    }

    #[test]
    fn normalize_keeps_zero_vector() {
        let zero = Vector2F::default();
        assert_eq!(zero.normalized(), zero);

        let n = Vector2F::new(3.0, 4.0).normalized();
        assert!((n.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn perpendicular_is_orthogonal() {
        let v = Vector2F::from_angle(0.7);
        assert!(v.dot(v.perpendicular()).abs() < 1e-6);
    }
}
