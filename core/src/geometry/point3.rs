//! 3-D Points

#![allow(dead_code)]
use super::{Vector3, Vector3f};
use crate::math::*;
use num_traits::{Num, Zero};
use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

/// A 3-D point containing numeric values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X-coordinate.
    pub x: T,

    /// Y-coordinate.
    pub y: T,

    /// Z-coordinate.
    pub z: T,
}

/// 3-D point containing `Float` values.
pub type Point3f = Point3<Float>;

impl Point3f {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
}

impl<T: Num> Point3<T> {
    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a new 3-D point at the origin.
    pub fn zero() -> Self
    where
        T: Zero,
    {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Returns the square of the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: &Self) -> T
    where
        T: Copy,
    {
        (*self - *other).length_squared()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> T
    where
        T: num_traits::Float,
    {
        (*self - *other).length()
    }

    /// Return the component-wise minimum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn min(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(min(self.x, other.x), min(self.y, other.y), min(self.z, other.z))
    }

    /// Return the component-wise maximum coordinate values with another point.
    ///
    /// * `other` - The other point.
    pub fn max(&self, other: &Self) -> Self
    where
        T: PartialOrd + Copy,
    {
        Self::new(max(self.x, other.x), max(self.y, other.y), max(self.z, other.z))
    }
}

impl<T: Num> Add<Vector3<T>> for Point3<T> {
    type Output = Self;

    /// Offset the point by a vector.
    ///
    /// * `v` - The vector.
    fn add(self, v: Vector3<T>) -> Self::Output {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl<T: Num> Add for Point3<T> {
    type Output = Self;

    /// Adds the coordinates of two points. Only meaningful for weighted sums
    /// such as `lerp()`.
    ///
    /// * `other` - The other point.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: Num> Sub for Point3<T> {
    type Output = Vector3<T>;

    /// Returns the vector from another point to this one.
    ///
    /// * `other` - The other point.
    fn sub(self, other: Self) -> Self::Output {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: Num> Sub<Vector3<T>> for Point3<T> {
    type Output = Self;

    /// Offset the point by the negated vector.
    ///
    /// * `v` - The vector.
    fn sub(self, v: Vector3<T>) -> Self::Output {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Mul<Point3f> for Float {
    type Output = Point3f;

    /// Scale the point coordinates.
    ///
    /// * `p` - The point.
    fn mul(self, p: Point3f) -> Point3f {
        Point3f::new(self * p.x, self * p.y, self * p.z)
    }
}

impl<T> Index<usize> for Point3<T> {
    type Output = T;

    /// Index the point by an axis to get the immutable coordinate axis value.
    ///
    /// * `axis` - A 3-D coordinate axis.
    fn index(&self, axis: usize) -> &Self::Output {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis {axis} for Point3"),
        }
    }
}

impl<T> From<[T; 3]> for Point3<T> {
    /// Convert a packed `[x, y, z]` triple into a point.
    ///
    /// * `p` - The packed coordinates.
    fn from(p: [T; 3]) -> Self {
        let [x, y, z] = p;
        Self { x, y, z }
    }
}

impl From<Point3f> for Vector3f {
    /// Convert a point into the vector from the origin.
    ///
    /// * `p` - The point.
    fn from(p: Point3f) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl<T: fmt::Display> fmt::Display for Point3<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sub_points_gives_vector() {
        let p1 = Point3f::new(1.0, 2.0, 3.0);
        let p2 = Point3f::new(0.0, 2.0, 5.0);
        assert_eq!(p1 - p2, Vector3f::new(1.0, 0.0, -2.0));
        assert_eq!(p2 + (p1 - p2), p1);
    }

    #[test]
    fn lerp_midpoint() {
        let p1 = Point3f::new(-2.0, 0.0, 4.0);
        let p2 = Point3f::new(2.0, 2.0, 8.0);
        assert_eq!(lerp(0.5, p1, p2), Point3f::new(0.0, 1.0, 6.0));
    }

    prop_point3!(point3_f32, f32, -100.0..100.0f32, -100.0..100.0f32, -100.0..100.0f32);

    proptest! {
        #[test]
        fn distance_is_symmetric(p1 in point3_f32(), p2 in point3_f32()) {
            prop_assert_eq!(p1.distance_squared(&p2), p2.distance_squared(&p1));
        }

        #[test]
        fn min_max_bracket(p1 in point3_f32(), p2 in point3_f32()) {
            let (lo, hi) = (p1.min(&p2), p1.max(&p2));
            prop_assert!(lo.x <= hi.x && lo.y <= hi.y && lo.z <= hi.z);
        }
    }
}
