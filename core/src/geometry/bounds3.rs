//! 3-D Axis Aligned Bounding Boxes.

#![allow(dead_code)]
use super::{Point3, Point3f};
use crate::math::*;
use num_traits::Num;
use std::fmt;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3<T> {
    /// Minimum bounds.
    pub p_min: Point3<T>,

    /// Maximum bounds.
    pub p_max: Point3<T>,
}

/// 3-D bounding box containing `Float` points.
pub type Bounds3f = Bounds3<Float>;

impl<T: Num + PartialOrd + Copy> Bounds3<T> {
    /// Creates a new 3-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point3<T>, p2: Point3<T>) -> Self {
        Self { p_min: p1.min(&p2), p_max: p1.max(&p2) }
    }

    /// Creates a degenerate bounding box that contains a single point.
    ///
    /// * `p` - The point.
    pub fn from_point(p: Point3<T>) -> Self {
        Self { p_min: p, p_max: p }
    }

    /// Returns one of the 8 corners. Bit 0 of `corner` selects x, bit 1
    /// selects y and bit 2 selects z (0 = minimum, 1 = maximum).
    ///
    /// * `corner` - Corner index in [0, 7].
    pub fn corner(&self, corner: usize) -> Point3<T> {
        debug_assert!(corner < 8);
        Point3::new(
            if corner & 1 == 0 { self.p_min.x } else { self.p_max.x },
            if corner & 2 == 0 { self.p_min.y } else { self.p_max.y },
            if corner & 4 == 0 { self.p_min.z } else { self.p_max.z },
        )
    }

    /// Returns all 8 corners.
    pub fn corners(&self) -> [Point3<T>; 8] {
        [
            self.corner(0),
            self.corner(1),
            self.corner(2),
            self.corner(3),
            self.corner(4),
            self.corner(5),
            self.corner(6),
            self.corner(7),
        ]
    }

    /// Returns true if a point lies inside the bounding box (boundary included).
    ///
    /// * `p` - The point.
    pub fn inside(&self, p: &Point3<T>) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }

    /// Returns the bounding box that also contains a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3<T>) -> Self {
        Self { p_min: self.p_min.min(p), p_max: self.p_max.max(p) }
    }

    /// Returns the bounding box that contains both bounding boxes.
    ///
    /// * `other` - The other bounding box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }
}

impl Bounds3f {
    /// Returns the center of the bounding box.
    pub fn centroid(&self) -> Point3f {
        0.5 * self.p_min + 0.5 * self.p_max
    }
}

impl<T: fmt::Display> fmt::Display for Bounds3<T> {
    /// Formats the value using the given formatter.
    ///
    /// * `f` - Formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ {} - {} ]", self.p_min, self.p_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_orders_corners() {
        let b = Bounds3f::new(Point3f::new(1.0, -1.0, 2.0), Point3f::new(-1.0, 1.0, 0.0));
        assert_eq!(b.p_min, Point3f::new(-1.0, -1.0, 0.0));
        assert_eq!(b.p_max, Point3f::new(1.0, 1.0, 2.0));
        assert_eq!(b.centroid(), Point3f::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn corners_are_min_and_max_at_ends() {
        let b = Bounds3f::new(Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 2.0, 3.0));
        let c = b.corners();
        assert_eq!(c[0], b.p_min);
        assert_eq!(c[7], b.p_max);
        assert_eq!(c[5], Point3f::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn degenerate_box_corners_coincide() {
        let p = Point3f::new(4.0, 5.0, 6.0);
        let b = Bounds3f::from_point(p);
        assert!(b.corners().iter().all(|c| *c == p));
        assert_eq!(b.centroid(), p);
    }

    prop_point3!(point3_f32, f32, -100.0..100.0f32, -100.0..100.0f32, -100.0..100.0f32);

    proptest! {
        #[test]
        fn corners_lie_inside(p1 in point3_f32(), p2 in point3_f32()) {
            let b = Bounds3f::new(p1, p2);
            for c in b.corners().iter() {
                prop_assert!(b.inside(c));
            }
        }

        #[test]
        fn union_contains_both(p1 in point3_f32(), p2 in point3_f32(), p3 in point3_f32()) {
            let b = Bounds3f::new(p1, p2).union_point(&p3);
            prop_assert!(b.inside(&p1) && b.inside(&p2) && b.inside(&p3));
        }
    }
}
