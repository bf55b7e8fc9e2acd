//! Axis-aligned bounding box computation.
//!
//! Used as a broadphase filter: a ray that misses a mesh's box never needs
//! per-triangle tests.

use raymesh_math::Point3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// True while no point has been included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Test if a point lies inside or on the boundary.
    pub fn contains_point(&self, p: &Point3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &Aabb3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Corners as plain coordinate arrays, `[min, max]`.
    pub fn corners(&self) -> [[f64; 3]; 2] {
        [
            [self.min.x, self.min.y, self.min.z],
            [self.max.x, self.max.y, self.max.z],
        ]
    }
}

/// Compute the exact AABB enclosing `points`.
///
/// Returns `None` for an empty point set rather than a zero-sized box.
/// NaN coordinates never win a comparison and so never reach a corner.
pub fn compute<'a, I>(points: I) -> Option<Aabb3>
where
    I: IntoIterator<Item = &'a Point3>,
{
    let mut points = points.into_iter().peekable();
    points.peek()?;

    let aabb = points.fold(Aabb3::empty(), |mut aabb, p| {
        aabb.include_point(p);
        aabb
    });
    Some(aabb)
}
