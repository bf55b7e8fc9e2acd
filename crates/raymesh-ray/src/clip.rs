//! Clipping rays to a finite segment for visualization.
//!
//! A ray is drawn from its origin to the point where it leaves the cube
//! `[-bound, bound]^3`. The parametric distance is floored so the end point
//! stays inside the render volume.

use raymesh_math::{MathError, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{RayError, Result};
use crate::factory::{RayFactory, RaySource};
use crate::ray::ClassifiedRay;
use crate::settings::RaySettings;

/// A finite line segment, as plain endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point (the ray origin).
    pub start: Point3,
    /// End point inside the bounding cube.
    pub end: Point3,
}

/// Signed distance along `velocity` from `start` to the cube face it is
/// moving toward. Zero velocity never reaches a face.
#[inline]
fn runway(start: f64, velocity: f64, bound: f64) -> f64 {
    if velocity == 0.0 {
        return f64::INFINITY;
    }
    let space = if velocity > 0.0 {
        bound - start
    } else {
        -bound - start
    };
    space / velocity
}

/// Per-axis runways of a ray inside `[-bound, bound]^3`.
pub fn runways(origin: &Point3, direction: &Vec3, bound: f64) -> [f64; 3] {
    [
        runway(origin.x, direction.x, bound),
        runway(origin.y, direction.y, bound),
        runway(origin.z, direction.z, bound),
    ]
}

/// End point of the visualization segment for a ray.
///
/// `direction` is used as given, so pass a normalized one. The binding
/// runway is the smallest of the three, floored to an integer. NaN runways
/// are ignored.
///
/// Fails with [`RayError::InvalidBound`] unless `bound` is positive and
/// finite, and with [`RayError::Degenerate`] if no axis constrains the ray
/// (zero direction). A ray leaving the cube away from it can yield a
/// negative runway, including negative infinity for tiny components; that
/// is returned as computed.
pub fn clip_to_bound(origin: &Point3, direction: &Vec3, bound: f64) -> Result<Point3> {
    if !(bound.is_finite() && bound > 0.0) {
        return Err(RayError::InvalidBound(bound));
    }

    let min_runway = runways(origin, direction, bound)
        .into_iter()
        .fold(f64::INFINITY, f64::min);
    if min_runway == f64::INFINITY {
        return Err(MathError::DegenerateVector {
            magnitude: direction.norm(),
        }
        .into());
    }

    let distance = min_runway.floor();
    Ok(Point3::new(
        origin.x + distance * direction.x,
        origin.y + distance * direction.y,
        origin.z + distance * direction.z,
    ))
}

/// Visualization segment for a ray or an origin/direction pair.
pub fn visualize<R: RaySource + ?Sized>(
    source: &R,
    factory: &RayFactory,
    bound: f64,
) -> Result<Segment> {
    let ray = source.to_classified_ray(factory)?;
    segment_for(&ray, bound)
}

fn segment_for(ray: &ClassifiedRay, bound: f64) -> Result<Segment> {
    let end = clip_to_bound(&ray.origin, &ray.direction, bound)?;
    Ok(Segment {
        start: ray.origin,
        end,
    })
}

/// Build a ray from an origin and raw direction together with its
/// visualization segment clipped to `settings.bound`.
pub fn by_origin_direction(
    origin: Point3,
    direction: Vec3,
    settings: &RaySettings,
) -> Result<(ClassifiedRay, Segment)> {
    settings.validate()?;
    let ray = RayFactory::from(settings).from_origin_direction(origin, direction)?;
    let segment = segment_for(&ray, settings.bound)?;
    Ok((ray, segment))
}
