//! Ray construction entry points.
//!
//! Every way of obtaining a [`ClassifiedRay`] goes through [`classify`]
//! after the same normalization, so rays built from an origin/direction,
//! from an origin/destination pair or handed over pre-classified are
//! interchangeable.

use rayon::prelude::*;
use raymesh_math::{normalize, subtract, Point3, Tolerance, Vec3};

use crate::error::{RayError, Result};
use crate::ray::{classify, ClassifiedRay};
use crate::settings::RaySettings;

/// Builds classified rays with a fixed degeneracy tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RayFactory {
    /// Tolerance applied when normalizing directions.
    pub tolerance: Tolerance,
}

impl RayFactory {
    /// Create a factory with the given tolerance.
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    /// Build a ray from an origin and a direction of any non-zero length.
    pub fn from_origin_direction(&self, origin: Point3, direction: Vec3) -> Result<ClassifiedRay> {
        let direction = normalize(&direction, &self.tolerance)?;
        Ok(classify(origin, direction))
    }

    /// Build one ray per origin/destination pair, pointing from origin to
    /// destination.
    ///
    /// Fails as a whole if the slices differ in length or any pair is
    /// degenerate; the reported pair is the lowest-index one. On success
    /// `rays[i]` belongs to `origins[i]`.
    pub fn from_origin_destination_batch(
        &self,
        origins: &[Point3],
        destinations: &[Point3],
    ) -> Result<Vec<ClassifiedRay>> {
        if origins.len() != destinations.len() {
            return Err(RayError::LengthMismatch {
                origins: origins.len(),
                destinations: destinations.len(),
            });
        }
        log::debug!("building {} rays from origin/destination pairs", origins.len());

        let rays: Vec<Result<ClassifiedRay>> = origins
            .par_iter()
            .zip(destinations.par_iter())
            .enumerate()
            .map(|(index, (origin, destination))| {
                let direction = normalize(&subtract(destination, origin), &self.tolerance)
                    .map_err(|source| RayError::DegenerateInBatch { index, source })?;
                Ok(classify(*origin, direction))
            })
            .collect();

        rays.into_iter().collect()
    }

    /// Pass an already classified ray through unchanged.
    pub fn from_existing_ray(&self, ray: &ClassifiedRay) -> ClassifiedRay {
        *ray
    }
}

impl From<&RaySettings> for RayFactory {
    fn from(settings: &RaySettings) -> Self {
        Self::new(settings.tolerance())
    }
}

/// Anything that can be turned into a [`ClassifiedRay`] by a factory.
pub trait RaySource {
    /// Produce the classified ray.
    fn to_classified_ray(&self, factory: &RayFactory) -> Result<ClassifiedRay>;
}

impl RaySource for ClassifiedRay {
    fn to_classified_ray(&self, factory: &RayFactory) -> Result<ClassifiedRay> {
        Ok(factory.from_existing_ray(self))
    }
}

impl RaySource for (Point3, Vec3) {
    fn to_classified_ray(&self, factory: &RayFactory) -> Result<ClassifiedRay> {
        factory.from_origin_direction(self.0, self.1)
    }
}

/// All pairwise combinations of `a` and `b`, `a`-major.
///
/// Returns two index-aligned lists of length `a.len() * b.len()`, ready to
/// feed [`RayFactory::from_origin_destination_batch`].
pub fn pair_combinations<A: Clone, B: Clone>(a: &[A], b: &[B]) -> (Vec<A>, Vec<B>) {
    let mut all_a = Vec::with_capacity(a.len() * b.len());
    let mut all_b = Vec::with_capacity(a.len() * b.len());
    for item in a {
        all_a.extend(std::iter::repeat(item.clone()).take(b.len()));
        all_b.extend_from_slice(b);
    }
    (all_a, all_b)
}
