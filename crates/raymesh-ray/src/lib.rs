#![warn(missing_docs)]

//! Ray classification and construction for slope-based ray-mesh
//! intersection.
//!
//! Intersection tests that classify rays by the signs of their direction
//! components (`MMM`, `MPO`, ...) need a handful of precomputed values per
//! ray: reciprocal directions, the six axis-pair slopes and the six
//! intercepts of the ray's 2D projections. This crate produces them, the
//! same way for every entry point.
//!
//! # Architecture
//!
//! - [`ClassifiedRay`] / [`classify`] - the precomputed ray record
//! - [`Classification`] - 6-bit sign code
//! - [`RayFactory`] - origin/direction, origin/destination batches and
//!   pass-through of existing rays
//! - [`clip`] - finite segments for drawing a ray inside a cube
//!
//! # Example
//!
//! ```
//! use raymesh_math::{Point3, Vec3};
//! use raymesh_ray::{clip, RayFactory};
//!
//! let factory = RayFactory::default();
//! let ray = factory
//!     .from_origin_direction(Point3::origin(), Vec3::new(2.0, -2.0, 0.0))
//!     .unwrap();
//! assert_eq!(ray.classification.label(), "PMO");
//!
//! let segment = clip::visualize(&ray, &factory, 100.0).unwrap();
//! assert_eq!(segment.start, Point3::origin());
//! ```

mod classification;
pub mod clip;
pub mod error;
mod factory;
mod ray;
mod settings;

pub use classification::{AxisSign, Classification};
pub use clip::{by_origin_direction, clip_to_bound, Segment};
pub use error::{RayError, Result};
pub use factory::{pair_combinations, RayFactory, RaySource};
pub use ray::{classify, ClassifiedRay};
pub use settings::RaySettings;
