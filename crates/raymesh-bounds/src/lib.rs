#![warn(missing_docs)]

//! Bounding volumes for meshes fed to a ray-mesh intersection test.
//!
//! - [`Aabb3`] - axis-aligned box with broadphase helpers
//! - [`compute`] - exact box around a point set
//! - [`Mesh`] - triangulated mesh with a JSON attribute bag that carries
//!   the derived `boundingBox`

pub mod bbox;
pub mod mesh;

pub use bbox::{compute, Aabb3};
pub use mesh::{attach_bounding_box, Mesh, BOUNDING_BOX_KEY};
