//! Mesh data contract and the `boundingBox` attribute.

use std::collections::BTreeMap;

use raymesh_math::Point3;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bbox::{compute, Aabb3};

/// Attribute key under which the derived bounding box is stored.
pub const BOUNDING_BOX_KEY: &str = "boundingBox";

/// A mesh as handed over by the triangulation step.
///
/// Faces are expected to be triangles by the time a mesh reaches an
/// intersection test; this type does not enforce it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Faces as vertex indices.
    #[serde(default)]
    pub faces: Vec<Vec<u32>>,
    /// Free-form attribute bag shared with downstream consumers.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl Mesh {
    /// Create a mesh with no attributes.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            vertices,
            faces,
            attributes: BTreeMap::new(),
        }
    }

    /// Read the stored `boundingBox` attribute, if present and well formed.
    ///
    /// The stored value is not checked against the current vertices.
    pub fn bounding_box(&self) -> Option<Aabb3> {
        let corners: [[f64; 3]; 2] =
            serde_json::from_value(self.attributes.get(BOUNDING_BOX_KEY)?.clone()).ok()?;
        let [min, max] = corners;
        Some(Aabb3::new(
            Point3::new(min[0], min[1], min[2]),
            Point3::new(max[0], max[1], max[2]),
        ))
    }
}

/// Compute the mesh's bounding box and store it in its attribute bag.
///
/// Writes `[[minx, miny, minz], [maxx, maxy, maxz]]` under
/// [`BOUNDING_BOX_KEY`]. A mesh without vertices gets no entry (any stale
/// one is removed). Returns the computed box.
pub fn attach_bounding_box(mesh: &mut Mesh) -> Option<Aabb3> {
    match compute(&mesh.vertices) {
        Some(aabb) => {
            log::debug!(
                "bounding box over {} vertices: {:?} .. {:?}",
                mesh.vertices.len(),
                aabb.min,
                aabb.max
            );
            mesh.attributes
                .insert(BOUNDING_BOX_KEY.to_string(), serde_json::json!(aabb.corners()));
            Some(aabb)
        }
        None => {
            log::debug!("mesh has no vertices, dropping {BOUNDING_BOX_KEY}");
            mesh.attributes.remove(BOUNDING_BOX_KEY);
            None
        }
    }
}
