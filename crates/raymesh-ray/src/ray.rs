//! Classified ray representation.

use raymesh_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::classification::Classification;

/// A ray with everything a slope-based intersection test precomputes.
///
/// Built by [`classify`] from an origin and a unit direction. The fields
/// are public for the intersection routine to read but are only
/// meaningful as a set; construct through [`classify`] or
/// [`RayFactory`](crate::RayFactory).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RayRecord", into = "RayRecord")]
pub struct ClassifiedRay {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Direction of the ray. Unit length when built by the factory.
    pub direction: Vec3,
    /// Component-wise reciprocal of `direction`, with `0` for zero components.
    pub inv_direction: Vec3,
    /// `direction.x / direction.y`.
    pub ibyj: f64,
    /// `direction.y / direction.x`.
    pub jbyi: f64,
    /// `direction.y / direction.z`.
    pub jbyk: f64,
    /// `direction.z / direction.y`.
    pub kbyj: f64,
    /// `direction.x / direction.z`.
    pub ibyk: f64,
    /// `direction.z / direction.x`.
    pub kbyi: f64,
    /// `origin.y - jbyi * origin.x`.
    pub cxy: f64,
    /// `origin.z - kbyi * origin.x`.
    pub cxz: f64,
    /// `origin.x - ibyj * origin.y`.
    pub cyx: f64,
    /// `origin.z - kbyj * origin.y`.
    pub cyz: f64,
    /// `origin.x - ibyk * origin.z`.
    pub czx: f64,
    /// `origin.y - jbyk * origin.z`.
    pub czy: f64,
    /// Sign classification of `direction`.
    pub classification: Classification,
}

/// Reciprocal that maps zero to zero instead of infinity.
#[inline]
fn reciprocal(c: f64) -> f64 {
    if c == 0.0 {
        0.0
    } else {
        1.0 / c
    }
}

/// Classify a ray.
///
/// `direction` must already be unit length; it is not checked or
/// normalized here. This is total over all floating-point input: NaN
/// components yield NaN coefficients and classify as zero.
pub fn classify(origin: Point3, direction: Vec3) -> ClassifiedRay {
    let (i, j, k) = (direction.x, direction.y, direction.z);
    let (x, y, z) = (origin.x, origin.y, origin.z);

    let inv_direction = Vec3::new(reciprocal(i), reciprocal(j), reciprocal(k));

    // Slopes
    let ibyj = i * inv_direction.y;
    let jbyi = j * inv_direction.x;
    let jbyk = j * inv_direction.z;
    let kbyj = k * inv_direction.y;
    let ibyk = i * inv_direction.z;
    let kbyi = k * inv_direction.x;

    let classification = Classification::from_direction(&direction);
    log::trace!("classified ray {origin:?} -> {direction:?} as {classification}");

    ClassifiedRay {
        origin,
        direction,
        inv_direction,
        ibyj,
        jbyi,
        jbyk,
        kbyj,
        ibyk,
        kbyi,
        cxy: y - jbyi * x,
        cxz: z - kbyi * x,
        cyx: x - ibyj * y,
        cyz: z - kbyj * y,
        czx: x - ibyk * z,
        czy: y - jbyk * z,
        classification,
    }
}

impl ClassifiedRay {
    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction
    }

    /// True if every field has the same bit pattern as `other`.
    ///
    /// Unlike `==`, NaN fields compare equal to themselves.
    pub fn bitwise_eq(&self, other: &ClassifiedRay) -> bool {
        let a = RayRecord::from(*self);
        let b = RayRecord::from(*other);
        a.scalars()
            .iter()
            .zip(b.scalars().iter())
            .all(|(p, q)| p.to_bits() == q.to_bits())
            && a.classification == b.classification
    }
}

/// JSON record read by the intersection block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RayRecord {
    ro: [f64; 3],
    rd: [f64; 3],
    ii: f64,
    ij: f64,
    ik: f64,
    ibyj: f64,
    jbyi: f64,
    jbyk: f64,
    kbyj: f64,
    ibyk: f64,
    kbyi: f64,
    cxy: f64,
    cxz: f64,
    cyx: f64,
    cyz: f64,
    czx: f64,
    czy: f64,
    classification: u8,
}

impl RayRecord {
    fn scalars(&self) -> [f64; 21] {
        [
            self.ro[0], self.ro[1], self.ro[2], self.rd[0], self.rd[1], self.rd[2], self.ii,
            self.ij, self.ik, self.ibyj, self.jbyi, self.jbyk, self.kbyj, self.ibyk, self.kbyi,
            self.cxy, self.cxz, self.cyx, self.cyz, self.czx, self.czy,
        ]
    }
}

impl From<ClassifiedRay> for RayRecord {
    fn from(r: ClassifiedRay) -> Self {
        Self {
            ro: [r.origin.x, r.origin.y, r.origin.z],
            rd: [r.direction.x, r.direction.y, r.direction.z],
            ii: r.inv_direction.x,
            ij: r.inv_direction.y,
            ik: r.inv_direction.z,
            ibyj: r.ibyj,
            jbyi: r.jbyi,
            jbyk: r.jbyk,
            kbyj: r.kbyj,
            ibyk: r.ibyk,
            kbyi: r.kbyi,
            cxy: r.cxy,
            cxz: r.cxz,
            cyx: r.cyx,
            cyz: r.cyz,
            czx: r.czx,
            czy: r.czy,
            classification: r.classification.bits(),
        }
    }
}

impl From<RayRecord> for ClassifiedRay {
    fn from(r: RayRecord) -> Self {
        Self {
            origin: Point3::new(r.ro[0], r.ro[1], r.ro[2]),
            direction: Vec3::new(r.rd[0], r.rd[1], r.rd[2]),
            inv_direction: Vec3::new(r.ii, r.ij, r.ik),
            ibyj: r.ibyj,
            jbyi: r.jbyi,
            jbyk: r.jbyk,
            kbyj: r.kbyj,
            ibyk: r.ibyk,
            kbyi: r.kbyi,
            cxy: r.cxy,
            cxz: r.cxz,
            cyx: r.cyx,
            cyz: r.cyz,
            czx: r.czx,
            czy: r.czy,
            classification: Classification::from_bits(r.classification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_axis_aligned_z() {
        let ray = classify(Point3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(ray.inv_direction, Vec3::new(0.0, 0.0, 1.0));
        // Every slope pairing x or y with anything is zero
        for slope in [ray.ibyj, ray.jbyi, ray.jbyk, ray.kbyj, ray.ibyk, ray.kbyi] {
            assert_eq!(slope, 0.0);
        }
        assert_eq!(ray.classification.bits(), 0b00_00_01);
    }

    #[test]
    fn test_negative_zero_reciprocal() {
        let ray = classify(Point3::origin(), Vec3::new(-0.0, 1.0, 0.0));
        assert_eq!(ray.inv_direction.x, 0.0);
        assert_eq!(ray.classification.label(), "OPO");
    }

    #[test]
    fn test_slopes_and_offsets() {
        let d = Vec3::new(1.0, 2.0, -2.0) / 3.0;
        let o = Point3::new(1.0, -1.0, 4.0);
        let ray = classify(o, d);

        assert_relative_eq!(ray.ibyj, 0.5, epsilon = 1e-12);
        assert_relative_eq!(ray.jbyi, 2.0, epsilon = 1e-12);
        assert_relative_eq!(ray.jbyk, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.kbyj, -1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.ibyk, -0.5, epsilon = 1e-12);
        assert_relative_eq!(ray.kbyi, -2.0, epsilon = 1e-12);

        assert_relative_eq!(ray.cxy, -1.0 - 2.0 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.cxz, 4.0 + 2.0 * 1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.cyx, 1.0 - 0.5 * -1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.cyz, 4.0 + 1.0 * -1.0, epsilon = 1e-12);
        assert_relative_eq!(ray.czx, 1.0 + 0.5 * 4.0, epsilon = 1e-12);
        assert_relative_eq!(ray.czy, -1.0 + 1.0 * 4.0, epsilon = 1e-12);

        assert_eq!(ray.classification.label(), "PPM");
    }

    #[test]
    fn test_offsets_lie_on_projected_lines() {
        // A point further along the ray satisfies each 2D line equation.
        let d = Vec3::new(0.3, -0.4, 0.5).normalize();
        let ray = classify(Point3::new(2.0, 5.0, -1.0), d);
        let p = ray.at(7.5);
        assert_relative_eq!(p.y, ray.jbyi * p.x + ray.cxy, epsilon = 1e-9);
        assert_relative_eq!(p.z, ray.kbyi * p.x + ray.cxz, epsilon = 1e-9);
        assert_relative_eq!(p.x, ray.ibyj * p.y + ray.cyx, epsilon = 1e-9);
        assert_relative_eq!(p.z, ray.kbyj * p.y + ray.cyz, epsilon = 1e-9);
        assert_relative_eq!(p.x, ray.ibyk * p.z + ray.czx, epsilon = 1e-9);
        assert_relative_eq!(p.y, ray.jbyk * p.z + ray.czy, epsilon = 1e-9);
    }

    #[test]
    fn test_classify_deterministic() {
        let o = Point3::new(0.1, 0.2, 0.3);
        let d = Vec3::new(0.6, -0.8, 0.0);
        let a = classify(o, d);
        let b = classify(o, d);
        assert!(a.bitwise_eq(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_classify_nan_direction() {
        let ray = classify(Point3::origin(), Vec3::new(f64::NAN, 1.0, 0.0));
        assert!(ray.inv_direction.x.is_nan());
        assert!(!ray.classification.is_nonzero(0));
        assert!(ray.bitwise_eq(&classify(Point3::origin(), Vec3::new(f64::NAN, 1.0, 0.0))));
    }

    #[test]
    fn test_wire_format() {
        let ray = classify(Point3::new(1.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let value = serde_json::to_value(ray).unwrap();
        assert_eq!(value["ro"], json!([1.0, 0.0, 0.0]));
        assert_eq!(value["rd"], json!([0.0, -1.0, 0.0]));
        assert_eq!(value["ij"], json!(-1.0));
        assert_eq!(value["ii"], json!(0.0));
        assert_eq!(value["classification"], json!(0b00_11_00));

        let back: ClassifiedRay = serde_json::from_value(value).unwrap();
        assert!(back.bitwise_eq(&ray));
    }
}
