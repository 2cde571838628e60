use anyhow::{ensure, Error};
use nalgebra::{Point3, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::distributions::uniform_sphere;

/// The region leaf disk centers are scattered in.
#[derive(Deserialize, Serialize, Debug, Copy, Clone, PartialEq)]
#[serde(untagged)]
pub enum Volume {
    /// Axis-aligned box spanned by two opposite corners, in any order.
    Box { from: [f64; 3], to: [f64; 3] },
    Sphere { center: [f64; 3], radius: f64 },
}

impl Default for Volume {
    fn default() -> Self {
        Volume::Box {
            from: [0.0, 0.0, 0.0],
            to: [1.0, 1.0, 1.0],
        }
    }
}

impl Volume {
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            Volume::Box { from, to } => {
                ensure!(
                    from.iter().chain(&to).all(|x| x.is_finite()),
                    "box corners must be finite, got {:?} and {:?}",
                    from,
                    to
                );
            }
            Volume::Sphere { center, radius } => {
                ensure!(
                    center.iter().all(|x| x.is_finite()),
                    "sphere center must be finite, got {:?}",
                    center
                );
                ensure!(
                    radius > 0.0 && radius.is_finite(),
                    "sphere radius must be a positive number, got {}",
                    radius
                );
            }
        }
        Ok(())
    }

    /// The minimum and maximum corners.
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        match *self {
            Volume::Box { from, to } => {
                let (from, to) = (Vector3::from(from), Vector3::from(to));
                (Point3::from(from.inf(&to)), Point3::from(from.sup(&to)))
            }
            Volume::Sphere { center, radius } => {
                let center = Point3::from(center);
                let extent = Vector3::repeat(radius);
                (center - extent, center + extent)
            }
        }
    }

    /// Area of the projection onto the XY plane, which the leaf area index is relative to.
    pub fn ground_area(&self) -> f64 {
        match *self {
            Volume::Box { .. } => {
                let (min, max) = self.bounds();
                (max.x - min.x) * (max.y - min.y)
            }
            Volume::Sphere { radius, .. } => PI * radius * radius,
        }
    }

    /// Number of disks of radius `leaf_radius` that make up `lai` over the ground area.
    pub fn leaf_count(&self, lai: f64, leaf_radius: f64) -> usize {
        (lai * self.ground_area() / (PI * leaf_radius * leaf_radius)) as usize
    }

    /// Maps a point of the unit cube uniformly into the volume.
    pub fn sample_position(&self, u: Vector3<f64>) -> Point3<f64> {
        match *self {
            Volume::Box { .. } => {
                let (min, max) = self.bounds();
                min + (max - min).component_mul(&u)
            }
            Volume::Sphere { center, radius } => {
                let r = radius * u.x.cbrt();
                Point3::from(center) + r * uniform_sphere(Vector2::new(u.y, u.z))
            }
        }
    }
}
