//! Inverse-CDF warps from the unit square to directions and disks.

use nalgebra::{Vector2, Vector3};
use rand::Rng;
use rand_distr::Distribution;
use std::f64::consts::PI;

use crate::rng::Canonical;

/// Uniform over the solid angle of the upper hemisphere, so the zenith density is `sin(theta)`.
pub fn uniform_hemisphere(u: Vector2<f64>) -> Vector3<f64> {
    let z = u.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();

    Vector3::new(r * cos_phi, r * sin_phi, z)
}

pub fn uniform_sphere(u: Vector2<f64>) -> Vector3<f64> {
    let z = 1.0 - 2.0 * u.x;
    let r = (1.0 - z * z).max(0.0).sqrt();
    let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();

    Vector3::new(r * cos_phi, r * sin_phi, z)
}

/// Uniform over the area of the unit disk.
pub fn uniform_disk(u: Vector2<f64>) -> Vector2<f64> {
    let r = u.x.sqrt();
    let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();

    Vector2::new(r * cos_phi, r * sin_phi)
}

pub struct UniformHemisphere;

impl Distribution<Vector3<f64>> for UniformHemisphere {
    fn sample<R>(&self, rng: &mut R) -> Vector3<f64>
    where
        R: Rng + ?Sized,
    {
        uniform_hemisphere(rng.canonical2())
    }
}
