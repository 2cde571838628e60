//! Leaf normals drawn in slope space, borrowing the anisotropic microfacet distributions used in
//! reflectance models.
//!
//! Both samplers return the perturbed normal in their own local frame, where `(0, 0, 1)` is the
//! unperturbed leaf normal. No macro-normal is composed in.

use nalgebra::{Vector2, Vector3};
use rand::Rng;
use std::f64::consts::PI;

use super::LeafAngleError;
use crate::rng::Canonical;

/// Keeps the Trowbridge-Reitz slope finite, which diverges as `u` approaches 0 or 1.
const SLOPE_SAMPLE_EPSILON: f64 = 1e-12;

fn check_alphas(name: &'static str, alpha_x: f64, alpha_y: f64) -> Result<(), LeafAngleError> {
    // Also rejects NaN.
    if alpha_x > 0.0 && alpha_y > 0.0 && alpha_x.is_finite() && alpha_y.is_finite() {
        Ok(())
    } else {
        Err(LeafAngleError::MicrofacetUsage(name))
    }
}

/// Rescales by the largest component first so that huge slopes do not overflow the norm.
fn slope_to_normal(alpha_x: f64, alpha_y: f64, m: Vector2<f64>) -> Vector3<f64> {
    let v = Vector3::new(-alpha_x * m.x, -alpha_y * m.y, 1.0);
    let scale = v.amax();
    let v = if scale.is_finite() {
        v / scale
    } else {
        v.map(|x| if x.is_infinite() { x.signum() } else { 0.0 })
    };

    v.try_normalize(0.0).unwrap_or_else(Vector3::z)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrowbridgeReitz {
    alpha_x: f64,
    alpha_y: f64,
}

impl TrowbridgeReitz {
    pub const NAME: &'static str = "TrowbridgeReitz";

    pub fn new(alpha_x: f64, alpha_y: f64) -> Result<Self, LeafAngleError> {
        check_alphas(Self::NAME, alpha_x, alpha_y)?;
        Ok(TrowbridgeReitz { alpha_x, alpha_y })
    }

    pub fn alphas(&self) -> (f64, f64) {
        (self.alpha_x, self.alpha_y)
    }

    /// Inverts the marginal slope distribution independently for each axis.
    ///
    /// Inputs are clamped to `[eps, 1 - eps]`, where the slope stays finite. At `u = 0.5` the
    /// slope is exactly zero.
    pub fn sample_slope(u: f64) -> f64 {
        let u = u.max(SLOPE_SAMPLE_EPSILON).min(1.0 - SLOPE_SAMPLE_EPSILON);
        let m = (-1.0 - 1.0 / (4.0 * u * (u - 1.0))).max(0.0).sqrt();
        m.copysign(u - 0.5)
    }

    pub fn sample(&self, u: Vector2<f64>) -> Vector3<f64> {
        let m = u.map(Self::sample_slope);
        slope_to_normal(self.alpha_x, self.alpha_y, m)
    }

    pub fn sample_normal<R>(&self, rng: &mut R) -> Vector3<f64>
    where
        R: Rng + ?Sized,
    {
        self.sample(rng.canonical2())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Beckmann {
    alpha_x: f64,
    alpha_y: f64,
}

impl Beckmann {
    pub const NAME: &'static str = "Beckmann";

    pub fn new(alpha_x: f64, alpha_y: f64) -> Result<Self, LeafAngleError> {
        check_alphas(Self::NAME, alpha_x, alpha_y)?;
        Ok(Beckmann { alpha_x, alpha_y })
    }

    pub fn alphas(&self) -> (f64, f64) {
        (self.alpha_x, self.alpha_y)
    }

    /// Standard normal slopes by the Box-Muller transform of `u`.
    pub fn sample(&self, u: Vector2<f64>) -> Vector3<f64> {
        let r = (-2.0 * (1.0 - u.x).ln()).sqrt();
        let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();
        let m = Vector2::new(r * cos_phi, r * sin_phi);
        slope_to_normal(self.alpha_x, self.alpha_y, m)
    }

    pub fn sample_normal<R>(&self, rng: &mut R) -> Vector3<f64>
    where
        R: Rng + ?Sized,
    {
        self.sample(rng.canonical2())
    }
}

#[cfg(test)]
mod test {
    use super::{Beckmann, TrowbridgeReitz};
    use crate::lad::LeafAngleError;
    use crate::rng::LeafRng;
    use approx::assert_abs_diff_eq;
    use nalgebra::{Vector2, Vector3};
    use proptest::prelude::*;

    #[test]
    fn alphas_must_be_positive() {
        assert_eq!(
            TrowbridgeReitz::new(0.0, 1.0),
            Err(LeafAngleError::MicrofacetUsage("TrowbridgeReitz"))
        );
        assert_eq!(
            Beckmann::new(1.0, -1.0),
            Err(LeafAngleError::MicrofacetUsage("Beckmann"))
        );
        assert!(Beckmann::new(f64::NAN, 1.0).is_err());
        assert!(TrowbridgeReitz::new(0.2, 0.7).is_ok());
    }

    #[test]
    fn slope_is_zero_at_the_median() {
        assert_eq!(TrowbridgeReitz::sample_slope(0.5), 0.0);
        let n = TrowbridgeReitz::new(0.5, 0.5)
            .unwrap()
            .sample(Vector2::new(0.5, 0.5));
        assert_abs_diff_eq!(n, Vector3::z());
    }

    #[test]
    fn slope_is_odd_about_the_median() {
        for &u in &[0.1, 0.25, 0.4, 0.49] {
            assert_abs_diff_eq!(
                TrowbridgeReitz::sample_slope(u),
                -TrowbridgeReitz::sample_slope(1.0 - u),
                epsilon = 1e-9
            );
            assert!(TrowbridgeReitz::sample_slope(u) < 0.0);
        }
    }

    #[test]
    fn slope_boundaries_are_finite() {
        for &u in &[0.0, 1e-300, 1.0 - f64::EPSILON, 1.0] {
            assert!(TrowbridgeReitz::sample_slope(u).is_finite(), "u = {}", u);
        }
        let n = TrowbridgeReitz::new(1.0, 1.0)
            .unwrap()
            .sample(Vector2::new(0.0, 0.0));
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn slope_quartiles() {
        // The marginal slope law for alpha = 1 has CDF 1/2 + m / (2 sqrt(1 + m^2)).
        let m = TrowbridgeReitz::sample_slope(0.75);
        assert_abs_diff_eq!(0.5 + m / (2.0 * (1.0 + m * m).sqrt()), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn near_zero_roughness_stays_flat() {
        let mut rng = LeafRng::seed(1);
        let tr = TrowbridgeReitz::new(1e-6, 1e-6).unwrap();
        let beckmann = Beckmann::new(1e-6, 1e-6).unwrap();

        for _ in 0..10_000 {
            let max_cos = (1e-2f64).cos();
            assert!(tr.sample_normal(&mut rng).z > max_cos);
            assert!(beckmann.sample_normal(&mut rng).z > max_cos);
        }
    }

    #[test]
    fn anisotropy_stretches_along_x() {
        let mut rng = LeafRng::seed(2);
        let beckmann = Beckmann::new(0.8, 0.05).unwrap();
        let (mut sx, mut sy) = (0.0, 0.0);
        for _ in 0..5_000 {
            let n = beckmann.sample_normal(&mut rng);
            sx += n.x.abs();
            sy += n.y.abs();
        }
        assert!(sx > 5.0 * sy);
    }

    #[test]
    fn beckmann_slopes_are_standard_normal() {
        let beckmann = Beckmann::new(1.0, 1.0).unwrap();
        assert_abs_diff_eq!(beckmann.sample(Vector2::new(0.0, 0.3)), Vector3::z());

        // u0 = 1 - exp(-1/2) puts the slope on the unit circle.
        let n = beckmann.sample(Vector2::new(1.0 - (-0.5f64).exp(), 0.0));
        assert_abs_diff_eq!(n, Vector3::new(-1.0, 0.0, 1.0).normalize(), epsilon = 1e-12);
    }

    #[test]
    fn huge_roughness_still_gives_unit_normals() {
        let mut rng = LeafRng::seed(3);
        let tr = TrowbridgeReitz::new(1e200, 1e200).unwrap();
        let beckmann = Beckmann::new(1e200, 1e200).unwrap();
        let widest = Beckmann::new(f64::MAX, f64::MAX).unwrap();

        for _ in 0..1_000 {
            for n in &[
                tr.sample_normal(&mut rng),
                beckmann.sample_normal(&mut rng),
                widest.sample_normal(&mut rng),
            ] {
                assert_abs_diff_eq!(n.norm(), 1.0, epsilon = 1e-12);
            }
        }
        let n = widest.sample(Vector2::new(1.0 - (-0.5f64).exp(), 0.125));
        assert_abs_diff_eq!(n, Vector3::new(-1.0, -1.0, 0.0).normalize(), epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn beckmann_normals_are_unit_and_up(
            u0 in 0.0..1.0f64,
            u1 in 0.0..1.0f64,
            ax in 1e-3..10.0f64,
            ay in 1e-3..10.0f64,
        ) {
            let n = Beckmann::new(ax, ay).unwrap().sample(Vector2::new(u0, u1));
            prop_assert!((n.norm() - 1.0).abs() < 1e-12);
            prop_assert!(n.z > 0.0);
        }

        #[test]
        fn trowbridge_reitz_normals_are_unit_and_up(
            u0 in 0.0..1.0f64,
            u1 in 0.0..1.0f64,
            ax in 1e-3..10.0f64,
            ay in 1e-3..10.0f64,
        ) {
            let n = TrowbridgeReitz::new(ax, ay).unwrap().sample(Vector2::new(u0, u1));
            prop_assert!((n.norm() - 1.0).abs() < 1e-12);
            prop_assert!(n.z > 0.0);
        }
    }
}
