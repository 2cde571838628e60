use nalgebra::{Vector2, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

use super::LeafAngleError;

/// A leaf inclination distribution function tabulated at equally spaced zenith angles over
/// `[0, pi/2]`, sampled by inverting the table.
///
/// The first entry is always exactly 0 and the last exactly 1. The entries in between are the
/// values of the distribution function clamped into `[0, 1]`, and are expected to be
/// non-decreasing.
#[derive(Clone, Debug, PartialEq)]
pub struct TabulatedLidf {
    table: Vec<f64>,
}

impl TabulatedLidf {
    pub const DEFAULT_RESOLUTION: usize = 256;

    pub fn build<F>(n: usize, mut lidf: F) -> Result<Self, LeafAngleError>
    where
        F: FnMut(f64) -> f64,
    {
        Self::try_build(n, |theta| Ok(lidf(theta)))
    }

    pub fn try_build<F>(n: usize, mut lidf: F) -> Result<Self, LeafAngleError>
    where
        F: FnMut(f64) -> Result<f64, LeafAngleError>,
    {
        if n <= 2 {
            return Err(LeafAngleError::TableResolution(n));
        }

        let mut table = vec![0.0; n];
        for k in 1..n - 1 {
            let theta = Self::zenith_at(k as f64, n);
            let value = lidf(theta)?;
            if !value.is_finite() {
                return Err(LeafAngleError::NonFiniteLidf { theta, value });
            }
            // Solver residue can overshoot the pinned ends.
            table[k] = value.max(0.0).min(1.0);
        }
        table[n - 1] = 1.0;

        log::debug!("tabulated leaf inclination distribution with {} entries", n);

        Ok(TabulatedLidf { table })
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }

    /// Maps a fractional table index to the zenith angle it stands for.
    fn zenith_at(index: f64, n: usize) -> f64 {
        index / (n - 1) as f64 * FRAC_PI_2
    }

    /// Inverts the table at `u0`.
    ///
    /// The search finds the first entry not less than `u0`. If that is the first entry the
    /// zenith is 0, if there is none or `u0` reaches the last entry it is `pi/2`, otherwise the fractional index is linearly
    /// interpolated between the entry and its predecessor. The predecessor is strictly less than
    /// `u0` and the entry is at least `u0`, so the interpolation never divides by zero even
    /// across flat runs of the table.
    pub fn sample_zenith(&self, u0: f64) -> f64 {
        let n = self.table.len();
        let k1 = self.table.partition_point(|&value| value < u0);

        if k1 == 0 {
            0.0
        } else if k1 == n || u0 >= self.table[n - 1] {
            FRAC_PI_2
        } else {
            let k0 = k1 - 1;
            let lidf0 = self.table[k0];
            let lidf1 = self.table[k1];
            let fac = (u0 - lidf0) / (lidf1 - lidf0);
            Self::zenith_at((1.0 - fac) * k0 as f64 + fac * k1 as f64, n)
        }
    }

    /// Draws a normal with the tabulated zenith from `u.x` and a uniform azimuth from `u.y`.
    pub fn sample(&self, u: Vector2<f64>) -> Vector3<f64> {
        let (sin_theta, cos_theta) = self.sample_zenith(u.x).sin_cos();
        let (sin_phi, cos_phi) = (2.0 * PI * u.y).sin_cos();

        Vector3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }
}
