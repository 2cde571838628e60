use std::f64::consts::FRAC_PI_2;

use super::LeafAngleError;

/// Verhoef's two-parameter bimodal leaf inclination distribution.
///
/// `a` controls the average leaf slope and `b` the bimodality. Together they must satisfy
/// `|a| + |b| <= 1`; `a = b = 0` gives a uniform zenith.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VerhoefBimodal {
    a: f64,
    b: f64,
}

impl VerhoefBimodal {
    const TOLERANCE: f64 = 1e-6;
    const MAX_ITERATIONS: usize = 10_000;

    pub fn new(a: f64, b: f64) -> Result<Self, LeafAngleError> {
        // Also rejects NaN.
        if !(a.abs() + b.abs() <= 1.0) {
            return Err(LeafAngleError::VerhoefBimodalUsage);
        }

        Ok(VerhoefBimodal { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Fraction of leaves with a zenith angle below `theta`.
    ///
    /// The distribution function is only defined implicitly, through `x = y + 2 theta` with
    /// `y = a sin(x) + b sin(2x) / 2`. It is solved by damped fixed-point iteration from
    /// `x = 2 theta`, which contracts for every admissible `(a, b)`.
    pub fn cdf(&self, theta: f64) -> Result<f64, LeafAngleError> {
        let mut x = 2.0 * theta;

        for _ in 0..Self::MAX_ITERATIONS {
            let y = self.a * x.sin() + self.b * (2.0 * x).sin() / 2.0;
            let dx = (y - x + 2.0 * theta) / 2.0;
            if dx.abs() < Self::TOLERANCE {
                return Ok((y + theta) / FRAC_PI_2);
            }
            x += dx;
        }

        Err(LeafAngleError::NonConvergence {
            theta,
            iterations: Self::MAX_ITERATIONS,
        })
    }
}
