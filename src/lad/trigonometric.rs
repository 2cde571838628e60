use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use super::LeafAngleError;

/// The classic de Wit leaf inclination distributions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trigonometric {
    /// Mostly horizontal leaves.
    Planophile,
    /// Mostly vertical leaves.
    Erectophile,
    /// Mostly oblique leaves, around 45 degrees.
    Plagiophile,
    /// Mostly horizontal or vertical, few oblique leaves.
    Extremophile,
    /// Leaf normals distributed as on the surface of a sphere.
    Spherical,
}

impl Trigonometric {
    pub const ALL: [Trigonometric; 5] = [
        Trigonometric::Planophile,
        Trigonometric::Erectophile,
        Trigonometric::Plagiophile,
        Trigonometric::Extremophile,
        Trigonometric::Spherical,
    ];

    /// Fraction of leaves with a zenith angle below `theta`.
    pub fn cdf(self, theta: f64) -> f64 {
        match self {
            Trigonometric::Planophile => (theta + (2.0 * theta).sin() / 2.0) / FRAC_PI_2,
            Trigonometric::Erectophile => (theta - (2.0 * theta).sin() / 2.0) / FRAC_PI_2,
            Trigonometric::Plagiophile => (theta - (4.0 * theta).sin() / 4.0) / FRAC_PI_2,
            Trigonometric::Extremophile => (theta + (4.0 * theta).sin() / 4.0) / FRAC_PI_2,
            Trigonometric::Spherical => 1.0 - theta.cos(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Trigonometric::Planophile => "Planophile",
            Trigonometric::Erectophile => "Erectophile",
            Trigonometric::Plagiophile => "Plagiophile",
            Trigonometric::Extremophile => "Extremophile",
            Trigonometric::Spherical => "Spherical",
        }
    }
}

impl fmt::Display for Trigonometric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Trigonometric {
    type Err = LeafAngleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Trigonometric::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or(LeafAngleError::TrigonometricUsage)
    }
}

#[cfg(test)]
mod test {
    use super::Trigonometric;
    use crate::lad::LeafAngleError;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn cdf_endpoints() {
        for &kind in &Trigonometric::ALL {
            assert_abs_diff_eq!(kind.cdf(0.0), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(kind.cdf(FRAC_PI_2), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn cdf_is_monotone() {
        for &kind in &Trigonometric::ALL {
            let mut previous = kind.cdf(0.0);
            for k in 1..=1000 {
                let value = kind.cdf(k as f64 / 1000.0 * FRAC_PI_2);
                assert!(value >= previous - 1e-15, "{} at step {}", kind, k);
                previous = value;
            }
        }
    }

    #[test]
    fn planophile_prefers_horizontal_leaves() {
        // Horizontal leaves have normals near the zenith.
        assert!(Trigonometric::Planophile.cdf(FRAC_PI_4) > 0.5);
        assert!(Trigonometric::Erectophile.cdf(FRAC_PI_4) < 0.5);
        assert_abs_diff_eq!(Trigonometric::Plagiophile.cdf(FRAC_PI_4), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Trigonometric::Extremophile.cdf(FRAC_PI_4), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!("planophile".parse(), Ok(Trigonometric::Planophile));
        assert_eq!("SPHERICAL".parse(), Ok(Trigonometric::Spherical));
        assert_eq!("eXtReMoPhIlE".parse(), Ok(Trigonometric::Extremophile));
        assert_eq!(
            "Ellipsoidal".parse::<Trigonometric>(),
            Err(LeafAngleError::TrigonometricUsage)
        );
    }
}
