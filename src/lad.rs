//! Leaf angle distributions: laws over the orientation of a leaf's surface normal.
//!
//! The isotropic laws only prescribe the zenith angle through a leaf inclination distribution
//! function (LIDF) and are sampled by inverting a table of it, with a uniform azimuth. The
//! microfacet laws perturb the normal directly in slope space.

use nalgebra::Vector3;
use rand::Rng;
use rand_distr::Distribution;
use std::fmt;
use std::str::FromStr;

use crate::distributions::UniformHemisphere;
use crate::rng::Canonical;

mod error;
mod microfacet;
mod tabulated;
mod trigonometric;
mod verhoef;

pub use self::error::LeafAngleError;
pub use self::microfacet::{Beckmann, TrowbridgeReitz};
pub use self::tabulated::TabulatedLidf;
pub use self::trigonometric::Trigonometric;
pub use self::verhoef::VerhoefBimodal;

#[derive(Clone, Debug, PartialEq)]
pub enum LeafAngleDistribution {
    /// Normals uniform over the upper hemisphere.
    Uniform,
    Trigonometric {
        kind: Trigonometric,
        lidf: TabulatedLidf,
    },
    VerhoefBimodal {
        params: VerhoefBimodal,
        lidf: TabulatedLidf,
    },
    TrowbridgeReitz(TrowbridgeReitz),
    Beckmann(Beckmann),
}

impl LeafAngleDistribution {
    pub fn trigonometric(kind: Trigonometric) -> Result<Self, LeafAngleError> {
        let lidf = TabulatedLidf::build(TabulatedLidf::DEFAULT_RESOLUTION, |theta| kind.cdf(theta))?;
        Ok(LeafAngleDistribution::Trigonometric { kind, lidf })
    }

    pub fn verhoef_bimodal(a: f64, b: f64) -> Result<Self, LeafAngleError> {
        let params = VerhoefBimodal::new(a, b)?;
        let lidf = TabulatedLidf::try_build(TabulatedLidf::DEFAULT_RESOLUTION, |theta| {
            params.cdf(theta)
        })?;
        Ok(LeafAngleDistribution::VerhoefBimodal { params, lidf })
    }

    pub fn trowbridge_reitz(alpha_x: f64, alpha_y: f64) -> Result<Self, LeafAngleError> {
        TrowbridgeReitz::new(alpha_x, alpha_y).map(LeafAngleDistribution::TrowbridgeReitz)
    }

    pub fn beckmann(alpha_x: f64, alpha_y: f64) -> Result<Self, LeafAngleError> {
        Beckmann::new(alpha_x, alpha_y).map(LeafAngleDistribution::Beckmann)
    }

    /// Parses whitespace separated arguments, e.g. `"VerhoefBimodal 0.5 -0.2"`.
    ///
    /// Names are case-insensitive:
    ///
    /// * `Uniform`
    /// * `Trigonometric TYPE`, TYPE one of `Planophile`, `Erectophile`, `Plagiophile`,
    ///   `Extremophile`, `Spherical`
    /// * `VerhoefBimodal A B` with `|A| + |B| <= 1`
    /// * `TrowbridgeReitz ALPHAX ALPHAY` or `Beckmann ALPHAX ALPHAY` with positive alphas
    pub fn parse(args: &str) -> Result<Self, LeafAngleError> {
        let mut tokens = args.split_whitespace();
        let name = tokens.next().unwrap_or("");

        let distribution = if name.eq_ignore_ascii_case("Uniform") {
            expect_end(&mut tokens, LeafAngleError::UniformUsage)?;
            LeafAngleDistribution::Uniform
        } else if name.eq_ignore_ascii_case("Trigonometric") {
            let kind = tokens
                .next()
                .ok_or(LeafAngleError::TrigonometricUsage)?
                .parse::<Trigonometric>()?;
            expect_end(&mut tokens, LeafAngleError::TrigonometricUsage)?;
            Self::trigonometric(kind)?
        } else if name.eq_ignore_ascii_case("VerhoefBimodal") {
            let usage = LeafAngleError::VerhoefBimodalUsage;
            let (a, b) = parse_pair(&mut tokens, &usage)?;
            expect_end(&mut tokens, usage)?;
            Self::verhoef_bimodal(a, b)?
        } else if name.eq_ignore_ascii_case(TrowbridgeReitz::NAME) {
            let usage = LeafAngleError::MicrofacetUsage(TrowbridgeReitz::NAME);
            let (alpha_x, alpha_y) = parse_pair(&mut tokens, &usage)?;
            expect_end(&mut tokens, usage)?;
            Self::trowbridge_reitz(alpha_x, alpha_y)?
        } else if name.eq_ignore_ascii_case(Beckmann::NAME) {
            let usage = LeafAngleError::MicrofacetUsage(Beckmann::NAME);
            let (alpha_x, alpha_y) = parse_pair(&mut tokens, &usage)?;
            expect_end(&mut tokens, usage)?;
            Self::beckmann(alpha_x, alpha_y)?
        } else {
            return Err(LeafAngleError::UnknownName(name.to_owned()));
        };

        Ok(distribution)
    }

    /// The inverse-CDF table of the isotropic tabulated laws.
    pub fn lidf_table(&self) -> Option<&[f64]> {
        match self {
            LeafAngleDistribution::Trigonometric { lidf, .. }
            | LeafAngleDistribution::VerhoefBimodal { lidf, .. } => Some(lidf.table()),
            _ => None,
        }
    }

    /// Draws a unit normal.
    ///
    /// Every law consumes exactly two uniform draws.
    pub fn sample_normal<R>(&self, rng: &mut R) -> Vector3<f64>
    where
        R: Rng + ?Sized,
    {
        match self {
            LeafAngleDistribution::Uniform => UniformHemisphere.sample(rng),
            LeafAngleDistribution::Trigonometric { lidf, .. }
            | LeafAngleDistribution::VerhoefBimodal { lidf, .. } => lidf.sample(rng.canonical2()),
            LeafAngleDistribution::TrowbridgeReitz(tr) => tr.sample_normal(rng),
            LeafAngleDistribution::Beckmann(beckmann) => beckmann.sample_normal(rng),
        }
    }
}

fn parse_pair<'a, I>(tokens: &mut I, usage: &LeafAngleError) -> Result<(f64, f64), LeafAngleError>
where
    I: Iterator<Item = &'a str>,
{
    let mut next = || {
        tokens
            .next()
            .and_then(|token| token.parse::<f64>().ok())
            .ok_or_else(|| usage.clone())
    };
    let first = next()?;
    let second = next()?;
    Ok((first, second))
}

fn expect_end<'a, I>(tokens: &mut I, usage: LeafAngleError) -> Result<(), LeafAngleError>
where
    I: Iterator<Item = &'a str>,
{
    match tokens.next() {
        Some(_) => Err(usage),
        None => Ok(()),
    }
}

impl Distribution<Vector3<f64>> for LeafAngleDistribution {
    fn sample<R>(&self, rng: &mut R) -> Vector3<f64>
    where
        R: Rng + ?Sized,
    {
        self.sample_normal(rng)
    }
}

impl FromStr for LeafAngleDistribution {
    type Err = LeafAngleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Prints the arguments that parse back into this distribution.
impl fmt::Display for LeafAngleDistribution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeafAngleDistribution::Uniform => write!(f, "Uniform"),
            LeafAngleDistribution::Trigonometric { kind, .. } => {
                write!(f, "Trigonometric {}", kind)
            }
            LeafAngleDistribution::VerhoefBimodal { params, .. } => {
                write!(f, "VerhoefBimodal {} {}", params.a(), params.b())
            }
            LeafAngleDistribution::TrowbridgeReitz(tr) => {
                let (alpha_x, alpha_y) = tr.alphas();
                write!(f, "{} {} {}", TrowbridgeReitz::NAME, alpha_x, alpha_y)
            }
            LeafAngleDistribution::Beckmann(beckmann) => {
                let (alpha_x, alpha_y) = beckmann.alphas();
                write!(f, "{} {} {}", Beckmann::NAME, alpha_x, alpha_y)
            }
        }
    }
}
