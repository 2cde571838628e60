use thiserror::Error;

/// Construction-time failures of a leaf angle distribution.
///
/// Sampling itself never fails; everything that can go wrong is caught while parsing the
/// arguments or building the inverse-CDF table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeafAngleError {
    #[error("unknown leaf angle distribution name {0:?}")]
    UnknownName(String),

    #[error("format is 'Uniform' with no arguments")]
    UniformUsage,

    #[error(
        "format is 'Trigonometric TYPE' where TYPE is 'Planophile', 'Erectophile', \
         'Plagiophile', 'Extremophile', or 'Spherical'"
    )]
    TrigonometricUsage,

    #[error(
        "format is 'VerhoefBimodal A B' where A and B are floating point numbers satisfying \
         |A| + |B| <= 1"
    )]
    VerhoefBimodalUsage,

    #[error(
        "format is '{0} ALPHAX ALPHAY' where ALPHAX and ALPHAY are positive floating point numbers"
    )]
    MicrofacetUsage(&'static str),

    #[error("an inverse-CDF table needs more than 2 entries, got {0}")]
    TableResolution(usize),

    #[error("leaf inclination distribution function evaluated to {value} at theta = {theta}")]
    NonFiniteLidf { theta: f64, value: f64 },

    #[error(
        "bimodal leaf inclination distribution function did not converge at theta = {theta} \
         after {iterations} iterations"
    )]
    NonConvergence { theta: f64, iterations: usize },
}
