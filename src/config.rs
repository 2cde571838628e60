use anyhow::{ensure, Context, Error};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::canopy::{Canopy, OutputFormat};
use crate::lad::LeafAngleDistribution;
use crate::volume::Volume;

/// A canopy generation job, usually read from a TOML file and then overridden from the command
/// line.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub seed: u64,
    /// Leaf area index relative to the volume's XY projection.
    pub lai: f64,
    pub leaf_radius: f64,
    pub output: PathBuf,
    /// Leaf angle distribution arguments, e.g. `"Trigonometric Planophile"`.
    pub distribution: String,
    /// Rim vertices per disk in OBJ output.
    pub obj_resolution: u32,
    pub volume: Volume,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: 0,
            lai: 1.0,
            leaf_radius: 0.1,
            output: PathBuf::from("leaf.glist"),
            distribution: "Uniform".to_owned(),
            obj_resolution: 10,
            volume: Volume::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut file = File::open(path).context("failed to open config file")?;
        let mut contents = vec![];
        file.read_to_end(&mut contents)
            .context("failed to read config file")?;
        let config = toml::from_slice(&contents).context("failed to parse config file")?;

        log::debug!("loaded {:?}", path);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        ensure!(
            self.lai > 0.0 && self.lai.is_finite(),
            "lai must be a positive number, got {}",
            self.lai
        );
        ensure!(
            self.leaf_radius > 0.0 && self.leaf_radius.is_finite(),
            "leaf radius must be a positive number, got {}",
            self.leaf_radius
        );
        self.volume.validate().context("invalid volume")
    }

    pub fn output_format(&self) -> Result<OutputFormat, Error> {
        OutputFormat::from_path(&self.output, self.obj_resolution)
    }

    pub fn canopy(&self) -> Result<Canopy, Error> {
        self.validate()?;
        let distribution = LeafAngleDistribution::parse(&self.distribution)
            .context("invalid leaf angle distribution")?;

        Ok(Canopy {
            volume: self.volume,
            lai: self.lai,
            leaf_radius: self.leaf_radius,
            distribution,
        })
    }
}
