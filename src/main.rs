use anyhow::{Context, Error};
use clap::Parser;
use leaf_disk_gen::{Config, DiskWriter, LeafRng, Volume};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Scatter leaf disks through a volume")]
struct Options {
    /// Read settings from a TOML file. Options given here override it.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Specify seed. By default, 0.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Specify Leaf Area Index (LAI) with respect to XY. By default, 1.
    #[arg(short, long)]
    lai: Option<f64>,

    /// Specify leaf radius in meters. By default, 0.1.
    #[arg(short, long, value_name = "METERS")]
    radius: Option<f64>,

    /// Specify output filename ending in ".glist" or ".obj". By default, "leaf.glist".
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Specify box corner position. By default, "[0, 0, 0]".
    #[arg(long, value_parser = parse_point, value_name = "[X, Y, Z]",
          conflicts_with_all = ["center", "sphere_radius"])]
    from: Option<[f64; 3]>,

    /// Specify box corner position. By default, "[1, 1, 1]".
    #[arg(long, value_parser = parse_point, value_name = "[X, Y, Z]",
          conflicts_with_all = ["center", "sphere_radius"])]
    to: Option<[f64; 3]>,

    /// Use a sphere volume with this center. By default, "[0, 0, 0]".
    #[arg(long, value_parser = parse_point, value_name = "[X, Y, Z]")]
    center: Option<[f64; 3]>,

    /// Use a sphere volume with this radius. By default, 1.
    #[arg(long, value_name = "METERS")]
    sphere_radius: Option<f64>,

    /// Log debug messages.
    #[arg(short, long)]
    verbose: bool,

    /// Leaf angle distribution, e.g. "Trigonometric Planophile" or "Beckmann 0.2 0.4".
    /// By default, "Uniform".
    #[arg(value_name = "DISTRIBUTION", trailing_var_arg = true, allow_hyphen_values = true)]
    distribution: Vec<String>,
}

impl Options {
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(lai) = self.lai {
            config.lai = lai;
        }
        if let Some(radius) = self.radius {
            config.leaf_radius = radius;
        }
        if let Some(ref output) = self.output {
            config.output = output.clone();
        }
        if !self.distribution.is_empty() {
            config.distribution = self.distribution.join(" ");
        }

        if self.from.is_some() || self.to.is_some() {
            let (from, to) = match config.volume {
                Volume::Box { from, to } => (from, to),
                Volume::Sphere { .. } => ([0.0; 3], [1.0; 3]),
            };
            config.volume = Volume::Box {
                from: self.from.unwrap_or(from),
                to: self.to.unwrap_or(to),
            };
        } else if self.center.is_some() || self.sphere_radius.is_some() {
            let (center, radius) = match config.volume {
                Volume::Sphere { center, radius } => (center, radius),
                Volume::Box { .. } => ([0.0; 3], 1.0),
            };
            config.volume = Volume::Sphere {
                center: self.center.unwrap_or(center),
                radius: self.sphere_radius.unwrap_or(radius),
            };
        }
    }
}

/// Parses a coordinate such as `"[1, 2, 3]"`, `"1,2,3"` or `"1 2 3"`.
fn parse_point(s: &str) -> Result<[f64; 3], String> {
    let usage = || format!("expected a 3-dimensional coordinate such as \"[1, 2, 3]\", got {:?}", s);

    let coords = s
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<f64>().map_err(|_| usage()))
        .collect::<Result<Vec<_>, _>>()?;

    match coords[..] {
        [x, y, z] => Ok([x, y, z]),
        _ => Err(usage()),
    }
}

fn main() -> Result<(), Error> {
    let options = Options::parse();

    SimpleLogger::new()
        .with_level(if options.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init()
        .context("failed to init logging")?;

    let mut config = match options.config {
        Some(ref path) => {
            Config::load(path).with_context(|| format!("failed to load {:?}", path))?
        }
        None => Config::default(),
    };
    options.apply(&mut config);

    let canopy = config.canopy()?;
    let format = config.output_format()?;

    let file = File::create(&config.output)
        .with_context(|| format!("can't open {:?}", config.output))?;
    let mut writer = DiskWriter::new(BufWriter::new(file), format)?;
    let mut rng = LeafRng::seed(config.seed);

    let start = std::time::Instant::now();
    let count = canopy.generate(&mut rng, &mut writer)?;
    writer.finish()?;
    let end = std::time::Instant::now();

    log::info!(
        "wrote {} leaf disks to {:?} in {:.02} seconds",
        count,
        config.output,
        end.duration_since(start).as_secs_f64()
    );

    Ok(())
}
