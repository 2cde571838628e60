use anyhow::{bail, Context, Error};
use rand::Rng;
use std::io::Write;
use std::path::Path;

use crate::lad::LeafAngleDistribution;
use crate::leaf_disk::LeafDisk;
use crate::rng::Canonical;
use crate::volume::Volume;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// XML geometry list instancing a unit disk.
    GList,
    /// Wavefront OBJ with one triangle fan of `resolution` rim vertices per disk.
    Obj { resolution: u32 },
}

impl OutputFormat {
    pub fn from_path<P: AsRef<Path>>(path: P, obj_resolution: u32) -> Result<Self, Error> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .unwrap_or("");

        if extension.eq_ignore_ascii_case("glist") {
            Ok(OutputFormat::GList)
        } else if extension.eq_ignore_ascii_case("obj") {
            Ok(OutputFormat::Obj {
                resolution: obj_resolution,
            })
        } else {
            bail!(
                "output file name {:?} must end with either \".glist\" or \".obj\"",
                path
            )
        }
    }
}

/// Streams leaf disks into a file of the given format.
pub struct DiskWriter<W: Write> {
    out: W,
    format: OutputFormat,
    vertex_offset: u64,
}

impl<W: Write> DiskWriter<W> {
    /// Creates the writer and emits the file header.
    pub fn new(mut out: W, format: OutputFormat) -> Result<Self, Error> {
        if format == OutputFormat::GList {
            out.write_all(
                b"<geometrylist enabled=\"true\">\n\
                  <object>\n\
                  <basegeometry>\n\
                  <disk><matid>100</matid></disk>\n\
                  </basegeometry>\n",
            )
            .context("failed to write the geometry list header")?;
        }

        Ok(DiskWriter {
            out,
            format,
            vertex_offset: 0,
        })
    }

    pub fn write(&mut self, disk: &LeafDisk) -> Result<(), Error> {
        let result = match self.format {
            OutputFormat::GList => disk.write_glist_instance(&mut self.out),
            OutputFormat::Obj { resolution } => {
                disk.write_obj(&mut self.out, &mut self.vertex_offset, resolution)
            }
        };
        result.context("failed to write a leaf disk")
    }

    /// Emits the footer and flushes, returning the underlying writer.
    pub fn finish(mut self) -> Result<W, Error> {
        if self.format == OutputFormat::GList {
            self.out
                .write_all(b"</object>\n</geometrylist>\n")
                .context("failed to write the geometry list footer")?;
        }
        self.out.flush().context("failed to flush the output")?;

        Ok(self.out)
    }
}

/// Leaf disks scattered through a volume to a target leaf area index.
#[derive(Clone, Debug)]
pub struct Canopy {
    pub volume: Volume,
    pub lai: f64,
    pub leaf_radius: f64,
    pub distribution: LeafAngleDistribution,
}

impl Canopy {
    pub fn leaf_count(&self) -> usize {
        self.volume.leaf_count(self.lai, self.leaf_radius)
    }

    /// Draws the disks, each from three position draws followed by the normal's draws.
    pub fn disks<'a, R>(&'a self, rng: &'a mut R) -> impl Iterator<Item = LeafDisk> + 'a
    where
        R: Rng + ?Sized,
    {
        (0..self.leaf_count()).map(move |_| {
            let position = self.volume.sample_position(rng.canonical3());
            let normal = self.distribution.sample_normal(rng);
            LeafDisk::new(position, normal, self.leaf_radius)
        })
    }

    /// Writes every disk and returns how many there were.
    pub fn generate<R, W>(&self, rng: &mut R, writer: &mut DiskWriter<W>) -> Result<usize, Error>
    where
        R: Rng + ?Sized,
        W: Write,
    {
        let count = self.leaf_count();
        log::info!(
            "generating {} leaf disks of radius {} with distribution '{}'",
            count,
            self.leaf_radius,
            self.distribution
        );

        for disk in self.disks(rng) {
            writer.write(&disk)?;
        }

        Ok(count)
    }
}
