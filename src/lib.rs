//! Synthetic vegetation canopies built from flat circular leaf disks.
//!
//! Disk centers are scattered uniformly through a [`Volume`] until a target leaf area index is
//! reached, and each disk's normal is drawn from a [`LeafAngleDistribution`].

pub mod canopy;
pub mod config;
pub mod distributions;
pub mod lad;
pub mod leaf_disk;
pub mod rng;
pub mod volume;

pub use crate::canopy::{Canopy, DiskWriter, OutputFormat};
pub use crate::config::Config;
pub use crate::lad::{LeafAngleDistribution, LeafAngleError};
pub use crate::leaf_disk::LeafDisk;
pub use crate::rng::LeafRng;
pub use crate::volume::Volume;
