use nalgebra::{Matrix3, Point3, Unit, Vector2, Vector3};
use std::f64::consts::PI;
use std::io::{self, Write};

use crate::distributions::uniform_disk;

/// A flat, circular, oriented leaf.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LeafDisk {
    pub position: Point3<f64>,
    pub normal: Unit<Vector3<f64>>,
    pub radius: f64,
}

impl LeafDisk {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>, radius: f64) -> Self {
        LeafDisk {
            position,
            normal: Unit::new_normalize(normal),
            radius,
        }
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Area of the shadow cast along `dir`.
    pub fn projected_area(&self, dir: &Vector3<f64>) -> f64 {
        self.area() * self.normal.dot(dir).abs()
    }

    /// Orthonormal basis with the tangent, bitangent and normal as columns.
    pub fn basis(&self) -> Matrix3<f64> {
        let normal = self.normal.into_inner();
        let v = if normal.x.abs() > 0.1 {
            Vector3::new(0.0, 1.0, 0.0)
        } else {
            Vector3::new(1.0, 0.0, 0.0)
        };
        let u = v.cross(&normal).normalize();
        let v = normal.cross(&u);

        Matrix3::from_columns(&[u, v, normal])
    }

    /// Maps the unit square uniformly onto the disk.
    pub fn sample_point(&self, u: Vector2<f64>) -> Point3<f64> {
        let p = uniform_disk(u) * self.radius;
        let basis = self.basis();

        self.position + basis.column(0) * p.x + basis.column(1) * p.y
    }

    /// Writes a GList static instance of the unit disk, scaled, rotated and translated into place.
    pub fn write_glist_instance<W>(&self, out: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        let tbn = self.basis();

        write!(out, "<staticinstance><matrix>")?;
        for j in 0..3 {
            write!(
                out,
                "{}, {}, {}, {}, ",
                self.radius * tbn[(j, 0)],
                self.radius * tbn[(j, 1)],
                self.radius * tbn[(j, 2)],
                self.position[j]
            )?;
        }
        writeln!(out, "0, 0, 0, 1</matrix></staticinstance>")
    }

    /// Writes the disk as a triangle fan of `resolution` rim vertices around its center.
    ///
    /// `vertex_offset` is the number of vertices already written to `out` and is advanced past the
    /// vertices of this disk. Nothing is written if the indices would overflow.
    pub fn write_obj<W>(
        &self,
        out: &mut W,
        vertex_offset: &mut u64,
        resolution: u32,
    ) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        let resolution = u64::from(resolution.max(3));
        let next_offset = vertex_offset.checked_add(resolution + 1).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "too many vertices for OBJ indices")
        })?;
        let tbn = self.basis();
        let (hat_u, hat_v) = (tbn.column(0), tbn.column(1));

        let p = self.position;
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;

        for j in 0..resolution {
            let (sin_phi, cos_phi) = (2.0 * PI * j as f64 / resolution as f64).sin_cos();
            let vertex = p + hat_u * (self.radius * cos_phi) + hat_v * (self.radius * sin_phi);
            writeln!(out, "v {} {} {}", vertex.x, vertex.y, vertex.z)?;
        }

        // OBJ indices are 1-based.
        let center = *vertex_offset + 1;
        for j in 0..resolution {
            let v1 = center + 1 + j;
            let v2 = center + 1 + (j + 1) % resolution;
            writeln!(out, "f {} {} {}", center, v1, v2)?;
        }

        *vertex_offset = next_offset;

        Ok(())
    }
}
