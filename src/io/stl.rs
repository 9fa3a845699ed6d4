//! STL export and import through `stl_io`.

use crate::io::{IoResult, open_input};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;
use std::fmt::Write as _;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// Convert a shape to an **ASCII STL** string with the given `name`.
///
/// ```rust
/// # use printparts::io::stl::to_stl_ascii;
/// # use printparts::mesh::{Mesh, shapes::Align3};
/// let cube = Mesh::cube(1.0, Align3::CENTER).unwrap();
/// let text = to_stl_ascii(&cube, "cube");
/// assert!(text.starts_with("solid cube"));
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", p.x, p.y, p.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Convert a shape to a **binary STL** byte vector.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();
    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| Vertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])),
        });
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Write `mesh` to `path` as binary STL, or ASCII STL when `ascii` is set.
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, name: &str, path: P, ascii: bool) -> IoResult<()> {
    let mut writer = BufWriter::new(std::fs::File::create(path)?);
    if ascii {
        writer.write_all(to_stl_ascii(mesh, name).as_bytes())?;
    } else {
        writer.write_all(&to_stl_binary(mesh)?)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a binary or ASCII STL file. Degenerate facets are skipped.
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let mut reader = BufReader::new(open_input(path.as_ref())?);
    let indexed = stl_io::read_stl(&mut reader)?;

    let point = |index: usize| {
        let v = indexed.vertices[index];
        Point3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2]))
    };
    let polygons: Vec<Polygon> = indexed
        .faces
        .iter()
        .filter_map(|face| {
            let [a, b, c] = face.vertices;
            Polygon::from_points(&[point(a), point(b), point(c)])
        })
        .collect();
    Ok(Mesh::from_polygons(&polygons))
}
