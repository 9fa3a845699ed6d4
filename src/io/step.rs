//! STEP (ISO 10303-21, AP214) export of meshes as faceted boundary representations.
//!
//! Each mesh polygon becomes a planar `FACE_SURFACE` bounded by a
//! `POLY_LOOP`; all faces share one `CLOSED_SHELL` wrapped in a
//! `FACETED_BREP`. Lengths are written in millimetres.

use crate::float_types::Real;
use crate::io::{IoError, IoResult};
use crate::mesh::Mesh;
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends numbered entity instances to the DATA section.
struct EntityWriter {
    data: String,
    next_id: usize,
}

impl EntityWriter {
    fn new() -> Self {
        EntityWriter {
            data: String::new(),
            next_id: 1,
        }
    }

    fn add(&mut self, entity: &str) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        let _ = writeln!(self.data, "#{id}={entity};");
        id
    }
}

fn real(value: Real) -> String {
    let text = format!("{value:.6}");
    if text == "-0.000000" { "0.000000".into() } else { text }
}

fn point_entity(p: &Point3<Real>) -> String {
    format!("CARTESIAN_POINT('',({},{},{}))", real(p.x), real(p.y), real(p.z))
}

fn direction_entity(d: &Vector3<Real>) -> String {
    format!("DIRECTION('',({},{},{}))", real(d.x), real(d.y), real(d.z))
}

fn id_list(ids: &[usize]) -> String {
    ids.iter().map(|id| format!("#{id}")).collect::<Vec<_>>().join(",")
}

/// Render `mesh` as the text of a STEP file describing product `name`.
pub fn to_step_string(mesh: &Mesh, name: &str) -> IoResult<String> {
    if mesh.is_empty() {
        return Err(IoError::invalid_content("cannot save empty mesh to STEP"));
    }
    let name = name.replace('\'', "''");
    let mut w = EntityWriter::new();

    let app_context = w.add("APPLICATION_CONTEXT('core data for automotive mechanical design processes')");
    w.add(&format!(
        "APPLICATION_PROTOCOL_DEFINITION('international standard','automotive_design',2000,#{app_context})"
    ));
    let product_context = w.add(&format!("PRODUCT_CONTEXT('',#{app_context},'mechanical')"));
    let product = w.add(&format!("PRODUCT('{name}','{name}','',(#{product_context}))"));
    let formation = w.add(&format!("PRODUCT_DEFINITION_FORMATION('','',#{product})"));
    let definition_context = w.add(&format!("PRODUCT_DEFINITION_CONTEXT('part definition',#{app_context},'design')"));
    let definition = w.add(&format!("PRODUCT_DEFINITION('design','',#{formation},#{definition_context})"));
    let shape = w.add(&format!("PRODUCT_DEFINITION_SHAPE('','',#{definition})"));

    let length_unit = w.add("(LENGTH_UNIT()NAMED_UNIT(*)SI_UNIT(.MILLI.,.METRE.))");
    let angle_unit = w.add("(NAMED_UNIT(*)PLANE_ANGLE_UNIT()SI_UNIT($,.RADIAN.))");
    let solid_angle_unit = w.add("(NAMED_UNIT(*)SI_UNIT($,.STERADIAN.)SOLID_ANGLE_UNIT())");
    let uncertainty = w.add(&format!(
        "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-07),#{length_unit},'distance_accuracy_value','confusion accuracy')"
    ));
    let context = w.add(&format!(
        "(GEOMETRIC_REPRESENTATION_CONTEXT(3)GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#{uncertainty}))\
         GLOBAL_UNIT_ASSIGNED_CONTEXT((#{length_unit},#{angle_unit},#{solid_angle_unit}))\
         REPRESENTATION_CONTEXT('Context #1','3D Context with UNIT and UNCERTAINTY'))"
    ));

    let origin = w.add(&point_entity(&Point3::origin()));
    let z_axis = w.add(&direction_entity(&Vector3::z()));
    let x_axis = w.add(&direction_entity(&Vector3::x()));
    let world = w.add(&format!("AXIS2_PLACEMENT_3D('',#{origin},#{z_axis},#{x_axis})"));

    let mut point_ids: HashMap<[u64; 3], usize> = HashMap::new();
    let mut faces = Vec::with_capacity(mesh.polygons.len());
    for polygon in &mesh.polygons {
        let mut loop_ids = Vec::with_capacity(polygon.vertices.len());
        for vertex in &polygon.vertices {
            let p = vertex.pos;
            let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
            let id = match point_ids.get(&key) {
                Some(&id) => id,
                None => {
                    let id = w.add(&point_entity(&p));
                    point_ids.insert(key, id);
                    id
                },
            };
            loop_ids.push(id);
        }
        let Some(&first) = loop_ids.first() else {
            continue;
        };

        let normal = polygon.plane.normal;
        let reference = polygon
            .vertices
            .get(1)
            .and_then(|v| (v.pos - polygon.vertices[0].pos).try_normalize(Real::EPSILON))
            .unwrap_or_else(|| normal.cross(&Vector3::x()).try_normalize(Real::EPSILON).unwrap_or(Vector3::y()));

        let poly_loop = w.add(&format!("POLY_LOOP('',({}))", id_list(&loop_ids)));
        let bound = w.add(&format!("FACE_OUTER_BOUND('',#{poly_loop},.T.)"));
        let axis = w.add(&direction_entity(&normal));
        let ref_dir = w.add(&direction_entity(&reference));
        let placement = w.add(&format!("AXIS2_PLACEMENT_3D('',#{first},#{axis},#{ref_dir})"));
        let plane = w.add(&format!("PLANE('',#{placement})"));
        faces.push(w.add(&format!("FACE_SURFACE('',(#{bound}),#{plane},.T.)")));
    }

    let shell = w.add(&format!("CLOSED_SHELL('',({}))", id_list(&faces)));
    let brep = w.add(&format!("FACETED_BREP('{name}',#{shell})"));
    let representation = w.add(&format!(
        "FACETED_BREP_SHAPE_REPRESENTATION('{name}',(#{world},#{brep}),#{context})"
    ));
    w.add(&format!("SHAPE_DEFINITION_REPRESENTATION(#{shape},#{representation})"));

    let mut out = String::with_capacity(w.data.len() + 512);
    out.push_str("ISO-10303-21;\nHEADER;\n");
    out.push_str("FILE_DESCRIPTION(('faceted solid'),'2;1');\n");
    let _ = writeln!(out, "FILE_NAME('{name}.step','',(''),(''),'printparts','printparts','');");
    out.push_str("FILE_SCHEMA(('AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }'));\nENDSEC;\nDATA;\n");
    out.push_str(&w.data);
    out.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
    Ok(out)
}

/// Save `mesh` as a STEP file.
pub fn save_step<P: AsRef<Path>>(mesh: &Mesh, name: &str, path: P) -> IoResult<()> {
    let text = to_step_string(mesh, name)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_normalised() {
        assert_eq!(real(-0.0), "0.000000");
        assert_eq!(real(-1e-9), "0.000000");
        assert_eq!(real(-1.5), "-1.500000");
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert!(to_step_string(&Mesh::default(), "empty").is_err());
    }
}
