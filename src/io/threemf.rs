//! 3MF (3D Manufacturing Format) support.
//!
//! A 3MF file is a ZIP archive containing:
//! - `3D/3dmodel.model` - Main model XML file
//! - `\[Content_Types\].xml` - MIME type mappings
//! - `_rels/.rels` - Relationships
//!
//! Only mesh geometry is written: one object in millimetres whose vertices
//! are shared between triangles with exactly equal positions.

use crate::io::{IoError, IoResult, open_input};
use crate::mesh::Mesh;
use crate::mesh::polygon::Polygon;
use crate::triangulated::Triangulated3D;
use hashbrown::HashMap;
use nalgebra::Point3;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// 3MF namespace URI.
const NAMESPACE_3MF: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// Content types XML for 3MF.
const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#;

/// Relationships XML for 3MF.
const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Target="/3D/3dmodel.model" Id="rel0" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#;

/// Shared vertex list and index triples of a mesh.
struct IndexedTriangles {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[u32; 3]>,
}

fn index_triangles(mesh: &Mesh) -> IndexedTriangles {
    let mut lookup: HashMap<[u64; 3], u32> = HashMap::new();
    let mut vertices = Vec::new();
    let mut faces = Vec::with_capacity(mesh.triangle_count());
    mesh.visit_triangles(|tri| {
        let face = tri.map(|v| {
            let key = [v.pos.x.to_bits(), v.pos.y.to_bits(), v.pos.z.to_bits()];
            *lookup.entry(key).or_insert_with(|| {
                vertices.push(v.pos);
                (vertices.len() - 1) as u32
            })
        });
        faces.push(face);
    });
    IndexedTriangles { vertices, faces }
}

/// Save a mesh to a 3MF file, naming the object `name`.
pub fn save_3mf<P: AsRef<Path>>(mesh: &Mesh, name: &str, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(RELS_XML.as_bytes())?;

    let model_xml = generate_model_xml(&index_triangles(mesh), name)?;
    zip.start_file("3D/3dmodel.model", options)?;
    zip.write_all(model_xml.as_bytes())?;

    zip.finish()?;
    Ok(())
}

fn xml_error<E: std::fmt::Display>(context: &str) -> impl Fn(E) -> IoError + '_ {
    move |e| IoError::invalid_content(format!("failed to write {context}: {e}"))
}

/// Generate the 3D model XML content.
fn generate_model_xml(mesh: &IndexedTriangles, name: &str) -> IoResult<String> {
    let mut buffer = Vec::new();
    let mut writer = Writer::new_with_indent(Cursor::new(&mut buffer), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error("XML declaration"))?;

    let mut model = BytesStart::new("model");
    model.push_attribute(("xmlns", NAMESPACE_3MF));
    model.push_attribute(("unit", "millimeter"));
    model.push_attribute(("xml:lang", "en-US"));
    writer.write_event(Event::Start(model)).map_err(xml_error("model element"))?;

    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(xml_error("resources element"))?;

    let mut object = BytesStart::new("object");
    object.push_attribute(("id", "1"));
    object.push_attribute(("name", name));
    object.push_attribute(("type", "model"));
    writer.write_event(Event::Start(object)).map_err(xml_error("object element"))?;

    writer
        .write_event(Event::Start(BytesStart::new("mesh")))
        .map_err(xml_error("mesh element"))?;

    writer
        .write_event(Event::Start(BytesStart::new("vertices")))
        .map_err(xml_error("vertices element"))?;
    for v in &mesh.vertices {
        let mut vertex = BytesStart::new("vertex");
        vertex.push_attribute(("x", format!("{:.6}", v.x).as_str()));
        vertex.push_attribute(("y", format!("{:.6}", v.y).as_str()));
        vertex.push_attribute(("z", format!("{:.6}", v.z).as_str()));
        writer.write_event(Event::Empty(vertex)).map_err(xml_error("vertex"))?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("vertices")))
        .map_err(xml_error("vertices end"))?;

    writer
        .write_event(Event::Start(BytesStart::new("triangles")))
        .map_err(xml_error("triangles element"))?;
    for &[v1, v2, v3] in &mesh.faces {
        let mut triangle = BytesStart::new("triangle");
        triangle.push_attribute(("v1", v1.to_string().as_str()));
        triangle.push_attribute(("v2", v2.to_string().as_str()));
        triangle.push_attribute(("v3", v3.to_string().as_str()));
        writer.write_event(Event::Empty(triangle)).map_err(xml_error("triangle"))?;
    }
    writer
        .write_event(Event::End(BytesEnd::new("triangles")))
        .map_err(xml_error("triangles end"))?;

    for closing in ["mesh", "object", "resources"] {
        writer
            .write_event(Event::End(BytesEnd::new(closing)))
            .map_err(xml_error(closing))?;
    }

    writer
        .write_event(Event::Start(BytesStart::new("build")))
        .map_err(xml_error("build element"))?;
    let mut item = BytesStart::new("item");
    item.push_attribute(("objectid", "1"));
    writer.write_event(Event::Empty(item)).map_err(xml_error("build item"))?;
    writer
        .write_event(Event::End(BytesEnd::new("build")))
        .map_err(xml_error("build end"))?;

    writer
        .write_event(Event::End(BytesEnd::new("model")))
        .map_err(xml_error("model end"))?;

    String::from_utf8(buffer).map_err(|e| IoError::invalid_content(format!("model XML is not UTF-8: {e}")))
}

/// Load every mesh object of a 3MF file into one [`Mesh`].
pub fn load_3mf<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let reader = BufReader::new(open_input(path.as_ref())?);
    let mut archive = ZipArchive::new(reader)?;
    let content = read_model_file(&mut archive)?;
    parse_model(&content)
}

fn read_model_file<R: Read + Seek>(archive: &mut ZipArchive<R>) -> IoResult<String> {
    for model_path in ["3D/3dmodel.model", "3d/3dmodel.model", "3D/3DModel.model"] {
        if let Ok(mut file) = archive.by_name(model_path) {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            return Ok(content);
        }
    }
    Err(IoError::invalid_content("3MF archive does not contain a model file"))
}

fn parse_model(content: &str) -> IoResult<Mesh> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut offset = 0usize;
    let mut polygons = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"mesh" => offset = vertices.len(),
                b"vertex" => {
                    let [x, y, z] = attributes(e, [b"x", b"y", b"z"])?;
                    vertices.push(Point3::new(x, y, z));
                },
                b"triangle" => {
                    let indices = attributes::<usize>(e, [b"v1", b"v2", b"v3"])?;
                    let mut points = Vec::with_capacity(3);
                    for index in indices {
                        let point = vertices.get(index + offset).ok_or_else(|| {
                            IoError::invalid_content(format!("triangle references missing vertex {index}"))
                        })?;
                        points.push(*point);
                    }
                    polygons.extend(Polygon::from_points(&points));
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
    }

    Ok(Mesh::from_polygons(&polygons))
}

/// Parse three named attributes of an element.
fn attributes<T: std::str::FromStr>(element: &BytesStart<'_>, keys: [&[u8]; 3]) -> IoResult<[T; 3]>
where
    T::Err: std::fmt::Display,
{
    let mut found: [Option<T>; 3] = [None, None, None];
    for attr in element.attributes().flatten() {
        let key = attr.key.local_name();
        if let Some(slot) = keys.iter().position(|k| *k == key.as_ref()) {
            let value = std::str::from_utf8(&attr.value)
                .map_err(|e| IoError::invalid_content(format!("invalid UTF-8 in attribute: {e}")))?;
            found[slot] = Some(
                value
                    .parse()
                    .map_err(|e| IoError::invalid_content(format!("invalid attribute value {value:?}: {e}")))?,
            );
        }
    }
    let [a, b, c] = found;
    match (a, b, c) {
        (Some(a), Some(b), Some(c)) => Ok([a, b, c]),
        _ => Err(IoError::invalid_content("element is missing a required attribute")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_tags_are_xml_errors() {
        let result = parse_model("<model><resources><mesh></vertices></model>");
        assert!(matches!(result, Err(IoError::Xml(_))));
    }

    #[test]
    fn triangles_index_their_own_object() {
        let content = r#"<model><resources>
            <object id="1"><mesh><vertices>
                <vertex x="0" y="0" z="0"/><vertex x="1" y="0" z="0"/><vertex x="0" y="1" z="0"/>
            </vertices><triangles><triangle v1="0" v2="1" v3="2"/></triangles></mesh></object>
            <object id="2"><mesh><vertices>
                <vertex x="0" y="0" z="5"/><vertex x="1" y="0" z="5"/><vertex x="0" y="1" z="5"/>
            </vertices><triangles><triangle v1="0" v2="1" v3="2"/></triangles></mesh></object>
        </resources></model>"#;
        let mesh = parse_model(content).unwrap();
        assert_eq!(mesh.polygons.len(), 2);
        assert_eq!(mesh.polygons[1].vertices[0].pos.z, 5.0);
    }

    #[test]
    fn missing_vertex_is_invalid_content() {
        let content = r#"<model><mesh><vertices><vertex x="0" y="0" z="0"/></vertices>
            <triangles><triangle v1="0" v2="1" v3="2"/></triangles></mesh></model>"#;
        assert!(matches!(parse_model(content), Err(IoError::InvalidContent { .. })));
    }
}
