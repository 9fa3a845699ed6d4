mod support;

use approx::assert_relative_eq;
use printparts::{
    io::{ExportFormat, IoError, export_model, load_3mf, load_stl, save_3mf, save_stl, step::to_step_string},
    mesh::{Mesh, shapes::Align3},
    traits::CSG,
};

fn sample() -> Mesh {
    let block = Mesh::cuboid(3.0, 2.0, 1.0, Align3::MIN).unwrap();
    let post = Mesh::cylinder(0.5, 2.0, 16, Align3::BOTTOM).unwrap().translate(1.5, 1.0, 1.0);
    block.union(&post)
}

#[test]
fn binary_stl_round_trip_keeps_the_volume() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.stl");
    let mesh = sample();
    save_stl(&mesh, "sample", &path, false).unwrap();

    let loaded = load_stl(&path).unwrap();
    assert!(loaded.triangle_count() > 0);
    assert_relative_eq!(loaded.volume(), mesh.volume(), max_relative = 1e-5);
}

#[test]
fn ascii_stl_is_readable_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.stl");
    let cube = Mesh::cube(2.0, Align3::CENTER).unwrap();
    save_stl(&cube, "cube", &path, true).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid cube"));
    assert_eq!(text.matches("facet normal").count(), 12);
    assert_relative_eq!(load_stl(&path).unwrap().volume(), 8.0, epsilon = 1e-5);
}

#[test]
fn threemf_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.3mf");
    let mesh = sample();
    save_3mf(&mesh, "sample", &path).unwrap();

    let loaded = load_3mf(&path).unwrap();
    assert_relative_eq!(loaded.volume(), mesh.volume(), max_relative = 1e-5);
    let bb = loaded.bounding_box();
    assert_relative_eq!(bb.maxs.z, 3.0, epsilon = 1e-6);
}

#[test]
fn step_text_describes_a_faceted_solid() {
    let cube = Mesh::cube(1.0, Align3::MIN).unwrap();
    let text = to_step_string(&cube, "it's a cube").unwrap();
    assert!(text.starts_with("ISO-10303-21;"));
    assert!(text.trim_end().ends_with("END-ISO-10303-21;"));
    assert!(text.contains("FACETED_BREP"));
    assert!(text.contains("CLOSED_SHELL"));
    assert!(text.contains("'it''s a cube'"));
    // one face per cube side, eight shared corners
    assert_eq!(text.matches("FACE_SURFACE").count(), 6);
    assert!(text.matches("CARTESIAN_POINT").count() >= 8);

    assert!(matches!(to_step_string(&Mesh::default(), "empty"), Err(IoError::InvalidContent { .. })));
}

#[test]
fn export_writes_one_file_per_format() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("out");
    let written = export_model(&sample(), "sample", &out, &ExportFormat::DEFAULTS).unwrap();

    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["sample.step", "sample.stl", "sample.3mf"]);
    assert!(written.iter().all(|p| p.metadata().unwrap().len() > 0));
}

#[test]
fn missing_files_are_reported_by_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.stl");
    match load_stl(&path) {
        Err(IoError::FileNotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    assert!(matches!(load_3mf(dir.path().join("absent.3mf")), Err(IoError::FileNotFound { .. })));
}

#[test]
fn garbage_is_not_a_3mf_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.3mf");
    std::fs::write(&path, b"not a zip archive").unwrap();
    assert!(load_3mf(&path).is_err());
}
