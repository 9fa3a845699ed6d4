mod support;

use approx::assert_relative_eq;
use nalgebra::Point3;
use printparts::{
    mesh::{Mesh, plane::Plane, shapes::Align3},
    traits::{Axis, CSG},
};

use crate::support::{approx_eq, bounding_box, is_closed};

fn cube_at(size: f64, x: f64, y: f64, z: f64) -> Mesh {
    Mesh::cube(size, Align3::CENTER).unwrap().translate(x, y, z)
}

#[test]
fn cuboid_volume_and_alignment() {
    let block = Mesh::cuboid(2.0, 3.0, 4.0, Align3::MIN).unwrap();
    assert_relative_eq!(block.volume(), 24.0, epsilon = 1e-9);
    assert_relative_eq!(block.surface_area(), 2.0 * (6.0 + 8.0 + 12.0), epsilon = 1e-9);
    let bb = bounding_box(&block.polygons);
    assert_eq!(bb, [0.0, 0.0, 0.0, 2.0, 3.0, 4.0]);
    assert!(is_closed(&block));
}

#[test]
fn union_of_overlapping_cubes() {
    let a = cube_at(2.0, 0.0, 0.0, 0.0);
    let b = cube_at(2.0, 1.0, 0.0, 0.0);
    let union = a.union(&b);
    assert_relative_eq!(union.volume(), 12.0, epsilon = 1e-6);

    let bb = bounding_box(&union.polygons);
    assert!(approx_eq(bb[0], -1.0, 1e-8));
    assert!(approx_eq(bb[3], 2.0, 1e-8));
}

#[test]
fn difference_carves_a_pocket() {
    let big = cube_at(4.0, 0.0, 0.0, 0.0);
    let small = cube_at(2.0, 0.0, 0.0, 2.0);
    let result = &big - &small;
    assert_relative_eq!(result.volume(), 64.0 - 4.0, epsilon = 1e-6);
    assert!(!result.contains_point(&Point3::new(0.0, 0.0, 1.5)));
    assert!(result.contains_point(&Point3::new(0.0, 0.0, 0.5)));
}

#[test]
fn intersection_keeps_the_common_part() {
    let a = cube_at(2.0, 0.0, 0.0, 0.0);
    let b = cube_at(2.0, 1.0, 1.0, 0.0);
    let common = &a & &b;
    assert_relative_eq!(common.volume(), 2.0, epsilon = 1e-6);
    let bb = common.bounding_box();
    assert!(approx_eq(bb.mins.x, 0.0, 1e-8) && approx_eq(bb.maxs.x, 1.0, 1e-8));
}

#[test]
fn disjoint_booleans_short_circuit() {
    let a = cube_at(1.0, 0.0, 0.0, 0.0);
    let b = cube_at(1.0, 5.0, 0.0, 0.0);

    let union = a.union(&b);
    assert_eq!(union.polygons.len(), a.polygons.len() + b.polygons.len());
    assert_relative_eq!(union.volume(), 2.0, epsilon = 1e-9);

    let difference = a.difference(&b);
    assert_eq!(difference.polygons.len(), a.polygons.len());

    assert!(a.intersection(&b).is_empty());
}

#[test]
fn assign_operators_match_methods() {
    let a = cube_at(2.0, 0.0, 0.0, 0.0);
    let b = cube_at(1.0, 1.0, 1.0, 1.0);

    let mut sum = a.clone();
    sum += &b;
    assert_relative_eq!(sum.volume(), a.union(&b).volume(), epsilon = 1e-9);

    let mut rest = a.clone();
    rest -= &b;
    assert_relative_eq!(rest.volume(), 8.0 - 0.125, epsilon = 1e-6);
}

#[test]
fn mirroring_keeps_faces_outward() {
    let block = Mesh::cuboid(1.0, 2.0, 3.0, Align3::MIN).unwrap();
    let mirrored = block.mirror(Plane::from_normal_and_point(nalgebra::Vector3::x(), &Point3::origin()).unwrap());
    assert_relative_eq!(mirrored.volume(), 6.0, epsilon = 1e-9);
    assert!(approx_eq(mirrored.bounding_box().mins.x, -1.0, 1e-9));

    let flipped = block.scale(1.0, 1.0, -1.0);
    assert_relative_eq!(flipped.volume(), 6.0, epsilon = 1e-9);
}

#[test]
fn rotation_about_x_turns_z_into_y() {
    let post = Mesh::cuboid(1.0, 1.0, 5.0, Align3::BOTTOM).unwrap();
    let lying = post.rotate_about(Axis::X, 90.0);
    let bb = lying.bounding_box();
    assert!(approx_eq(bb.mins.y, -5.0, 1e-9));
    assert!(approx_eq(bb.maxs.y, 0.0, 1e-9));
    assert!(approx_eq(bb.maxs.z, 0.5, 1e-9));
}

#[test]
fn float_and_center() {
    let block = cube_at(2.0, 3.0, 4.0, -7.0);
    let floated = block.float();
    assert!(approx_eq(floated.bounding_box().mins.z, 0.0, 1e-12));
    let centered = block.center();
    let c = centered.bounding_box().center();
    assert!(approx_eq(c.x, 0.0, 1e-12) && approx_eq(c.y, 0.0, 1e-12) && approx_eq(c.z, 0.0, 1e-12));
}

#[test]
fn cylinder_and_cone_volumes() {
    let segments = 48;
    let area = support::ngon_area(2.0, segments);
    let cylinder = Mesh::cylinder(2.0, 3.0, segments, Align3::BOTTOM).unwrap();
    assert_relative_eq!(cylinder.volume(), area * 3.0, epsilon = 1e-9);
    assert!(is_closed(&cylinder));

    let cone = Mesh::cone(2.0, 0.0, 3.0, segments, Align3::BOTTOM).unwrap();
    assert_relative_eq!(cone.volume(), area, epsilon = 1e-9);
}

#[test]
fn sphere_contains_its_center() {
    let sphere = Mesh::sphere(1.0, 24, 12).unwrap();
    assert!(sphere.contains_point(&Point3::origin()));
    assert!(!sphere.contains_point(&Point3::new(0.0, 0.0, 1.5)));
    assert!(sphere.volume() < 4.0 / 3.0 * std::f64::consts::PI);
    assert!(sphere.volume() > 3.8);
}

#[test]
fn compound_keeps_members_apart() {
    let a = cube_at(1.0, 0.0, 0.0, 0.0);
    let b = cube_at(1.0, 0.25, 0.0, 0.0);
    let compound = Mesh::compound([a.clone(), b.clone()]);
    assert_eq!(compound.polygons.len(), a.polygons.len() + b.polygons.len());
    assert_relative_eq!(compound.volume(), 2.0, epsilon = 1e-9);
}
