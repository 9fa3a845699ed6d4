mod support;

use approx::assert_relative_eq;
use printparts::{
    errors::ModelError,
    extrude::{extrude, extrude_on, loft, loft_sections},
    float_types::PI,
    sketch::{Sketch, Workplane},
    symbols,
    traits::CSG,
};

use crate::support::{approx_eq, ngon_area};

#[test]
fn sketch_booleans() {
    let a = Sketch::rectangle(4.0, 2.0).unwrap();
    let b = Sketch::rectangle(2.0, 4.0).unwrap();
    assert_relative_eq!(a.union(&b).area(), 12.0, epsilon = 1e-9);
    assert_relative_eq!(a.difference(&b).area(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(a.intersection(&b).area(), 4.0, epsilon = 1e-9);
}

#[test]
fn rounded_rectangle_loses_the_corners() {
    let (w, l, r) = (10.0, 6.0, 1.0);
    let rounded = Sketch::rounded_rectangle(w, l, r, 256).unwrap();
    let expected = w * l - (4.0 - PI) * r * r;
    assert_relative_eq!(rounded.area(), expected, epsilon = 1e-3);

    let rect = rounded.bounding_rect().unwrap();
    assert!(approx_eq(rect.width(), w, 1e-9));
    assert!(approx_eq(rect.height(), l, 1e-9));
}

#[test]
fn selected_corners_only() {
    let r = 0.5;
    let rect = Sketch::rectangle(4.0, 2.0).unwrap();
    let half = rect.fillet_selected_corners(r, 256, |c| c.x > 0.0).unwrap();
    assert_relative_eq!(half.area(), 8.0 - 2.0 * (1.0 - PI / 4.0) * r * r, epsilon = 1e-3);
}

#[test]
fn transforms_of_sketches() {
    let rect = Sketch::rectangle(2.0, 1.0).unwrap().translate(5.0, 0.0);
    let turned = rect.rotate(90.0);
    let bounds = turned.bounding_rect().unwrap();
    assert!(approx_eq(bounds.min().y, 4.0, 1e-9));
    assert!(approx_eq(bounds.max().y, 6.0, 1e-9));

    let mirrored = rect.mirror_x();
    assert!(approx_eq(mirrored.bounding_rect().unwrap().max().x, -4.0, 1e-9));
    assert_relative_eq!(mirrored.area(), 2.0, epsilon = 1e-9);

    let centered = rect.centered();
    assert!(approx_eq(centered.bounding_rect().unwrap().center().x, 0.0, 1e-9));
}

#[test]
fn extruded_ring_keeps_its_hole() {
    let segments = 32;
    let ring = Sketch::circle(3.0, segments)
        .unwrap()
        .difference(&Sketch::circle(2.0, segments).unwrap());
    let tube = extrude(&ring, 2.0).unwrap();
    let expected = (ngon_area(3.0, segments) - ngon_area(2.0, segments)) * 2.0;
    assert_relative_eq!(tube.volume(), expected, epsilon = 1e-6);
    assert!(!tube.contains_point(&nalgebra::Point3::new(0.0, 0.0, 1.0)));
    assert!(tube.contains_point(&nalgebra::Point3::new(2.5, 0.0, 1.0)));
}

#[test]
fn negative_height_extrudes_downwards() {
    let block = extrude(&Sketch::rectangle(1.0, 1.0).unwrap(), -2.0).unwrap();
    let bb = block.bounding_box();
    assert!(approx_eq(bb.mins.z, -2.0, 1e-12) && approx_eq(bb.maxs.z, 0.0, 1e-12));
    assert_relative_eq!(block.volume(), 2.0, epsilon = 1e-9);
}

#[test]
fn extrusion_on_the_front_plane_runs_along_minus_y() {
    let profile = Sketch::rectangle(2.0, 1.0).unwrap();
    let slab = extrude_on(&profile, &Workplane::XZ, 3.0).unwrap();
    let bb = slab.bounding_box();
    assert!(approx_eq(bb.mins.y, -3.0, 1e-9) && approx_eq(bb.maxs.y, 0.0, 1e-9));
    assert!(approx_eq(bb.maxs.z, 0.5, 1e-9) && approx_eq(bb.maxs.x, 1.0, 1e-9));
    assert_relative_eq!(slab.volume(), 6.0, epsilon = 1e-9);
}

#[test]
fn loft_between_circles_is_a_frustum() {
    let segments = 64;
    let (r1, r2, h) = (3.0, 2.5, 2.25);
    let frustum = loft(
        &Sketch::circle(r1, segments).unwrap(),
        &Sketch::circle(r2, segments).unwrap(),
        h,
    )
    .unwrap();
    let (a1, a2) = (ngon_area(r1, segments), ngon_area(r2, segments));
    let expected = h / 3.0 * (a1 + a2 + (a1 * a2).sqrt());
    assert_relative_eq!(frustum.volume(), expected, max_relative = 1e-6);
}

#[test]
fn loft_between_squares_of_different_size() {
    let frustum = loft(
        &Sketch::rectangle(4.0, 4.0).unwrap(),
        &Sketch::rectangle(2.0, 2.0).unwrap(),
        3.0,
    )
    .unwrap();
    assert_relative_eq!(frustum.volume(), 3.0 / 3.0 * (16.0 + 4.0 + 8.0), epsilon = 1e-9);
}

#[test]
fn loft_rejects_profiles_with_holes() {
    let ring = Sketch::circle(3.0, 16)
        .unwrap()
        .difference(&Sketch::circle(1.0, 16).unwrap());
    let result = loft(&ring, &Sketch::circle(2.0, 16).unwrap(), 1.0);
    assert!(matches!(result, Err(ModelError::LoftMismatch(_))));
}

#[test]
fn loft_sections_need_matching_rings() {
    let square = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let triangle = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    assert!(matches!(
        loft_sections(&[(0.0, square.clone()), (1.0, triangle)]),
        Err(ModelError::LoftMismatch(_))
    ));
    assert!(matches!(
        loft_sections(&[(1.0, square.clone()), (0.0, square.clone())]),
        Err(ModelError::LoftMismatch(_))
    ));

    let prism = loft_sections(&[(0.0, square.clone()), (0.5, square.clone()), (2.0, square)]).unwrap();
    assert_relative_eq!(prism.volume(), 2.0, epsilon = 1e-9);
}

#[test]
fn empty_and_degenerate_profiles_are_rejected() {
    assert!(matches!(extrude(&Sketch::new(), 1.0), Err(ModelError::DegenerateProfile(_))));
    assert!(matches!(
        Sketch::polygon(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]),
        Err(ModelError::DegenerateProfile(_))
    ));
    assert!(extrude(&Sketch::rectangle(1.0, 1.0).unwrap(), 0.0).is_err());
}

#[test]
fn polarity_glyphs() {
    let plus = symbols::plus(6.0, 1.0).unwrap();
    assert_relative_eq!(plus.area(), 6.0 + 6.0 - 1.0, epsilon = 1e-9);
    let minus = symbols::minus(6.0, 1.0).unwrap();
    assert_relative_eq!(minus.area(), 6.0, epsilon = 1e-9);
    assert!(symbols::plus(1.0, 2.0).is_err());
}
