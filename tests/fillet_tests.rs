mod support;

use approx::assert_relative_eq;
use printparts::{
    errors::ModelError,
    fillet::{EdgeSelection, assist::outer_fillet, extrude_filleted},
    float_types::PI,
    screws::{ScrewSpec, TrapezoidalThread},
    sketch::Sketch,
    traits::CSG,
};

use crate::support::{approx_eq, ngon_area};

#[test]
fn vertical_fillet_rounds_the_profile_corners() {
    let (w, l, h, r) = (6.0, 4.0, 2.0, 1.0);
    let profile = Sketch::rectangle(w, l).unwrap();
    let block = extrude_filleted(&profile, h, r, EdgeSelection::Vertical, 256).unwrap();
    assert_relative_eq!(block.volume(), (w * l - (4.0 - PI) * r * r) * h, epsilon = 1e-2);

    let bb = block.bounding_box();
    assert!(approx_eq(bb.maxs.x - bb.mins.x, w, 1e-9));
    assert!(approx_eq(bb.maxs.z - bb.mins.z, h, 1e-9));
}

#[test]
fn cap_fillets_stay_inside_the_sharp_block() {
    let (w, l, h, r) = (4.0, 4.0, 2.0, 0.5);
    let profile = Sketch::rectangle(w, l).unwrap();
    let sharp = w * l * h;
    let core = (w - 2.0 * r) * (l - 2.0 * r) * h;

    let both = extrude_filleted(&profile, h, r, EdgeSelection::TopAndBottom, 32).unwrap();
    let top = extrude_filleted(&profile, h, r, EdgeSelection::Top, 32).unwrap();
    assert!(both.volume() < top.volume());
    assert!(top.volume() < sharp);
    assert!(both.volume() > core);

    let bb = both.bounding_box();
    assert!(approx_eq(bb.mins.z, 0.0, 1e-12) && approx_eq(bb.maxs.z, h, 1e-12));
    assert!(approx_eq(bb.maxs.x, w / 2.0, 1e-9));
}

#[test]
fn all_edges_is_smaller_than_caps_only() {
    let profile = Sketch::rectangle(3.0, 3.0).unwrap();
    let caps = extrude_filleted(&profile, 2.0, 0.4, EdgeSelection::TopAndBottom, 32).unwrap();
    let all = extrude_filleted(&profile, 2.0, 0.4, EdgeSelection::All, 32).unwrap();
    assert!(all.volume() < caps.volume());
    assert!(all.contains_point(&nalgebra::Point3::new(0.0, 0.0, 1.0)));
}

#[test]
fn zero_radius_is_a_plain_extrusion() {
    let profile = Sketch::rectangle(2.0, 1.0).unwrap();
    let block = extrude_filleted(&profile, 3.0, 0.0, EdgeSelection::All, 16).unwrap();
    assert_relative_eq!(block.volume(), 6.0, epsilon = 1e-9);
}

#[test]
fn oversized_fillets_are_rejected() {
    let profile = Sketch::rectangle(1.0, 1.0).unwrap();
    // Both caps rounded: at most half the height.
    assert!(matches!(
        extrude_filleted(&profile, 1.0, 0.6, EdgeSelection::TopAndBottom, 16),
        Err(ModelError::FilletTooLarge { .. })
    ));
    // One cap: the full height is available, the outline is not.
    let tall = Sketch::rectangle(10.0, 10.0).unwrap();
    assert!(extrude_filleted(&tall, 1.0, 0.8, EdgeSelection::Top, 16).is_ok());
    assert!(matches!(
        extrude_filleted(&profile, 4.0, 0.7, EdgeSelection::Top, 16),
        Err(ModelError::FilletTooLarge { .. })
    ));
    assert!(matches!(
        extrude_filleted(&profile, 1.0, -0.1, EdgeSelection::All, 16),
        Err(ModelError::InvalidParameter { .. })
    ));
}

#[test]
fn cove_fills_an_inner_corner() {
    let cove = outer_fillet(2.0, 0.5, 128).unwrap();
    assert_relative_eq!(cove.volume(), 2.0 * 0.25 * (1.0 - PI / 4.0), epsilon = 1e-3);
    assert!(cove.contains_point(&nalgebra::Point3::new(0.0, 0.05, 0.05)));
    assert!(!cove.contains_point(&nalgebra::Point3::new(0.0, 0.45, 0.45)));
}

#[test]
fn thread_radius_stays_between_root_and_crest() {
    let thread = TrapezoidalThread::new(8.0, 1.5, 10.0, true);
    assert_relative_eq!(thread.major_radius(), 4.0);
    assert_relative_eq!(thread.minor_radius(), 3.25);
    for k in 0..50 {
        let z = 0.2 * k as f64;
        let r = thread.radius_at(z, 0.7 * k as f64);
        assert!(r >= thread.minor_radius() - 1e-12 && r <= thread.major_radius() + 1e-12);
    }

    let nut = TrapezoidalThread::new(8.0, 1.5, 10.0, false);
    assert!(nut.major_radius() > thread.major_radius());
}

#[test]
fn screw_volume_lies_between_core_and_envelope() {
    let spec = ScrewSpec::default();
    assert_eq!(spec.size(), "8x1.5");
    let segments = 48;
    let screw = spec.build(segments).unwrap();

    let head_height = 0.6 * spec.diameter;
    let shank = spec.length - head_height;
    let head = ngon_area(0.9 * spec.diameter, segments) * head_height;
    let core = ngon_area(spec.diameter / 2.0 - spec.pitch / 2.0, segments) * shank;
    let envelope = ngon_area(spec.diameter / 2.0, segments) * shank;
    let volume = screw.volume();
    assert!(volume > head + core && volume < head + envelope, "volume {volume}");
}

#[test]
fn screw_is_as_long_as_its_length() {
    let spec = ScrewSpec::default();
    let screw = spec.build(48).unwrap();
    let head_height = 0.6 * spec.diameter;

    let bb = screw.bounding_box();
    assert!(approx_eq(bb.mins.z, 0.0, 1e-9));
    assert!(approx_eq(bb.maxs.z, spec.length, 1e-9));
    assert!(approx_eq(bb.maxs.x, 0.9 * spec.diameter, 1e-9));

    // the head is full width up to its height, the shank above is not
    assert!(screw.contains_point(&nalgebra::Point3::new(6.8, 0.1, head_height * 0.5)));
    assert!(!screw.contains_point(&nalgebra::Point3::new(6.8, 0.1, head_height + 1.0)));
    assert!(!screw.contains_point(&nalgebra::Point3::new(4.5, 0.1, spec.length - 1.0)));
    assert!(screw.contains_point(&nalgebra::Point3::new(0.0, 0.1, spec.length - 1.0)));
}

#[test]
fn narrow_head_disappears_into_the_thread() {
    let narrow = ScrewSpec {
        head_diameter: Some(6.0),
        ..ScrewSpec::default()
    };
    let screw = narrow.build(48).unwrap();
    let bb = screw.bounding_box();
    assert!(bb.maxs.x <= 4.0 + 1e-9);
    assert!(approx_eq(bb.maxs.z, narrow.length, 1e-9));
}

#[test]
fn screw_rejects_impossible_dimensions() {
    let no_head = ScrewSpec {
        head_diameter: Some(0.0),
        ..ScrewSpec::default()
    };
    assert!(matches!(no_head.build(24), Err(ModelError::InvalidParameter { .. })));

    let coarse = ScrewSpec {
        pitch: 9.0,
        ..ScrewSpec::default()
    };
    assert!(coarse.build(24).is_err());
}
