use super::*;
use nalgebra::vector;

#[test]
fn center_reads_field_matching_shape() {
    let mut rect = Region::rectangle("r", vector![4.0, 1.0], 6.0, 8.0);
    rect.cx = 100.0;
    rect.cy = 100.0;
    assert_eq!(rect.center(), vector![4.0, 1.0]);

    let mut circ = Region::circle("c", vector![6.0, 2.0], 5.0);
    circ.x = -1.0;
    circ.y = -1.0;
    assert_eq!(circ.center(), vector![6.0, 2.0]);
}

#[test]
fn set_center_dual_writes_and_keeps_size() {
    let mut ann = Region::annulus("a", vector![8.0, 3.0], 6.0, 2.0).with_angle_deg(20.0);
    ann.set_center(vector![13.0, 8.0]);
    assert_eq!((ann.x, ann.y), (13.0, 8.0));
    assert_eq!((ann.cx, ann.cy), (13.0, 8.0));
    assert_eq!(ann.extent, Extent::Annulus { r: 6.0, r_inner: 2.0 });
    assert_eq!(ann.angle_deg, 20.0);
}

#[test]
fn left_top_are_derived_from_center_and_size() {
    let mut rect = Region::rectangle("r", vector![10.0, 20.0], 6.0, 8.0);
    assert_eq!((rect.left(), rect.top()), (7.0, 16.0));
    assert_eq!((rect.right(), rect.bottom()), (13.0, 24.0));
    rect.set_center(vector![0.0, 0.0]);
    assert_eq!((rect.left(), rect.top()), (-3.0, -4.0));

    let circ = Region::circle("c", vector![5.0, 5.0], 2.5);
    assert_eq!((circ.left(), circ.top()), (2.5, 2.5));
}

#[test]
fn extent_accessors() {
    let e = Extent::Annulus { r: 6.0, r_inner: 2.0 };
    assert_eq!(e.shape(), RoiShape::Annulus);
    assert_eq!(e.bbox_size(), (12.0, 12.0));
    assert_eq!(e.outer_radius(), 6.0);
    assert_eq!(e.inner_radius(), 2.0);
    let r = Extent::Rectangle { width: 3.0, height: 4.0 };
    assert_eq!(r.outer_radius(), 0.0);
    assert_eq!(r.inner_radius(), 0.0);
}

#[test]
fn role_defaults_to_inspection() {
    assert_eq!(RoiRole::default(), RoiRole::Inspection);
    assert!(RoiRole::Master2Search.is_master());
    assert!(!RoiRole::Inspection.is_master());
}

#[test]
fn json_accepts_angle_alias_and_shape_tag() {
    let json = r#"{"id":"r2","shape":"Circle","cx":6.0,"cy":2.0,"r":5.0,"AngleDeg":-5.0}"#;
    let region: Region = serde_json::from_str(json).unwrap();
    assert_eq!(region.shape(), RoiShape::Circle);
    assert_eq!(region.role, RoiRole::Inspection);
    assert_eq!(region.angle_deg, -5.0);
    assert_eq!(region.center(), vector![6.0, 2.0]);

    let back = serde_json::to_value(&region).unwrap();
    assert_eq!(back["shape"], "Circle");
    assert_eq!(back["angle_deg"], -5.0);
    assert!(back.get("label").is_none());
}

#[test]
fn annulus_json_keeps_inner_radius() {
    let ann = Region::annulus("a", vector![150.0, 120.0], 60.0, 25.0).with_angle_deg(12.5);
    let json = serde_json::to_string(&ann).unwrap();
    let back: Region = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ann);
    assert_eq!(back.extent.inner_radius(), 25.0);
}
