use cube_logic::scan::{FaceRotation, UNSCANNED};
use cube_logic::{
    Bgr, ClassifyError, DeviceProfile, Face, FACELETS, HueThresholds, Orientation, SampleConfig,
    ScanGeometry,
};

/// Facelet `i` of the scan as a distinguishable color.
fn tagged(n: usize) -> Vec<Bgr> {
    (0..n).map(|i| Bgr::new(i as u8, 0, 0)).collect()
}

#[test]
fn test_face_rotations() {
    let face = [0, 1, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(FaceRotation::None.apply(&face), face);
    assert_eq!(FaceRotation::Half.apply(&face), [8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(
        FaceRotation::QuarterCw.apply(&face),
        [2, 5, 8, 1, 4, 7, 0, 3, 6]
    );
    // Center never moves.
    for rotation in [FaceRotation::None, FaceRotation::Half, FaceRotation::QuarterCw] {
        assert_eq!(rotation.apply(&face)[4], 4);
    }
}

#[test]
fn test_laptop_scan_keeps_order() {
    let colors = tagged(FACELETS);
    let scan = ScanGeometry::urfdlb().assemble(&colors).unwrap();
    assert_eq!(scan.colors().collect::<Vec<_>>(), colors);
}

#[test]
fn test_robot_scan_order() {
    let colors = tagged(FACELETS);
    let urfdlb = ScanGeometry::robot().to_urfdlb(&colors);
    let b_of = |i: usize| urfdlb[i].b as usize;

    // U is photographed first, upside down.
    assert_eq!(b_of(0), 8);
    assert_eq!(b_of(8), 0);
    // R is the fifth photo, a quarter turn off.
    assert_eq!(b_of(9), 36 + 2);
    assert_eq!(b_of(13), 36 + 4);
    // F is the fourth photo, D the third.
    assert_eq!(b_of(18), 27 + 8);
    assert_eq!(b_of(27), 18 + 8);
    // L last, B second and upright.
    assert_eq!(b_of(36), 45 + 2);
    assert_eq!(b_of(45), 9);
    assert_eq!(b_of(53), 17);

    // Every photo facelet lands exactly once.
    let mut seen: Vec<usize> = (0..FACELETS).map(b_of).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..FACELETS).collect::<Vec<_>>());
}

#[test]
fn test_partial_scan_is_padded() {
    let colors = tagged(18);
    let urfdlb = ScanGeometry::robot().to_urfdlb(&colors);
    assert_eq!(urfdlb.len(), FACELETS);
    // U and B scanned, the rest still gray.
    assert_eq!(urfdlb[4].b, 4);
    assert_eq!(urfdlb[49].b, 13);
    assert!(urfdlb[9..45].iter().all(|c| *c == UNSCANNED));

    assert_eq!(
        ScanGeometry::robot().assemble(&colors).unwrap_err(),
        ClassifyError::FaceletCount(18)
    );
}

#[test]
fn test_device_profiles() {
    let laptop = DeviceProfile::default();
    assert_eq!(laptop.scan, ScanGeometry::urfdlb());
    assert_eq!(laptop.start, Orientation::HOME);

    let robot = DeviceProfile::robot();
    assert_eq!(robot.start.down(), Face::R);
    assert_eq!(robot.start.front(), Face::B);
    assert_eq!(robot.scan.sides[0].face, Face::U);
    assert_eq!(robot.scan.sides[1].face, Face::B);
}

#[test]
fn test_orientation_deserialization() {
    let o: Orientation = serde_json::from_str(r#"{"down":"R","front":"B"}"#).unwrap();
    assert_eq!(o, Orientation::AFTER_ROBOT_SCAN);
    assert!(serde_json::from_str::<Orientation>(r#"{"down":"R","front":"L"}"#).is_err());
    assert_eq!(
        serde_json::to_string(&Orientation::HOME).unwrap(),
        r#"{"down":"D","front":"F"}"#
    );
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let t: HueThresholds = serde_json::from_str(r#"{"warm_max": 25}"#).unwrap();
    assert_eq!(t.warm_max, 25);
    assert_eq!(t.hue_range, 180);
    assert_eq!(t.wrapped_red_count, 5);

    let s: SampleConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(s, SampleConfig::default());
}
