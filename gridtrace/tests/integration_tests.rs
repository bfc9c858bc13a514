//! End-to-end tests: project files through the study facade

use std::io::Write;
use std::path::PathBuf;

use gridtrace::prelude::*;
use gridtrace::protection::DeviceKind;
use gridtrace::GridTraceError;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_study_ring_main() {
    let result = GridTraceCore::study_file(&fixture_path("ring_main.json")).expect("Should study");

    assert_eq!(result.topology.node_count, 4);
    assert_eq!(result.topology.virtual_count, 1);
    assert_eq!(result.devices.len(), 2);

    let relay = &result.devices[0];
    assert_eq!(relay.title, "Feeder relay");
    assert_eq!(relay.kind, DeviceKind::Protection);
    assert_eq!(relay.upper_points, 30);
    assert_eq!(relay.lower_points, 30);
    assert!(!relay.degenerate);
    let region = relay.region.as_ref().expect("Should have a region");
    assert_eq!(region.polygon.len(), 60);

    let damage = &result.devices[1];
    assert_eq!(damage.kind, DeviceKind::Damage);
    assert!(damage.region.is_none());
    assert_eq!(damage.graph.traces.len(), 1);
    assert_eq!(damage.graph.title, "Cable damage - Damage curve");
}

#[test]
fn test_study_is_reproducible() {
    let path = fixture_path("ring_main.json");
    let a = GridTraceCore::study_file(&path).unwrap();
    let b = GridTraceCore::study_file(&path).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_degenerate_device_is_recoverable() {
    let result = GridTraceCore::study_file(&fixture_path("degenerate_device.json")).unwrap();
    let device = &result.devices[0];
    assert!(device.degenerate);
    assert!(device.region.is_none());
    assert!(device.graph.traces.is_empty());
    // One sampled point still comes back for inspection.
    assert_eq!(device.upper_points, 1);
}

#[test]
fn test_unknown_curve_function_fails_parse() {
    let err = GridTraceCore::study_file(&fixture_path("bad_curve.json")).unwrap_err();
    match err {
        GridTraceError::Parse(msg) => {
            assert!(msg.contains("unknown curve function"), "got: {}", msg)
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let err = GridTraceCore::study_file(&fixture_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, GridTraceError::Io(_)));
}

#[test]
fn test_load_project_from_scratch_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "drawings": [
                {{ "elements": [ {{ "groups": [ {{ "ports": [ {{ "x": 1, "y": 1 }} ] }} ] }} ] }}
            ]
        }}"#
    )
    .unwrap();

    let report = GridTraceCore::resolve_file(file.path()).unwrap();
    assert_eq!(report.node_count, 1);
    assert_eq!(report.ports[0].port, "(0,1,1)");
}
