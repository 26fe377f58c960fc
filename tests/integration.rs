//! Integration tests: parse a config document, generate C and TypeScript
//! artifacts, and check the cross-target layout guarantees on the emitted
//! text (wire sizes, field order, endianness decisions, capacity guards).

use cdlgen::generate::ArtifactKind;
use cdlgen::layout::{field_offsets, wire_size};
use cdlgen::{generate_config, parse_resolved, write_artifacts};

const TELEMETRY: &str = r#"{"containers": [
  {"name": "Telemetry", "description": "Thermal status record", "items": [
    {"name": "temp", "type": "int16", "description": "Temperature",
     "byteOrder": "big", "units": "degC", "isArray": false, "length": 0},
    {"name": "flags", "type": "uint8", "description": "Status flags",
     "byteOrder": "", "units": "", "isArray": true, "length": 4}
  ]}
]}"#;

const ADCS: &str = r#"{"containers": [
  {"name": "ADCSSensorData", "description": "Raw sensor data", "items": [
    {"name": "magnetometerReadings", "type": "int16", "description": "Raw magnetometer readings",
     "byteOrder": "little", "units": "nT", "isArray": true, "length": 3},
    {"name": "gyroscopeReadings", "type": "float", "description": "Gyroscope readings",
     "byteOrder": "little", "units": "rad/s", "isArray": true, "length": 3},
    {"name": "sensorTimestamp", "type": "uint32", "description": "Timestamp",
     "byteOrder": "little", "units": "ms", "isArray": false, "length": 0},
    {"name": "sensorsEnabled", "type": "uint8", "description": "Bitmask",
     "byteOrder": "", "units": "", "isArray": false, "length": 0}
  ]},
  {"name": "ADCSActuatorCommands", "description": "Actuator commands", "items": [
    {"name": "reactionWheelSpeeds", "type": "int16", "description": "Wheel speeds",
     "byteOrder": "", "units": "rpm", "isArray": true, "length": 4},
    {"name": "controlMode", "type": "uint8", "description": "Control mode",
     "byteOrder": "", "units": "", "isArray": false, "length": 0}
  ]}
]}"#;

fn artifact<'a>(
    report: &'a cdlgen::RunReport,
    kind: ArtifactKind,
    file_name: &str,
) -> &'a cdlgen::Artifact {
    report
        .artifacts
        .iter()
        .find(|a| a.kind == kind && a.file_name == file_name)
        .unwrap_or_else(|| panic!("missing artifact {}", file_name))
}

#[test]
fn telemetry_scenario_wire_size_and_artifacts() {
    let resolved = parse_resolved(TELEMETRY).expect("parse");
    let container = resolved.get_container("Telemetry").expect("container");
    assert_eq!(wire_size(container), 6, "2 (int16) + 4 (uint8[4])");

    let report = generate_config(&resolved);
    assert!(report.is_success());
    let names: Vec<&str> = report.artifacts.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(names, vec!["telemetry.h", "telemetry.c", "Telemetry.ts"]);
}

#[test]
fn telemetry_c_swaps_big_endian_and_guards_capacity() {
    let resolved = parse_resolved(TELEMETRY).expect("parse");
    let report = generate_config(&resolved);
    let source = &artifact(&report, ArtifactKind::CSource, "telemetry.c").contents;

    // big-endian int16 swaps on both paths
    assert!(source.contains("#define SWAP_UINT16"));
    assert!(source.contains("int16_t temp_swapped = SWAP_UINT16((uint16_t)p_data->temp);")
        || source.contains("uint16_t temp_swapped = SWAP_UINT16((uint16_t)p_data->temp);"));
    assert!(source.contains("p_data->temp = (int16_t)SWAP_UINT16(temp_raw);"));

    // per-field capacity guards: 2 bytes for temp, 4 for the flags array
    assert!(source.contains("if (offset + 2 > buffer_size)"));
    assert!(source.contains("if (offset + 4 > buffer_size)"));

    // serializing into a buffer one byte too small fails before the write
    assert!(source.contains("return -1;"));
    assert!(source.contains("return (int)offset;"));
}

#[test]
fn telemetry_ts_allocates_exact_size_with_big_endian_flag() {
    let resolved = parse_resolved(TELEMETRY).expect("parse");
    let report = generate_config(&resolved);
    let ts = &artifact(&report, ArtifactKind::TypeScript, "Telemetry.ts").contents;

    assert!(ts.contains("const buffer = new ArrayBuffer(6);"));
    assert!(ts.contains("view.setInt16(offset, data.temp, false);"));
    assert!(ts.contains("result.temp = view.getInt16(offset, false);"));
    // uint8 array: no endian flag, one byte per element
    assert!(ts.contains("view.setUint8(offset, data.flags[i]);"));
    assert!(ts.contains("flags: Array(4).fill(0)"));
}

#[test]
fn cross_target_field_order_is_identical() {
    let resolved = parse_resolved(ADCS).expect("parse");
    let report = generate_config(&resolved);
    let container = resolved.get_container("ADCSSensorData").expect("container");

    let source = &artifact(&report, ArtifactKind::CSource, "adcssensordata.c").contents;
    let ts = &artifact(&report, ArtifactKind::TypeScript, "ADCSSensorData.ts").contents;

    // both serializers must visit fields in declaration order
    let c_serialize = &source[source.find("_serialize").expect("serialize fn")..];
    let ts_serialize = &ts[ts.find("export function serialize").expect("serialize fn")..];
    let mut last_c = 0;
    let mut last_ts = 0;
    for (name, _) in field_offsets(container) {
        let c_pos = c_serialize.find(&format!("p_data->{}", name));
        let ts_pos = ts_serialize.find(&format!("data.{}", name));
        let c_pos = c_pos.unwrap_or_else(|| panic!("C serialize missing {}", name));
        let ts_pos = ts_pos.unwrap_or_else(|| panic!("TS serialize missing {}", name));
        assert!(c_pos > last_c, "C emits {} out of order", name);
        assert!(ts_pos > last_ts, "TS emits {} out of order", name);
        last_c = c_pos;
        last_ts = ts_pos;
    }

    // and agree on the total size
    assert_eq!(wire_size(container), 3 * 2 + 3 * 4 + 4 + 1);
    assert!(ts.contains("const buffer = new ArrayBuffer(23);"));
}

#[test]
fn adcs_little_endian_needs_no_swap_helpers() {
    let resolved = parse_resolved(ADCS).expect("parse");
    let report = generate_config(&resolved);
    let source = &artifact(&report, ArtifactKind::CSource, "adcssensordata.c").contents;
    assert!(!source.contains("SWAP_UINT"), "no big-endian fields, no helpers");
    // arrays copy in one memcpy block
    assert!(source.contains("memcpy(ptr + offset, p_data->magnetometerReadings, 6);"));
    let ts = &artifact(&report, ArtifactKind::TypeScript, "ADCSSensorData.ts").contents;
    assert!(ts.contains("view.setFloat32(offset, data.gyroscopeReadings[i], true);"));
}

#[test]
fn header_matches_source_symbols() {
    let resolved = parse_resolved(ADCS).expect("parse");
    let report = generate_config(&resolved);
    let header = &artifact(&report, ArtifactKind::CHeader, "adcsactuatorcommands.h").contents;
    let source = &artifact(&report, ArtifactKind::CSource, "adcsactuatorcommands.c").contents;

    assert!(header.contains("#ifndef ADCSACTUATORCOMMANDS_H"));
    assert!(header.contains("int16_t reactionWheelSpeeds[4];"));
    assert!(header.contains("} ADCSActuatorCommands_t;"));
    for symbol in [
        "adcs_actuator_commands_init",
        "adcs_actuator_commands_serialize",
        "adcs_actuator_commands_deserialize",
    ] {
        assert!(header.contains(symbol), "header missing {}", symbol);
        assert!(source.contains(symbol), "source missing {}", symbol);
    }
    assert!(source.contains("#include \"adcsactuatorcommands.h\""));
}

#[test]
fn unknown_type_tag_does_not_abort_generation() {
    let resolved = parse_resolved(
        r#"{"containers": [{"name": "Mixed", "items": [
            {"name": "before", "type": "uint16"},
            {"name": "pos", "type": "vector3"},
            {"name": "after", "type": "uint32"}
        ]}]}"#,
    )
    .expect("parse");
    let container = resolved.get_container("Mixed").expect("container");
    // the sentinel field occupies no wire bytes in either target
    assert_eq!(wire_size(container), 6);
    assert_eq!(
        field_offsets(container),
        vec![
            ("before".to_string(), 0),
            ("pos".to_string(), 2),
            ("after".to_string(), 2),
        ]
    );

    let report = generate_config(&resolved);
    assert!(report.is_success());
    let source = &report.artifacts[1].contents;
    assert!(source.contains("memcpy(ptr + offset, &p_data->before, 2);"));
    assert!(source.contains("memcpy(ptr + offset, &p_data->after, 4);"));
    assert!(source.contains("unsupported type \"vector3\""));
    let ts = &report.artifacts[2].contents;
    assert!(ts.contains("pos: any;"));
    assert!(ts.contains("const buffer = new ArrayBuffer(6);"));
}

#[test]
fn string_fields_keep_sibling_offsets_stable() {
    let resolved = parse_resolved(
        r#"{"containers": [{"name": "Tagged", "items": [
            {"name": "label", "type": "string"},
            {"name": "labels", "type": "string", "isArray": true, "length": 2},
            {"name": "value", "type": "uint16"}
        ]}]}"#,
    )
    .expect("parse");
    let container = resolved.get_container("Tagged").expect("container");
    // string scalar reserves the 4-byte handle sentinel, string array nothing
    assert_eq!(wire_size(container), 6);

    let report = generate_config(&resolved);
    let source = &report.artifacts[1].contents;
    // C: null-terminated write, borrowed-pointer read
    assert!(source.contains("strlen(p_data->label) + 1;"));
    assert!(source.contains("p_data->label = (char*)(ptr + offset);"));
    assert!(source.contains("string arrays are not supported"));

    let ts = &report.artifacts[2].contents;
    // TS: fixed placeholder keeps `value` at a stable offset
    assert!(ts.contains("offset += 4;"));
    assert!(ts.contains("result.label = '';"));
    assert!(ts.contains("labels: Array(2).fill('')"));
    assert!(!ts.contains("data.labels[i]"), "no accessor code for string arrays");
}

#[test]
fn failures_are_aggregated_per_container() {
    let resolved = parse_resolved(
        r#"{"containers": [
            {"name": "Ok1", "items": [{"name": "x", "type": "uint8"}]},
            {"name": "BadLength", "items": [
                {"name": "xs", "type": "uint8", "isArray": true, "length": 0}
            ]},
            {"name": "Ok2", "items": [{"name": "y", "type": "uint8"}]}
        ]}"#,
    )
    .expect("parse");
    let report = generate_config(&resolved);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].container, "BadLength");
    assert!(report.failures[0].error.to_string().contains("length > 0"));
    // both siblings still produced their full artifact triple
    assert_eq!(report.artifacts.len(), 6);
}

#[test]
fn write_artifacts_creates_files_on_disk() {
    let resolved = parse_resolved(TELEMETRY).expect("parse");
    let report = generate_config(&resolved);
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("generated");
    write_artifacts(&out, &report.artifacts).expect("write");

    for name in ["telemetry.h", "telemetry.c", "Telemetry.ts"] {
        let path = out.join(name);
        let contents = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("read {}: {}", path.display(), e));
        assert!(!contents.is_empty());
    }
}
