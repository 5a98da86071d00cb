use std::collections::BTreeMap;

use echem_viewer::data::export::{export_to_path, to_json, write_csv, ExportError, ExportFormat};
use echem_viewer::data::{Cell, DataTable, Instrument, MetadataValue, ParsedData, Technique};

fn sample() -> ParsedData {
    let mut metadata = BTreeMap::new();
    metadata.insert("scan_rate".to_string(), MetadataValue::Float(0.05));
    let mut units = BTreeMap::new();
    units.insert("Ewe".to_string(), "V".to_string());
    ParsedData {
        technique: Technique::CV,
        instrument: Instrument::Generic,
        metadata,
        data: DataTable::new(
            vec!["Ewe/V".into(), "note".into()],
            vec![
                vec![Cell::Number(0.1), Cell::Text("start, ramp".into())],
                vec![Cell::Number(0.2), Cell::Null],
            ],
        ),
        units,
    }
}

#[test]
fn csv_has_header_and_quoted_fields() {
    let mut buf = Vec::new();
    write_csv(&sample(), &mut buf, false).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text, "Ewe/V,note\n0.1,\"start, ramp\"\n0.2,\n");
}

#[test]
fn excel_csv_starts_with_bom() {
    let mut buf = Vec::new();
    write_csv(&sample(), &mut buf, true).unwrap();
    assert!(buf.starts_with("\u{feff}".as_bytes()));
}

#[test]
fn empty_table_is_not_exported() {
    let mut data = sample();
    data.data = DataTable::new(vec!["a".into()], Vec::new());
    let err = write_csv(&data, Vec::new(), false).unwrap_err();
    assert!(matches!(err, ExportError::Empty));
}

#[test]
fn json_keeps_structure() {
    let json: serde_json::Value = serde_json::from_str(&to_json(&sample()).unwrap()).unwrap();
    assert_eq!(json["technique"], "CV");
    assert_eq!(json["metadata"]["scan_rate"], 0.05);
    assert_eq!(json["units"]["Ewe"], "V");
    assert_eq!(json["data"]["columns"][1], "note");
    assert_eq!(json["data"]["rows"][0][0], 0.1);
    assert!(json["data"]["rows"][1][1].is_null());
}

#[test]
fn export_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    export_to_path(&sample(), &path, ExportFormat::Csv).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Ewe/V,note\n"));
}

#[test]
fn rejected_export_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let mut data = sample();
    data.data = DataTable::new(vec!["a".into()], Vec::new());

    let err = export_to_path(&data, &path, ExportFormat::ExcelCsv).unwrap_err();
    assert!(matches!(err.downcast_ref::<ExportError>(), Some(ExportError::Empty)));
    assert!(!path.exists());
}
