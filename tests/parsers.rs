use std::io::Write;

use echem_viewer::data::{
    load_file, parse_file, Cell, Instrument, LoadError, MetadataValue, RawFile, Technique,
};

fn raw(name: &str, text: &str) -> RawFile {
    RawFile::new(name, text.as_bytes().to_vec())
}

const GAMRY_CV: &str = "EXPLAIN\n\
TAG\tCV\n\
TITLE\tLABEL\tCyclic Voltammetry\tTest &Identifier\n\
VSTEP\tQUANT\t0.002\tStep Size (V)\n\
CYCLES\tIQUANT\t3\tCycles (#)\n\
CURVE\tTABLE\t3\n\
\tPt\tT\tVf\tIm\n\
\t#\ts\tV vs. Ref.\tA\n\
\t0\t0.02\t-0.5\t-1.2E-06\n\
\t1\t0.04\tbad\t-1.1E-06\n\
\t2\t0.06\t-0.496\t-1.0E-06\n";

// ---------------------------------------------------------------------------
// Generic CSV / TXT
// ---------------------------------------------------------------------------

#[test]
fn csv_keeps_column_order_and_row_count() {
    let parsed = parse_file(&raw(
        "scan.csv",
        "Ewe/V,I/mA,label\n0.1,0.5,a\n0.2,0.7,b\n0.3,0.9,c\n",
    ))
    .unwrap();

    assert_eq!(parsed.columns(), ["Ewe/V", "I/mA", "label"]);
    assert_eq!(parsed.rows().len(), 3);
    assert!(parsed.rows().iter().all(|r| r.len() == 3));
    assert_eq!(parsed.rows()[1][0], Cell::Number(0.2));
    assert_eq!(parsed.rows()[2][2], Cell::Text("c".into()));
    assert_eq!(parsed.instrument, Instrument::Generic);
    assert_eq!(parsed.technique, Technique::CV);
    assert_eq!(parsed.units.get("Ewe").map(String::as_str), Some("V"));
    assert_eq!(parsed.units.get("I").map(String::as_str), Some("mA"));
}

#[test]
fn ragged_rows_are_padded_and_truncated() {
    let parsed = parse_file(&raw("ragged.csv", "a,b,c\n1,2\n3,4,5,6\n")).unwrap();
    assert_eq!(parsed.rows()[0], vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Null]);
    assert_eq!(parsed.rows()[1].len(), 3);
}

#[test]
fn rows_of_empty_fields_are_kept() {
    let parsed = parse_file(&raw("gaps.csv", "a,b\n1,2\n\n,\n3,4\n")).unwrap();
    assert_eq!(parsed.rows().len(), 3);
    assert_eq!(parsed.rows()[1], vec![Cell::Null, Cell::Null]);
}

#[test]
fn semicolon_files_and_comment_metadata() {
    let parsed = parse_file(&raw(
        "step.txt",
        "# technique: chronoamperometry\n# step: 0.6\nTime (s);Current (A)\n0.1;2e-5\n0.2;1.5e-5\n",
    ))
    .unwrap();

    assert_eq!(parsed.columns(), ["Time (s)", "Current (A)"]);
    assert_eq!(parsed.technique, Technique::CA);
    assert_eq!(parsed.metadata.get("step"), Some(&MetadataValue::Float(0.6)));
    assert_eq!(
        parsed.metadata.get("delimiter"),
        Some(&MetadataValue::String(";".into()))
    );
}

#[test]
fn duplicate_headers_become_unique() {
    let parsed = parse_file(&raw("dup.csv", "t,I,I\n1,2,3\n")).unwrap();
    assert_eq!(parsed.columns(), ["t", "I", "I_1"]);
}

#[test]
fn unknown_extension_is_a_format_error() {
    let err = parse_file(&raw("scan.xlsx", "a,b\n1,2\n")).unwrap_err();
    assert!(matches!(err, LoadError::Format { .. }));
}

#[test]
fn extension_dispatch_ignores_case() {
    assert!(parse_file(&raw("SCAN.CSV", "a,b\n1,2\n")).is_ok());
}

// ---------------------------------------------------------------------------
// Gamry DTA
// ---------------------------------------------------------------------------

#[test]
fn gamry_reads_header_units_and_rows() {
    let parsed = parse_file(&raw("cv.DTA", GAMRY_CV)).unwrap();

    assert_eq!(parsed.instrument, Instrument::Gamry);
    assert_eq!(parsed.technique, Technique::CV);
    assert_eq!(parsed.columns(), ["Pt", "T", "Vf", "Im"]);
    assert_eq!(parsed.rows().len(), 3);
    assert_eq!(parsed.units.get("Vf").map(String::as_str), Some("V vs. Ref."));
    assert_eq!(parsed.metadata.get("CYCLES"), Some(&MetadataValue::Integer(3)));
    assert_eq!(parsed.metadata.get("VSTEP"), Some(&MetadataValue::Float(0.002)));
}

#[test]
fn gamry_non_numeric_cells_become_zero() {
    let parsed = parse_file(&raw("cv.dta", GAMRY_CV)).unwrap();
    assert_eq!(parsed.rows()[1][2], Cell::Number(0.0));
    assert_eq!(parsed.rows()[1][3], Cell::Number(-1.1e-6));
}

#[test]
fn gamry_without_curve_tag_fails() {
    let err = parse_file(&raw("empty.dta", "TAG\tCV\nVSTEP\tQUANT\t0.002\tStep\n")).unwrap_err();
    match err {
        LoadError::Parse { message, .. } => assert_eq!(message, "no data section found"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn gamry_data_region_skips_blanks_tags_and_repeated_headers() {
    let text = "TAG\tCV\n\
CURVE\tTABLE\t2\n\
\tPt\tT\tVf\tIm\n\
\t#\ts\tV vs. Ref.\tA\n\
\t0\t0.02\t-0.5\t-1.2E-06\n\
\n\
TAG\tCV\n\
\t1\t0.04\t-0.498\t-1.1E-06\n\
CURVE2\tTABLE\t2\n\
\tPt\tT\tVf\tIm\n\
\t#\ts\tV vs. Ref.\tA\n\
\n\
\t2\t0.06\tNaN\tinf\n";
    let parsed = parse_file(&raw("two_cycles.dta", text)).unwrap();

    assert_eq!(parsed.columns(), ["Pt", "T", "Vf", "Im"]);
    assert_eq!(parsed.rows().len(), 3);
    assert!(parsed
        .rows()
        .iter()
        .all(|r| r.iter().all(|c| matches!(c, Cell::Number(_)))));
    assert_eq!(parsed.rows()[1][0], Cell::Number(1.0));
    assert_eq!(parsed.rows()[2][2], Cell::Number(0.0));
    assert_eq!(parsed.rows()[2][3], Cell::Number(0.0));
}

#[test]
fn gamry_impedance_curve_is_eis() {
    let text = "TAG\tEISPOT\n\
ZCURVE\tTABLE\t2\n\
\tPt\tFreq\tZreal\tZimag\tZmod\tZphz\n\
\t#\tHz\tohm\tohm\tohm\t°\n\
\t0\t100000\t12.1\t-0.5\t12.11\t-2.4\n\
\t1\t10000\t13.0\t-4.8\t13.86\t-20.3\n";
    let parsed = parse_file(&raw("eis.dta", text)).unwrap();
    assert_eq!(parsed.technique, Technique::EIS);
    assert_eq!(parsed.rows().len(), 2);
}

// ---------------------------------------------------------------------------
// BioLogic MPT
// ---------------------------------------------------------------------------

#[test]
fn biologic_header_block_and_decimal_commas() {
    let text = "EC-Lab ASCII FILE\n\
Nb header lines : 5\n\
\n\
Cyclic Voltammetry\n\
mode\ttime/s\tEwe/V\t<I>/mA\n\
2\t0,000\t0,100\t0,002\n\
2\t0,100\t0,105\t0,003\n";
    let parsed = parse_file(&raw("cv.mpt", text)).unwrap();

    assert_eq!(parsed.instrument, Instrument::BioLogic);
    assert_eq!(parsed.technique, Technique::CV);
    assert_eq!(parsed.columns(), ["mode", "time/s", "Ewe/V", "<I>/mA"]);
    assert_eq!(parsed.rows()[1][2], Cell::Number(0.105));
    assert_eq!(
        parsed.metadata.get("technique_name"),
        Some(&MetadataValue::String("Cyclic Voltammetry".into()))
    );
}

#[test]
fn biologic_header_count_past_end_fails() {
    let text = "EC-Lab ASCII FILE\nNb header lines : 40\n";
    let err = parse_file(&raw("short.mpt", text)).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

// ---------------------------------------------------------------------------
// Loading from disk
// ---------------------------------------------------------------------------

#[test]
fn load_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cycling.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(f, "\u{feff}Cycle,Capacity (mAh)\n1,180\n2,179.5\n").unwrap();
    drop(f);

    let parsed = load_file(&path).unwrap();
    assert_eq!(parsed.columns(), ["Cycle", "Capacity (mAh)"]);
    assert_eq!(parsed.technique, Technique::BatteryCycling);
}

#[test]
fn load_file_reports_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_file(&dir.path().join("nope.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("nope.csv"));
}
