use echem_viewer::data::units::{clean_column_name, extract_units, split_unit};

#[test]
fn slash_and_parenthesis_forms() {
    let units = extract_units(&["Ewe/V", "Current (mA)", "cycle number"]);
    assert_eq!(units.len(), 2);
    assert_eq!(units["Ewe"], "V");
    assert_eq!(units["Current"], "mA");
}

#[test]
fn first_slash_splits() {
    assert_eq!(
        split_unit("Q discharge/mA.h/g"),
        Some(("Q discharge".to_string(), "mA.h/g".to_string()))
    );
}

#[test]
fn headers_without_units_contribute_nothing() {
    assert_eq!(split_unit("Pt"), None);
    assert_eq!(split_unit("/V"), None);
    assert_eq!(split_unit("()"), None);
    assert!(extract_units(&["mode", "Pt"]).is_empty());
}

#[test]
fn clean_names_drop_units() {
    assert_eq!(clean_column_name("Current (mA)"), "Current");
    assert_eq!(clean_column_name("Ewe/V"), "Ewe");
    assert_eq!(clean_column_name("  freq/Hz "), "freq");
    assert_eq!(clean_column_name("Zreal"), "Zreal");
}
