use brewgraph_ingest_table::{load_table, TableFormat};
use std::fs;

#[test]
fn load_table_infers_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("brews.csv");
    fs::write(&csv_path, "brew_id,dose_g\nB1,18\n").unwrap();
    let table = load_table(&csv_path, None).expect("csv");
    assert_eq!(table.len(), 1);
    assert_eq!(table.row(0).unwrap().get("dose_g"), Some("18"));

    let json_path = dir.path().join("brews.json");
    fs::write(&json_path, r#"[{"brew_id": "B1", "dose_g": 18.5}]"#).unwrap();
    let table = load_table(&json_path, None).expect("json");
    assert_eq!(table.row(0).unwrap().get("dose_g"), Some("18.5"));
}

#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brews.txt");
    fs::write(&path, "brew_id\tdose_g\nB1\t18\n").unwrap();

    assert!(load_table(&path, None).is_err());
    let table = load_table(&path, Some(TableFormat::TSV)).expect("tsv");
    assert_eq!(table.columns(), &["brew_id", "dose_g"]);
}

#[test]
fn missing_file_error_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.csv");
    let err = load_table(&path, None).unwrap_err();
    assert!(format!("{err:#}").contains("nope.csv"));
}
