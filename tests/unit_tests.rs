use corpus_gen::config::{load_config, load_fields, parse_size};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_size_units() {
    assert_eq!(parse_size("20MB").unwrap(), 20_000_000);
    assert_eq!(parse_size("20MiB").unwrap(), 20 * 1024 * 1024);
    assert_eq!(parse_size("1024").unwrap(), 1024);
}

#[test]
fn test_parse_size_rejects_garbage() {
    let err = parse_size("lots").unwrap_err();
    assert!(err.to_string().contains("lots"));
}

#[test]
fn test_load_config_without_file() {
    let config = load_config(None).unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_load_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yml");
    fs::write(
        &path,
        "fields:\n  - name: event.id\n    cardinality: 100\n  - name: process.pid\n    range: 10\n",
    )
    .unwrap();

    let config = load_config(Some(path.as_path())).unwrap();
    assert_eq!(config.len(), 2);
    assert_eq!(config.get("event.id").unwrap().cardinality, Some(100));
    assert_eq!(config.get("process.pid").unwrap().range, Some(10.0));
}

#[test]
fn test_load_config_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yml");
    fs::write(&path, "- name: event.id\n  cardinality: 5000\n").unwrap();

    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(format!("{err:#}").contains("config.yml"));
}

#[test]
fn test_load_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fields.yml");
    fs::write(&path, "- name: host.ip\n  type: ip\n- name: up\n  type: boolean\n").unwrap();

    let fields = load_fields(&path).unwrap();
    assert_eq!(fields.field_names(), vec!["host.ip", "up"]);
}

#[test]
fn test_load_fields_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_fields(&temp_dir.path().join("missing.yml")).is_err());
}
