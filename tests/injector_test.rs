//! Inserción en machines.js y cálculo del próximo ID

use flota::error::FleetError;
use flota::importer::MachineRecord;
use flota::injector::{self, DEFAULT_MARKER, FALLBACK_ID};
use std::fs;
use tempfile::tempdir;

fn record(id: u64, name: &str) -> MachineRecord {
    let slug = flota::slug::slugify(name);
    MachineRecord::from_images(id, name, vec![format!("/machinery/{}/image-1.webp", slug)])
        .expect("registro de prueba")
}

#[test]
fn test_next_id_from_existing_ids() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("machines.js");
    fs::write(
        &path,
        "export const machines = [\n    { id: 3 },\n    { id: 12 },\n    { id: 7 }\n];\n",
    )
    .unwrap();

    assert_eq!(injector::next_id(&path, FALLBACK_ID), 13);
}

#[test]
fn test_next_id_fallback() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("machines.js");
    fs::write(&path, "export const machines = [\n];\n").unwrap();

    assert_eq!(injector::next_id(&path, FALLBACK_ID), 20);
    assert_eq!(injector::next_id(&dir.path().join("no-existe.js"), FALLBACK_ID), 20);
}

#[test]
fn test_inject_is_pure_splice() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("machines.js");
    let original = "export const machines = [\n    { id: 1, name: \"otro\" }\n];";
    fs::write(&path, original).unwrap();

    let new_record = record(2, "Excavadora CAT 320");
    let count = injector::inject_records(&path, &[new_record.clone()], DEFAULT_MARKER).unwrap();
    assert_eq!(count, 1);

    let block = injector::render_block(&new_record).unwrap();
    let expected = format!(
        "export const machines = [\n    {{ id: 1, name: \"otro\" }}\n,\n    {}\n];",
        block
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_inject_keeps_text_after_marker() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("machines.js");
    let tail = "];\n\nexport const categories = ['a', 'b'];\n// fin\n";
    // el último "];" es el de categories: el empalme va ahí, sin adivinar
    let original = format!("export const machines = [\n    {{ id: 5 }}\n{}", tail);
    fs::write(&path, &original).unwrap();

    injector::inject_records(&path, &[record(6, "Rodillo")], DEFAULT_MARKER).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.ends_with("];\n// fin\n"));
    let last = original.rfind("];").unwrap();
    assert!(content.starts_with(&original[..last]));
}

#[test]
fn test_inject_without_marker_does_not_modify() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("machines.js");
    let original = "export const machines = [\n    { id: 5 }\n";
    fs::write(&path, original).unwrap();

    let result = injector::inject_records(&path, &[record(6, "Rodillo")], DEFAULT_MARKER);

    assert!(matches!(result, Err(FleetError::MarkerNotFound { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_inject_nothing_is_noop() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("machines.js");
    fs::write(&path, "[\n];").unwrap();

    assert_eq!(injector::inject_records(&path, &[], DEFAULT_MARKER).unwrap(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "[\n];");
}

#[test]
fn test_injected_records_are_valid_json_objects() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("machines.js");
    fs::write(&path, "[\n    {\"id\": 1}\n];").unwrap();

    let records = vec![record(2, "Camión Aljibe K-480"), record(3, "Motoconformadora")];
    injector::inject_records(&path, &records, DEFAULT_MARKER).unwrap();

    // sin el ";" final el contenido es un arreglo JSON válido
    let content = fs::read_to_string(&path).unwrap();
    let parsed: Vec<serde_json::Value> =
        serde_json::from_str(content.trim_end_matches(';')).expect("JSON válido");
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[1]["name"], "Camión Aljibe K-480");
    assert_eq!(parsed[2]["category"], "Motoniveladora");

    let back: MachineRecord = serde_json::from_value(parsed[1].clone()).unwrap();
    assert_eq!(back, records[0]);
}
