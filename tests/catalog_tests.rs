mod common;

use common::builders::ProjectBufferBuilder;
use common::helpers::{catalog_with, strings, write_catalog_json, write_project};
use common::setup;
use cubase_project_manager::catalog::migration::backup_path;
use cubase_project_manager::catalog::{
    migrate_catalog_file, KnownInstrumentCatalog, MigrationOutcome,
};
use cubase_project_manager::error::CatalogError;
use cubase_project_manager::models::{CatalogFormat, EditorGroup};
use cubase_project_manager::{group_by_editor, scan_file};
use std::fs;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_resolve_numbered_label_and_stranger() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let catalog = catalog_with(dir.path(), &[("Serum", Some("Xfer"))]);

    assert_eq!(catalog.resolve_editor("Serum 01").unwrap(), "Xfer");
    assert_eq!(catalog.resolve_editor("SeriousOtherThing").unwrap(), "Unknown");
}

#[test]
fn test_legacy_catalog_resolves_everything_to_unknown() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let path = write_catalog_json(dir.path(), r#"["Serum", "Pigments"]"#);
    let catalog = KnownInstrumentCatalog::load(&path).unwrap();

    assert_eq!(catalog.format(), CatalogFormat::Legacy);
    assert_eq!(catalog.resolve_editor("Serum").unwrap(), "Unknown");
}

#[test]
fn test_mutations_persist_and_legacy_shape_survives() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let path = write_catalog_json(dir.path(), r#"["Serum"]"#);

    let mut catalog = KnownInstrumentCatalog::load(&path).unwrap();
    assert!(catalog.add("Pigments", None).unwrap());
    assert!(!catalog.add("Serum", None).unwrap());
    assert!(catalog.rename("Serum", "Serum 2").unwrap());

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!(["Serum 2", "Pigments"]));

    assert!(catalog.set_editor("Pigments", Some("Arturia")).unwrap());
    let reloaded = KnownInstrumentCatalog::load(&path).unwrap();
    assert_eq!(reloaded.format(), CatalogFormat::Records);
    assert_eq!(reloaded.names(), vec!["Serum 2", "Pigments"]);
    assert_eq!(
        reloaded.get("Pigments").and_then(|r| r.editor.as_deref()),
        Some("Arturia")
    );
}

#[test]
fn test_failed_mutations_do_not_write() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let original = "[\"Serum\", \"Pigments\"]";
    let path = write_catalog_json(dir.path(), original);

    let mut catalog = KnownInstrumentCatalog::load(&path).unwrap();
    assert!(!catalog.remove("Diva").unwrap());
    assert!(!catalog.rename("Serum", "Pigments").unwrap());
    assert!(!catalog.rename("Diva", "Zebra2").unwrap());
    assert!(!catalog.set_editor("Diva", Some("u-he")).unwrap());

    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_malformed_catalog_is_parse_error() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let path = write_catalog_json(dir.path(), "[\"Serum\",");

    assert!(matches!(
        KnownInstrumentCatalog::load(&path),
        Err(CatalogError::Parse { .. })
    ));
}

#[test]
fn test_migration_twice_writes_once() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let path = write_catalog_json(dir.path(), r#"["Serum", "Pigments"]"#);

    let first = migrate_catalog_file(&path).unwrap();
    assert!(matches!(first, MigrationOutcome::Migrated { entries: 2, .. }));
    assert!(backup_path(&path).exists());

    let content = fs::read(&path).unwrap();
    let modified = fs::metadata(&path).unwrap().modified().unwrap();
    // Leave room for coarse filesystem timestamps
    thread::sleep(Duration::from_millis(50));

    let second = migrate_catalog_file(&path).unwrap();
    assert_eq!(second, MigrationOutcome::AlreadyMigrated);
    assert_eq!(fs::read(&path).unwrap(), content);
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);

    let catalog = KnownInstrumentCatalog::load(&path).unwrap();
    assert_eq!(catalog.format(), CatalogFormat::Records);
    assert_eq!(catalog.names(), vec!["Serum", "Pigments"]);
}

#[test]
fn test_scan_then_group_by_editor() {
    setup("debug");
    let dir = TempDir::new().unwrap();
    let catalog = catalog_with(
        dir.path(),
        &[
            ("Serum", Some("Xfer")),
            ("Pigments", Some("Arturia")),
            ("Analog Lab", Some("Arturia")),
            ("Retrologue", Some("Steinberg")),
            ("Mystery", None),
        ],
    );
    let project = write_project(
        dir.path(),
        "song.cpr",
        &ProjectBufferBuilder::new()
            .label("Serum 01")
            .label("Serum 02")
            .label("Analog Lab 01")
            .label("Pigments")
            .label("Retrologue")
            .build(),
    );

    let result = scan_file(&project, &catalog).unwrap();
    let groups = group_by_editor(&result.instruments, &catalog).unwrap();

    assert_eq!(
        groups,
        vec![
            EditorGroup {
                editor: "Arturia".to_string(),
                names: strings(&["Analog Lab 01", "Pigments"]),
            },
            EditorGroup {
                editor: "Steinberg".to_string(),
                names: strings(&["Retrologue"]),
            },
            EditorGroup {
                editor: "Xfer".to_string(),
                names: strings(&["Serum 01", "Serum 02"]),
            },
        ]
    );
}
