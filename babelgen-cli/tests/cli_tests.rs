//! Integration tests for babelgen-cli.
//!
//! These tests drive the library end to end: configuration loading, model
//! loading, rendering and writing into a temporary output directory.

use proptest::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use babelgen_cli::{
    config::{CliArgs, Config, ConfigManager},
    error::{CliError, ModelError},
    generator::{load_model, ModelGenerator},
    writer::{FileStatus, OutputSync, SyncOutcome},
};

/// Get the path to test fixtures.
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn config_for(dir: &TempDir, languages: &[&str], package: &str) -> Config {
    ConfigManager::merge_cli_args(
        Config::default(),
        &CliArgs {
            output: Some(dir.path().to_path_buf()),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            package: Some(package.to_string()),
            ..Default::default()
        },
    )
}

// =============================================================================
// Model Loading
// =============================================================================

#[test]
fn test_load_fixture_model() {
    let doc = load_model(&fixtures_path().join("shop.json")).unwrap();
    assert_eq!(doc.filename, "shop.babel");
    assert_eq!(doc.declarations.len(), 3);
    assert_eq!(doc.services().count(), 1);
}

#[test]
fn test_missing_model() {
    let err = load_model(&fixtures_path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CliError::Model(ModelError::NotFound { .. })));
}

#[test]
fn test_invalid_model_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{ "filename": "x.babel", "declarations": [ { "kind": "widget" } ] }"#).unwrap();

    let err = load_model(&path).unwrap_err();
    assert!(matches!(err, CliError::Model(ModelError::InvalidJson { .. })));
    assert!(err.to_string().contains("broken.json"));
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generate_and_write_java() {
    let dir = TempDir::new().unwrap();
    let doc = load_model(&fixtures_path().join("shop.json")).unwrap();
    let output = ModelGenerator::new(config_for(&dir, &["java"], "com.acme.shop"))
        .unwrap()
        .generate(&doc)
        .unwrap();

    let outcomes = OutputSync::new(false).sync_all(&output.files).unwrap();
    assert_eq!(outcomes, vec![SyncOutcome::Created; 3]);

    let order = fs::read_to_string(dir.path().join("com/acme/shop/Order.java")).unwrap();
    assert!(order.starts_with("// AUTO-GENERATED FILE - DO NOT MODIFY\n// Generated from shop.babel\n"));
    assert!(order.contains("package com.acme.shop;"));
    assert!(order.contains("/**\n * A customer order\n */\npublic class Order implements Serializable {"));
    // No scopes configured, so the java attribute is dropped.
    assert!(!order.contains("@NotNull"));

    let orders = fs::read_to_string(dir.path().join("com/acme/shop/Orders.java")).unwrap();
    assert!(orders.contains("\t\tvoid cancel(Long orderId);\n"));
}

#[test]
fn test_generate_go_with_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("babelgen.toml");
    fs::write(
        &config_path,
        format!(
            r#"
[output]
dir = "{}"
languages = ["go"]

[format]
indent = "spaces2"

[packages]
go = "github.com/acme/shop"
"#,
            dir.path().join("gen").display()
        ),
    )
    .unwrap();

    let config = ConfigManager::load(Some(&config_path)).unwrap();
    let doc = load_model(&fixtures_path().join("shop.json")).unwrap();
    let output = ModelGenerator::new(config).unwrap().generate(&doc).unwrap();
    OutputSync::new(false).sync_all(&output.files).unwrap();

    let order = fs::read_to_string(dir.path().join("gen/order.go")).unwrap();
    assert!(order.contains("package shop\n"));
    assert!(order.contains("\n  OrderId *int64 `json:\"order_id,string,omitempty\"`\n"));
    assert!(dir.path().join("gen/orders.go").exists());
    assert!(dir.path().join("gen/status.go").exists());
}

#[test]
fn test_scopes_enable_attributes() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(&dir, &["java"], "com.acme");
    config.attributes.scopes = vec!["java".to_string()];

    let doc = load_model(&fixtures_path().join("shop.json")).unwrap();
    let output = ModelGenerator::new(config).unwrap().generate(&doc).unwrap();
    let order = &output.files[1].contents;
    assert!(order.contains("\t@NotNull\n\t@SerializedName(\"total\")\n"));
}

#[test]
fn test_dry_run_leaves_output_empty() {
    let dir = TempDir::new().unwrap();
    let doc = load_model(&fixtures_path().join("shop.json")).unwrap();
    let output = ModelGenerator::new(config_for(&dir, &["java", "go"], "acme"))
        .unwrap()
        .generate(&doc)
        .unwrap();

    let outcomes = OutputSync::new(true).sync_all(&output.files).unwrap();
    assert_eq!(outcomes, vec![SyncOutcome::Planned(FileStatus::Missing); 6]);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_regeneration_is_stable() {
    let dir = TempDir::new().unwrap();
    let doc = load_model(&fixtures_path().join("shop.json")).unwrap();
    let generator = ModelGenerator::new(config_for(&dir, &["java", "go"], "acme")).unwrap();

    let first = generator.generate(&doc).unwrap();
    OutputSync::new(false).sync_all(&first.files).unwrap();

    let second = generator.generate(&doc).unwrap();
    for file in &second.files {
        assert_eq!(fs::read_to_string(&file.path).unwrap(), file.contents);
    }
    let outcomes = OutputSync::new(false).sync_all(&second.files).unwrap();
    assert!(outcomes.iter().all(|o| *o == SyncOutcome::Unchanged));
}

#[test]
fn test_hand_edited_file_is_reported_and_restored() {
    let dir = TempDir::new().unwrap();
    let doc = load_model(&fixtures_path().join("shop.json")).unwrap();
    let output = ModelGenerator::new(config_for(&dir, &["go"], "acme"))
        .unwrap()
        .generate(&doc)
        .unwrap();
    let sync = OutputSync::new(false);
    sync.sync_all(&output.files).unwrap();

    let edited = &output.files[1];
    fs::write(&edited.path, "// edited by hand\n").unwrap();
    fs::remove_file(&output.files[2].path).unwrap();

    let statuses: Vec<_> = output
        .files
        .iter()
        .map(|f| FileStatus::of(f).unwrap())
        .collect();
    assert_eq!(
        statuses,
        vec![FileStatus::Current, FileStatus::Stale, FileStatus::Missing]
    );

    let outcomes = sync.sync_all(&output.files).unwrap();
    assert_eq!(
        outcomes,
        vec![SyncOutcome::Unchanged, SyncOutcome::Updated, SyncOutcome::Created]
    );
    assert_eq!(fs::read_to_string(&edited.path).unwrap(), edited.contents);
}

#[test]
fn test_enum_value_beyond_int_range_is_invalid_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.json");
    fs::write(
        &path,
        r#"{ "filename": "big.babel", "declarations": [
            { "kind": "enum", "name": "Big", "values": [ { "name": "Huge", "value": 3000000000 } ] }
        ] }"#,
    )
    .unwrap();

    let err = load_model(&path).unwrap_err();
    assert!(matches!(err, CliError::Model(ModelError::InvalidJson { .. })));
}

#[test]
fn test_const_block_in_model() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("limits.json");
    fs::write(
        &path,
        r#"{ "filename": "limits.babel", "declarations": [
            { "kind": "const", "name": "Limits", "values": [
                { "name": "MaxItems", "value": { "kind": "int", "value": 100 } }
            ] }
        ] }"#,
    )
    .unwrap();

    let doc = load_model(&path).unwrap();
    let output = ModelGenerator::new(config_for(&dir, &["java", "go"], "com.acme"))
        .unwrap()
        .generate(&doc)
        .unwrap();
    let java = output.files.iter().find(|f| f.language == "java").unwrap();
    assert!(java.contents.contains("public static final int MaxItems = 100;"));
    let go = output.files.iter().find(|f| f.language == "go").unwrap();
    assert!(go.contents.contains("package acme\n"));
    assert!(go.contents.contains("\tLimitsMaxItems = 100\n"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn cli_package_overrides_config_file(
        file_package in "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
        cli_package in "[a-z]{1,8}(\\.[a-z]{1,8}){0,2}",
    ) {
        let mut config = Config::default();
        config.packages.insert("java".to_string(), file_package);
        let merged = ConfigManager::merge_cli_args(
            config,
            &CliArgs {
                package: Some(cli_package.clone()),
                ..Default::default()
            },
        );
        prop_assert_eq!(merged.package_for("java"), cli_package.as_str());
    }
}
