use super::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"
name: dwh
model-paths: [models]
seed-paths: [data]

vars:
  start_date: "2024-01-01"

models:
  dwh:
    staging:
      +schema: stg
    marts:
      +schema: mart

seeds:
  dwh:
    +schema: seed_data
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Lay down a small project tree and return a resolver against it.
fn resolver(temp: &TempDir, target: &str) -> NameResolver {
    write(temp.path(), "dbt_project.yml", MANIFEST);
    write(temp.path(), "models/staging/stg_orders.sql", "select 1");
    write(temp.path(), "models/marts/fct_sales.sql", "select 1");
    write(
        temp.path(),
        "models/staging/sources.yml",
        r#"
sources:
  - name: raw_shop
    tables:
      - name: orders
      - name: customers
  - name: raw_crm
    database: crm_land
    tables:
      - name: leads
"#,
    );
    write(temp.path(), "data/seeds.yml", "seeds:\n  - name: country_codes\n");

    let output: TargetOutput = serde_yaml::from_str(
        "type: athena\nschema: analytics\ndatabase: awsdatacatalog\n",
    )
    .unwrap();
    NameResolver::new(ResolverParts {
        profile_name: "dwh".to_string(),
        target_name: target.to_string(),
        output,
        manifest: serde_yaml::from_str(MANIFEST).unwrap(),
        project_root: temp.path().to_path_buf(),
    })
}

#[test]
fn test_ref_dev_target_composes_schema() {
    let temp = TempDir::new().unwrap();
    let name = resolver(&temp, "dev").resolve_ref("stg_orders").unwrap();
    assert_eq!(name.schema, "analytics_stg");
    assert_eq!(name.table, "stg_orders");
    assert_eq!(name.database.as_deref(), Some("awsdatacatalog"));
}

#[test]
fn test_ref_prod_target_uses_default_schema() {
    let temp = TempDir::new().unwrap();
    let name = resolver(&temp, "prod").resolve_ref("stg_orders").unwrap();
    assert_eq!(name.schema, "analytics");
    assert_eq!(name.table, "stg_orders");
}

#[test]
fn test_ref_seed_uses_seed_override() {
    let temp = TempDir::new().unwrap();
    let name = resolver(&temp, "dev").resolve_ref("country_codes").unwrap();
    assert_eq!(name.schema, "analytics_seed_data");
    assert_eq!(name.table, "country_codes");
}

#[test]
fn test_ref_unknown_model() {
    let temp = TempDir::new().unwrap();
    let err = resolver(&temp, "dev").resolve_ref("missing").unwrap_err();
    assert!(matches!(err, CoreError::ModelNotFound { .. }));
}

#[test]
fn test_ref_duplicate_model_name_is_ambiguous() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(&temp, "dev");
    write(temp.path(), "models/marts/stg_orders.sql", "select 1");

    let err = resolver.resolve_ref("stg_orders").unwrap_err();
    assert!(matches!(err, CoreError::AmbiguousModel { .. }));
}

#[test]
fn test_ref_picks_up_files_added_after_construction() {
    // Registries are rebuilt per call, so mid-session edits are seen
    let temp = TempDir::new().unwrap();
    let resolver = resolver(&temp, "dev");
    write(temp.path(), "models/marts/fct_margin.sql", "select 1");

    let name = resolver.resolve_ref("fct_margin").unwrap();
    assert_eq!(name.schema, "analytics_mart");
}

#[test]
fn test_source_with_entry_database() {
    let temp = TempDir::new().unwrap();
    let name = resolver(&temp, "prod")
        .resolve_source("raw_crm", "leads")
        .unwrap();
    assert_eq!(name.database.as_deref(), Some("crm_land"));
    assert_eq!(name.schema, "raw_crm");
    assert_eq!(name.table, "leads");
}

#[test]
fn test_source_database_defaults_from_profile() {
    let temp = TempDir::new().unwrap();
    let name = resolver(&temp, "prod")
        .resolve_source("raw_shop", "orders")
        .unwrap();
    assert_eq!(name.database.as_deref(), Some("awsdatacatalog"));
    assert_eq!(name.schema, "raw_shop");
    assert_eq!(name.table, "orders");
}

#[test]
fn test_source_missing_table_yields_marker() {
    let temp = TempDir::new().unwrap();
    let name = resolver(&temp, "prod")
        .resolve_source("raw_shop", "payments")
        .unwrap();
    assert_eq!(name.table, TABLE_NOT_FOUND);
    assert_eq!(name.schema, "raw_shop");
}

#[test]
fn test_source_unknown_name() {
    let temp = TempDir::new().unwrap();
    let err = resolver(&temp, "prod")
        .resolve_source("raw_unknown", "orders")
        .unwrap_err();
    assert!(matches!(err, CoreError::SourceNotFound { .. }));
}

#[test]
fn test_duplicate_source_name_conflicts_even_with_unique_table() {
    // Entry selection never disambiguates by table membership: the name
    // collision wins even though only one entry declares the table.
    let temp = TempDir::new().unwrap();
    let resolver = resolver(&temp, "prod");
    write(
        temp.path(),
        "models/marts/dup_sources.yml",
        "sources:\n  - name: raw_shop\n    tables:\n      - name: invoices\n",
    );

    let err = resolver.resolve_source("raw_shop", "invoices").unwrap_err();
    match err {
        CoreError::ConflictingSource { name, candidates } => {
            assert_eq!(name, "raw_shop");
            assert!(candidates.contains("raw_shop"), "got: {}", candidates);
        }
        other => panic!("expected ConflictingSource, got: {other}"),
    }
}

#[test]
fn test_ref_without_target_schema() {
    let temp = TempDir::new().unwrap();
    let _ = resolver(&temp, "dev");

    let output: TargetOutput = serde_yaml::from_str("type: athena\n").unwrap();
    let bare = NameResolver::new(ResolverParts {
        profile_name: "dwh".to_string(),
        target_name: "dev".to_string(),
        output,
        manifest: serde_yaml::from_str(MANIFEST).unwrap(),
        project_root: temp.path().to_path_buf(),
    });
    let err = bare.resolve_ref("stg_orders").unwrap_err();
    assert!(matches!(err, CoreError::TargetSchemaMissing { .. }));
}

#[test]
fn test_var_lookup() {
    let temp = TempDir::new().unwrap();
    let resolver = resolver(&temp, "dev");
    assert_eq!(
        resolver.var("start_date").and_then(|v| v.as_str()),
        Some("2024-01-01")
    );
    assert!(resolver.var("missing").is_none());
}

#[test]
fn test_qualified_name_display() {
    let with_db = QualifiedName {
        database: Some("db".to_string()),
        schema: "s".to_string(),
        table: "t".to_string(),
    };
    assert_eq!(with_db.to_string(), "db.s.t");

    let without_db = QualifiedName {
        database: None,
        schema: "s".to_string(),
        table: "t".to_string(),
    };
    assert_eq!(without_db.to_string(), "s.t");
}

#[test]
fn test_load_from_profiles_document() {
    let temp = TempDir::new().unwrap();
    // Project tree
    let _ = resolver(&temp, "dev");

    let profiles = format!(
        r#"
dwh:
  target: prod
  outputs:
    dev:
      type: athena
      schema: analytics
      database: awsdatacatalog
      project_folder: {root}
    prod:
      type: athena
      schema: analytics
      database: awsdatacatalog
      project_folder: {root}
"#,
        root = temp.path().display()
    );
    let profiles_path = temp.path().join("profiles.yml");
    std::fs::write(&profiles_path, profiles).unwrap();

    let resolver = NameResolver::load(ResolverConfig {
        profiles_path: Some(profiles_path.clone()),
        profile: None,
        target: Some("dev".to_string()),
        engine: EngineType::Athena,
    })
    .unwrap();
    assert_eq!(resolver.profile_name(), "dwh");
    assert_eq!(resolver.target_name(), "dev");
    assert!(resolver.is_dev_target());
    let name = resolver.resolve_ref("stg_orders").unwrap();
    assert_eq!(name.schema, "analytics_stg");

    // Default target comes from the profile's target key
    let resolver = NameResolver::load(ResolverConfig {
        profiles_path: Some(profiles_path),
        profile: Some("dwh".to_string()),
        target: None,
        engine: EngineType::Athena,
    })
    .unwrap();
    assert_eq!(resolver.target_name(), "prod");
    assert!(!resolver.is_dev_target());
}

#[test]
fn test_load_missing_project_folder() {
    let temp = TempDir::new().unwrap();
    let profiles_path = temp.path().join("profiles.yml");
    std::fs::write(
        &profiles_path,
        "dwh:\n  target: prod\n  outputs:\n    prod:\n      type: athena\n      schema: analytics\n",
    )
    .unwrap();

    let err = NameResolver::load(ResolverConfig {
        profiles_path: Some(profiles_path),
        profile: Some("dwh".to_string()),
        target: None,
        engine: EngineType::Athena,
    })
    .unwrap_err();
    assert!(matches!(err, CoreError::ProjectFolderMissing { .. }));
}
