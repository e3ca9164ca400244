//! Shared fixtures for adapter tests.

use plume_core::{NameResolver, ResolverParts, TargetOutput};
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = r#"
name: dwh
model-paths: [models]
seed-paths: [data]

models:
  dwh:
    staging:
      +schema: stg
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Lay down a small project tree and return a resolver against it.
///
/// The project has one model (`staging/stg_orders.sql`, override `stg`)
/// and one source (`raw_shop` with an `orders` table).
pub fn resolver_fixture(temp: &TempDir, output_yaml: &str, target: &str) -> NameResolver {
    write(temp.path(), "dbt_project.yml", MANIFEST);
    write(temp.path(), "models/staging/stg_orders.sql", "select 1");
    write(
        temp.path(),
        "models/staging/sources.yml",
        "sources:\n  - name: raw_shop\n    tables:\n      - name: orders\n",
    );

    let output: TargetOutput = serde_yaml::from_str(output_yaml).unwrap();
    NameResolver::new(ResolverParts {
        profile_name: "dwh".to_string(),
        target_name: target.to_string(),
        output,
        manifest: serde_yaml::from_str(MANIFEST).unwrap(),
        project_root: temp.path().to_path_buf(),
    })
}
