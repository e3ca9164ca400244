//! Schema-naming rules: per-folder overrides plus the dev/prod
//! composition convention.

use crate::error::{CoreError, CoreResult};
use crate::manifest::ProjectManifest;
use crate::registry::{ModelEntry, Registries, SEEDS_FOLDER};

/// Look up the custom (override) schema for a model or seed.
///
/// Exactly one registry entry must match the name: zero or several
/// matches abort resolution rather than silently picking one. An absent
/// override is a project-configuration gap and is surfaced, never
/// defaulted.
pub fn custom_schema(
    profile_name: &str,
    model_name: &str,
    registries: &Registries,
    manifest: &ProjectManifest,
) -> CoreResult<String> {
    let matches: Vec<&ModelEntry> = registries
        .models
        .iter()
        .filter(|entry| entry.name == model_name)
        .collect();

    let entry = match matches.as_slice() {
        [] => {
            return Err(CoreError::ModelNotFound {
                name: model_name.to_string(),
            })
        }
        [single] => *single,
        _ => {
            return Err(CoreError::AmbiguousModel {
                name: model_name.to_string(),
                folders: matches
                    .iter()
                    .map(|entry| entry.folder.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
        }
    };

    let override_schema = if entry.folder == SEEDS_FOLDER {
        manifest.seed_schema_override(profile_name)
    } else {
        manifest.model_schema_override(profile_name, &entry.folder)
    };

    override_schema
        .map(str::to_string)
        .ok_or_else(|| CoreError::SchemaOverrideNotFound {
            profile: profile_name.to_string(),
            folder: entry.folder.clone(),
        })
}

/// Combine the target's default schema with the custom schema.
///
/// Dev targets get per-developer isolation (`<default>_<custom>`); any
/// other target folds the grouping schema away and materializes into the
/// shared default schema alone.
pub fn compose_final_schema(
    default_schema: &str,
    custom_schema: &str,
    is_dev_target: bool,
) -> String {
    if is_dev_target {
        format!("{default_schema}_{custom_schema}")
    } else {
        default_schema.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ProjectManifest {
        serde_yaml::from_str(
            r#"
models:
  dwh:
    staging:
      +schema: stg
seeds:
  dwh:
    +schema: seed_data
"#,
        )
        .unwrap()
    }

    fn registries(entries: &[(&str, &str)]) -> Registries {
        Registries {
            sources: Vec::new(),
            models: entries
                .iter()
                .map(|(name, folder)| ModelEntry {
                    name: name.to_string(),
                    folder: folder.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_model_override() {
        let regs = registries(&[("stg_orders", "staging")]);
        let schema = custom_schema("dwh", "stg_orders", &regs, &manifest()).unwrap();
        assert_eq!(schema, "stg");
    }

    #[test]
    fn test_seed_override() {
        let regs = registries(&[("country_codes", SEEDS_FOLDER)]);
        let schema = custom_schema("dwh", "country_codes", &regs, &manifest()).unwrap();
        assert_eq!(schema, "seed_data");
    }

    #[test]
    fn test_model_not_found() {
        let regs = registries(&[("stg_orders", "staging")]);
        let err = custom_schema("dwh", "missing", &regs, &manifest()).unwrap_err();
        assert!(err.to_string().contains("R001"));
    }

    #[test]
    fn test_ambiguous_model_lists_folders() {
        let regs = registries(&[("stg_orders", "staging"), ("stg_orders", "marts")]);
        let err = custom_schema("dwh", "stg_orders", &regs, &manifest()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("R002"), "got: {}", msg);
        assert!(msg.contains("staging, marts"), "got: {}", msg);
    }

    #[test]
    fn test_override_not_found() {
        let regs = registries(&[("fct_sales", "marts")]);
        let err = custom_schema("dwh", "fct_sales", &regs, &manifest()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("R003"), "got: {}", msg);
        assert!(msg.contains("marts"), "got: {}", msg);
    }

    #[test]
    fn test_override_not_found_for_unknown_profile() {
        let regs = registries(&[("stg_orders", "staging")]);
        let err = custom_schema("other", "stg_orders", &regs, &manifest()).unwrap_err();
        assert!(err.to_string().contains("R003"));
    }

    #[test]
    fn test_compose_dev_target() {
        assert_eq!(compose_final_schema("analytics", "stg", true), "analytics_stg");
    }

    #[test]
    fn test_compose_non_dev_target() {
        assert_eq!(compose_final_schema("analytics", "stg", false), "analytics");
    }
}
