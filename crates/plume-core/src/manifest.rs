//! Project manifest (dbt_project.yml) parsing.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// File name of the project manifest inside the project root.
pub const MANIFEST_FILE: &str = "dbt_project.yml";

/// The project manifest: directory conventions, schema overrides, and
/// template variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Project name
    #[serde(default)]
    pub name: Option<String>,

    /// Directories containing model SQL files and source descriptors
    #[serde(rename = "model-paths", default = "default_model_paths")]
    pub model_paths: Vec<String>,

    /// Directories containing seed descriptors
    #[serde(rename = "seed-paths", default = "default_seed_paths")]
    pub seed_paths: Vec<String>,

    /// Directories containing project macros
    #[serde(rename = "macro-paths", default = "default_macro_paths")]
    pub macro_paths: Vec<String>,

    /// Variables available to templates via var()
    #[serde(default)]
    pub vars: BTreeMap<String, serde_yaml::Value>,

    /// Per-model schema overrides: profile-name → folder-name → +schema.
    /// Navigated structurally so sibling config keys (+materialized and
    /// friends) never break parsing.
    #[serde(default)]
    pub models: BTreeMap<String, serde_yaml::Value>,

    /// Per-seed schema overrides: profile-name → +schema
    #[serde(default)]
    pub seeds: BTreeMap<String, serde_yaml::Value>,
}

fn default_model_paths() -> Vec<String> {
    vec!["models".to_string()]
}

fn default_seed_paths() -> Vec<String> {
    vec!["seeds".to_string()]
}

fn default_macro_paths() -> Vec<String> {
    vec!["macros".to_string()]
}

impl ProjectManifest {
    /// Load the manifest from `<project_root>/dbt_project.yml`.
    pub fn load(project_root: &Path) -> CoreResult<Self> {
        let path = project_root.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(CoreError::ProjectManifestNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }

    /// The override at `models.<profile>.<folder>.+schema`, when present.
    pub fn model_schema_override(&self, profile: &str, folder: &str) -> Option<&str> {
        self.models.get(profile)?.get(folder)?.get("+schema")?.as_str()
    }

    /// The override at `seeds.<profile>.+schema`, when present.
    pub fn seed_schema_override(&self, profile: &str) -> Option<&str> {
        self.seeds.get(profile)?.get("+schema")?.as_str()
    }

    /// Look up a template variable by name.
    pub fn var(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.vars.get(name)
    }
}
