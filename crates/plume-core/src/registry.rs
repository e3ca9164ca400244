//! Project indexing: the source and model registries.
//!
//! Every resolution call rebuilds both registries from disk, so edits to
//! the project during an interactive session are picked up by the next
//! cell without any invalidation logic.

use crate::error::{CoreError, CoreResult};
use crate::manifest::ProjectManifest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Folder sentinel under which seed entries register in the model
/// registry.
pub const SEEDS_FOLDER: &str = "seeds";

/// A `sources:` block entry from a descriptor file, kept verbatim.
///
/// The same logical `name` may appear in several entries across files;
/// that is a valid shape at index time and only collapses to exactly one
/// entry at lookup time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Logical source/schema name
    pub name: String,

    /// Database override; the profile default applies when absent
    #[serde(default)]
    pub database: Option<String>,

    /// Physical schema as declared (lookups key on `name`)
    #[serde(default)]
    pub schema: Option<String>,

    /// Tables declared under this source
    #[serde(default)]
    pub tables: Vec<SourceTable>,
}

/// A single table declared within a source entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTable {
    /// Table name as declared
    pub name: String,
}

/// One model or seed entry: logical name → owning folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    /// Logical model name (SQL filename stem, or declared seed name)
    pub name: String,

    /// First path segment under the model-path root, or [`SEEDS_FOLDER`]
    pub folder: String,
}

/// The two registries built from one walk of the project tree.
#[derive(Debug, Default)]
pub struct Registries {
    /// Source entries, in traversal order
    pub sources: Vec<SourceEntry>,

    /// Model and seed entries, in traversal order
    pub models: Vec<ModelEntry>,
}

/// `sources:` block of a descriptor file; unrelated keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct SourcesBlock {
    #[serde(default)]
    sources: Vec<SourceEntry>,
}

/// `seeds:` block of a seed descriptor file.
#[derive(Debug, Default, Deserialize)]
struct SeedsBlock {
    #[serde(default)]
    seeds: Vec<SeedDecl>,
}

#[derive(Debug, Deserialize)]
struct SeedDecl {
    name: String,
}

/// Build the source and model registries for a project.
///
/// Model-path roots contribute `sources` entries from YAML files and one
/// model entry per SQL file; seed-path roots contribute only `seeds`
/// entries from YAML files. Missing roots are skipped; malformed files
/// abort indexing.
pub fn build_registries(
    project_root: &Path,
    manifest: &ProjectManifest,
) -> CoreResult<Registries> {
    let mut registries = Registries::default();

    for model_path in &manifest.model_paths {
        let root = project_root.join(model_path);
        if !root.exists() {
            continue;
        }
        walk_model_root(&root, &root, &mut registries)?;
    }

    for seed_path in &manifest.seed_paths {
        let root = project_root.join(seed_path);
        if !root.exists() {
            continue;
        }
        walk_seed_root(&root, &mut registries)?;
    }

    Ok(registries)
}

fn walk_model_root(root: &Path, dir: &Path, registries: &mut Registries) -> CoreResult<()> {
    for path in dir_entry_paths(dir)? {
        if path.is_dir() {
            walk_model_root(root, &path, registries)?;
            continue;
        }
        match file_extension(&path) {
            "yml" | "yaml" => {
                let block: SourcesBlock = parse_yaml(&path)?;
                registries.sources.extend(block.sources);
            }
            "sql" => match model_entry(root, &path) {
                Some(entry) => registries.models.push(entry),
                None => log::warn!("Skipping model with non-UTF-8 path: {}", path.display()),
            },
            _ => {}
        }
    }
    Ok(())
}

fn walk_seed_root(dir: &Path, registries: &mut Registries) -> CoreResult<()> {
    for path in dir_entry_paths(dir)? {
        if path.is_dir() {
            walk_seed_root(&path, registries)?;
            continue;
        }
        if matches!(file_extension(&path), "yml" | "yaml") {
            let block: SeedsBlock = parse_yaml(&path)?;
            registries.models.extend(block.seeds.into_iter().map(|seed| ModelEntry {
                name: seed.name,
                folder: SEEDS_FOLDER.to_string(),
            }));
        }
    }
    Ok(())
}

/// Derive the registry entry for a model SQL file: the filename stem is
/// the logical name, the first path segment under the root the folder.
fn model_entry(root: &Path, path: &Path) -> Option<ModelEntry> {
    let name = path.file_stem()?.to_str()?.to_string();
    let relative = path.strip_prefix(root).ok()?;
    let folder = relative
        .components()
        .next()
        .and_then(|c| c.as_os_str().to_str())?
        .to_string();
    Some(ModelEntry { name, folder })
}

fn parse_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// List a directory's entry paths, mapping failures to [`CoreError::IoWithPath`].
pub(crate) fn dir_entry_paths(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let io_err = |e: std::io::Error| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        paths.push(entry.path());
    }
    Ok(paths)
}

/// Extract the file extension as a `&str`, returning `""` for paths
/// without one.
pub(crate) fn file_extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
