//! Qualified-name resolution for ref() and source() lookups.

use crate::error::{CoreError, CoreResult};
use crate::macros::collect_macro_sql;
use crate::manifest::ProjectManifest;
use crate::profiles::{EngineType, ProfilesDoc, TargetOutput};
use crate::registry::{build_registries, SourceEntry};
use crate::schema::{compose_final_schema, custom_schema};
use std::fmt;
use std::path::{Path, PathBuf};

/// Marker substituted for a table missing from an otherwise uniquely
/// matched source entry.
///
/// A soft failure: rendering proceeds and the marker shows up in the
/// previewed SQL, while collisions and unknown source names abort the
/// call with a hard error.
pub const TABLE_NOT_FOUND: &str = "<! TABLE NOT FOUND in dbt project !>";

/// Target name that triggers per-developer schema composition.
const DEV_TARGET: &str = "dev";

/// The resolved (database, schema, table) triple identifying one
/// physical table.
///
/// Identifier quoting and database-segment inclusion are backend
/// concerns; this type stays structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    /// Database/catalog segment, when one applies
    pub database: Option<String>,

    /// Schema segment
    pub schema: String,

    /// Table segment
    pub table: String,
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.database {
            Some(db) => write!(f, "{}.{}.{}", db, self.schema, self.table),
            None => write!(f, "{}.{}", self.schema, self.table),
        }
    }
}

/// How to locate and select the configuration a resolver works against.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Path to the profiles document; `~/.dbt/profiles.yml` when unset
    pub profiles_path: Option<PathBuf>,

    /// Explicit profile name; engine auto-discovery when unset
    pub profile: Option<String>,

    /// Explicit target name; the profile default when unset
    pub target: Option<String>,

    /// Engine the calling adapter runs on
    pub engine: EngineType,
}

impl ResolverConfig {
    /// Config with auto-discovery for everything except the engine.
    pub fn for_engine(engine: EngineType) -> Self {
        Self {
            profiles_path: None,
            profile: None,
            target: None,
            engine,
        }
    }
}

/// All fields needed to construct a [`NameResolver`] directly.
///
/// Avoids a 5-parameter constructor and makes call sites self-documenting
/// via named fields.
#[derive(Debug)]
pub struct ResolverParts {
    /// Name of the selected profile
    pub profile_name: String,
    /// Name of the active target
    pub target_name: String,
    /// The active target's output settings
    pub output: TargetOutput,
    /// The parsed project manifest
    pub manifest: ProjectManifest,
    /// Root of the dbt project
    pub project_root: PathBuf,
}

/// Resolves logical model and source names to qualified identifiers.
///
/// Stateless across calls: every resolve re-reads and re-indexes the
/// project tree, so a file edited mid-session is reflected by the next
/// cell. Realistic projects (tens to low hundreds of models) index well
/// under a second.
#[derive(Debug)]
pub struct NameResolver {
    profile_name: String,
    target_name: String,
    output: TargetOutput,
    manifest: ProjectManifest,
    project_root: PathBuf,
}

impl NameResolver {
    /// Create a resolver from pre-loaded parts.
    pub fn new(parts: ResolverParts) -> Self {
        Self {
            profile_name: parts.profile_name,
            target_name: parts.target_name,
            output: parts.output,
            manifest: parts.manifest,
            project_root: parts.project_root,
        }
    }

    /// Load a resolver from a profiles document on disk.
    ///
    /// Selects the profile (explicit name or engine auto-discovery),
    /// resolves the active target, and loads the project manifest from
    /// the output's `project_folder`.
    pub fn load(config: ResolverConfig) -> CoreResult<Self> {
        let profiles_path = match config.profiles_path {
            Some(path) => path,
            None => ProfilesDoc::default_path()?,
        };
        let profiles = ProfilesDoc::load(&profiles_path)?;

        let (profile_name, profile) = match &config.profile {
            Some(name) => (name.clone(), profiles.get(name)?),
            None => {
                let (name, profile) = profiles.discover(&config.engine)?;
                (name.to_string(), profile)
            }
        };

        let (target_name, output) = profile.output(&profile_name, config.target.as_deref())?;
        let project_root =
            output
                .project_folder
                .clone()
                .ok_or_else(|| CoreError::ProjectFolderMissing {
                    profile: profile_name.clone(),
                    target: target_name.clone(),
                })?;
        let manifest = ProjectManifest::load(&project_root)?;

        Ok(Self {
            profile_name,
            target_name,
            output: output.clone(),
            manifest,
            project_root,
        })
    }

    /// Name of the selected profile.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// Name of the active target.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// The active target's output settings.
    pub fn output(&self) -> &TargetOutput {
        &self.output
    }

    /// The parsed project manifest.
    pub fn manifest(&self) -> &ProjectManifest {
        &self.manifest
    }

    /// Root of the dbt project this resolver reads.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// True for the `dev` target, which gets per-developer schemas.
    pub fn is_dev_target(&self) -> bool {
        self.target_name == DEV_TARGET
    }

    /// Resolve `ref('model')` to its qualified name.
    ///
    /// The table segment always equals the input model name; the schema
    /// combines the target's default schema with the project's override
    /// for the model's folder.
    pub fn resolve_ref(&self, model_name: &str) -> CoreResult<QualifiedName> {
        let registries = build_registries(&self.project_root, &self.manifest)?;
        let custom = custom_schema(&self.profile_name, model_name, &registries, &self.manifest)?;
        let default_schema =
            self.output
                .default_schema()
                .ok_or_else(|| CoreError::TargetSchemaMissing {
                    profile: self.profile_name.clone(),
                    target: self.target_name.clone(),
                })?;
        let schema = compose_final_schema(default_schema, &custom, self.is_dev_target());
        log::debug!("ref('{}') -> {}.{}", model_name, schema, model_name);

        Ok(QualifiedName {
            database: self.output.default_database().map(String::from),
            schema,
            table: model_name.to_string(),
        })
    }

    /// Resolve `source('schema', 'table')` to its qualified name.
    ///
    /// Entry selection applies the exactly-one rule on the logical source
    /// name alone: a name declared by two entries is ambiguous even when
    /// only one of them holds the requested table. Table membership is
    /// only checked after selection, where a miss yields the
    /// [`TABLE_NOT_FOUND`] marker instead of an error.
    pub fn resolve_source(&self, source_name: &str, table_name: &str) -> CoreResult<QualifiedName> {
        let registries = build_registries(&self.project_root, &self.manifest)?;
        let default_database = self.output.default_database();

        let mut candidates: Vec<QualifiedName> = registries
            .sources
            .iter()
            .filter(|entry| entry.name == source_name)
            .map(|entry| source_candidate(entry, table_name, default_database))
            .collect();

        if candidates.is_empty() {
            return Err(CoreError::SourceNotFound {
                name: source_name.to_string(),
                table: table_name.to_string(),
            });
        }
        if candidates.len() > 1 {
            return Err(CoreError::ConflictingSource {
                name: source_name.to_string(),
                candidates: candidates
                    .iter()
                    .map(QualifiedName::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            });
        }
        Ok(candidates.remove(0))
    }

    /// Project variable lookup backing the var() template function.
    pub fn var(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.manifest.var(name)
    }

    /// Concatenated project macro SQL, prepended to each cell render.
    pub fn macro_sql(&self) -> CoreResult<String> {
        collect_macro_sql(&self.project_root, &self.manifest)
    }
}

fn source_candidate(
    entry: &SourceEntry,
    table_name: &str,
    default_database: Option<&str>,
) -> QualifiedName {
    let table = if entry.tables.iter().any(|t| t.name == table_name) {
        table_name.to_string()
    } else {
        TABLE_NOT_FOUND.to_string()
    };
    QualifiedName {
        database: entry.database.clone().or_else(|| default_database.map(String::from)),
        schema: entry.name.clone(),
        table,
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
