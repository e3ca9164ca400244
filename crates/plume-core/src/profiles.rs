//! Environment profiles (profiles.yml) parsing and lookup.
//!
//! A profile bundles one or more named targets for a single backend
//! engine. Each target carries the output settings (schema, database,
//! project folder) that drive name resolution for that environment.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Backend engine selector, parsed from an output's `type` key.
///
/// Unknown tags are preserved as [`EngineType::Other`] so that foreign
/// profiles in a shared profiles document never poison loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineType {
    /// AWS Athena (distributed query service)
    Athena,
    /// Google BigQuery (cloud warehouse)
    BigQuery,
    /// Snowflake (cloud warehouse)
    Snowflake,
    /// DuckDB (columnar file engine)
    DuckDb,
    /// SQLite (embedded file database)
    Sqlite,
    /// Any engine this crate does not resolve for
    Other(String),
}

impl EngineType {
    /// The `type` tag as written in profiles.yml.
    pub fn as_str(&self) -> &str {
        match self {
            EngineType::Athena => "athena",
            EngineType::BigQuery => "bigquery",
            EngineType::Snowflake => "snowflake",
            EngineType::DuckDb => "duckdb",
            EngineType::Sqlite => "sqlite",
            EngineType::Other(tag) => tag,
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "athena" => EngineType::Athena,
            "bigquery" => EngineType::BigQuery,
            "snowflake" => EngineType::Snowflake,
            "duckdb" => EngineType::DuckDb,
            "sqlite" => EngineType::Sqlite,
            other => EngineType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for EngineType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EngineType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(EngineType::from_tag(&tag))
    }
}

/// One output block inside a profile (a "target").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetOutput {
    /// Engine type from the `type` key
    #[serde(rename = "type")]
    pub engine: EngineType,

    /// Default schema models materialize into
    #[serde(default)]
    pub schema: Option<String>,

    /// Default dataset (BigQuery's schema equivalent)
    #[serde(default)]
    pub dataset: Option<String>,

    /// Database / catalog name
    #[serde(default)]
    pub database: Option<String>,

    /// Database name under the `dbname` key (warehouse dialects)
    #[serde(default)]
    pub dbname: Option<String>,

    /// Cloud project identifier
    #[serde(default)]
    pub project: Option<String>,

    /// Root of the dbt project this output resolves against
    #[serde(default)]
    pub project_folder: Option<PathBuf>,

    /// Backend-specific keys kept verbatim (credential references,
    /// staging locations, work groups, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl TargetOutput {
    /// Database a source entry falls back to when it omits its own:
    /// first non-empty of `dbname`, `database`, `dataset`.
    pub fn default_database(&self) -> Option<&str> {
        [
            self.dbname.as_deref(),
            self.database.as_deref(),
            self.dataset.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
    }

    /// Default schema for model references: `schema`, else `dataset`.
    pub fn default_schema(&self) -> Option<&str> {
        [self.schema.as_deref(), self.dataset.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
    }
}

/// A named bundle of targets for one backend engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Default target name selected when none is passed explicitly
    #[serde(default)]
    pub target: Option<String>,

    /// Named outputs, keyed by target name
    #[serde(default)]
    pub outputs: BTreeMap<String, TargetOutput>,
}

impl Profile {
    /// Comma-joined target names, for error payloads.
    pub fn available_targets(&self) -> String {
        self.outputs
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolve the active target: the explicit argument, else the
    /// profile's default `target` key.
    pub fn output(
        &self,
        profile_name: &str,
        target: Option<&str>,
    ) -> CoreResult<(String, &TargetOutput)> {
        let target_name = match target {
            Some(t) => t.to_string(),
            None => self
                .target
                .clone()
                .ok_or_else(|| CoreError::NoDefaultTarget {
                    profile: profile_name.to_string(),
                })?,
        };
        let output = self
            .outputs
            .get(&target_name)
            .ok_or_else(|| CoreError::TargetNotFound {
                name: target_name.clone(),
                available: self.available_targets(),
            })?;
        Ok((target_name, output))
    }

    /// True when any output of this profile runs on the given engine.
    pub fn has_engine(&self, engine: &EngineType) -> bool {
        self.outputs.values().any(|o| o.engine == *engine)
    }
}

/// The parsed profiles document: profile-name → profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfilesDoc(BTreeMap<String, Profile>);

impl ProfilesDoc {
    /// Default document location: `~/.dbt/profiles.yml`.
    pub fn default_path() -> CoreResult<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".dbt").join("profiles.yml"))
            .ok_or(CoreError::HomeDirNotFound)
    }

    /// Load and parse a profiles document from a path.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }

    /// Look up a profile by name, validating it has at least one output.
    pub fn get(&self, name: &str) -> CoreResult<&Profile> {
        let profile = self.0.get(name).ok_or_else(|| CoreError::ProfileNotFound {
            name: name.to_string(),
            available: self.names_joined(),
        })?;
        if profile.outputs.is_empty() {
            return Err(CoreError::EmptyProfile {
                name: name.to_string(),
            });
        }
        Ok(profile)
    }

    /// Implicit profile selection for a backend engine.
    ///
    /// Exactly one profile with an output of the requested engine may
    /// exist; zero or several candidates abort resolution so a wrong
    /// profile is never picked silently.
    pub fn discover(&self, engine: &EngineType) -> CoreResult<(&str, &Profile)> {
        let mut candidates: Vec<(&str, &Profile)> = self
            .0
            .iter()
            .filter(|(_, profile)| profile.has_engine(engine))
            .map(|(name, profile)| (name.as_str(), profile))
            .collect();
        match candidates.len() {
            0 => Err(CoreError::NoMatchingProfile {
                engine: engine.to_string(),
            }),
            1 => Ok(candidates.remove(0)),
            _ => Err(CoreError::AmbiguousProfile {
                engine: engine.to_string(),
                candidates: candidates
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn names_joined(&self) -> String {
        self.0
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
