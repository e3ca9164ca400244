//! Error types for plume-core

use thiserror::Error;

/// Core error type for Plume
#[derive(Error, Debug)]
pub enum CoreError {
    /// P001: Profile missing from the profiles document
    #[error("[P001] Profile '{name}' not found. Available profiles: {available}")]
    ProfileNotFound { name: String, available: String },

    /// P002: Profile declares no outputs
    #[error("[P002] Profile '{name}' declares no outputs")]
    EmptyProfile { name: String },

    /// P003: Profile has no default target and none was supplied
    #[error("[P003] Profile '{profile}' has no default target; pass a target explicitly")]
    NoDefaultTarget { profile: String },

    /// P004: Target missing from the profile's output map
    #[error("[P004] Target '{name}' not found. Available targets: {available}")]
    TargetNotFound { name: String, available: String },

    /// P005: Profile auto-discovery found no profile for the engine
    #[error("[P005] No profile with a '{engine}' output found in the profiles document")]
    NoMatchingProfile { engine: String },

    /// P006: Profile auto-discovery found more than one candidate
    #[error("[P006] Ambiguous profile for engine '{engine}': {candidates}. Name a profile explicitly to choose one")]
    AmbiguousProfile { engine: String, candidates: String },

    /// P007: Output has no project_folder to resolve against
    #[error("[P007] Output '{target}' of profile '{profile}' has no project_folder")]
    ProjectFolderMissing { profile: String, target: String },

    /// P008: dbt_project.yml missing from the project root
    #[error("[P008] Project manifest not found: {path}")]
    ProjectManifestNotFound { path: String },

    /// P009: Output carries neither a schema nor a dataset
    #[error("[P009] Output '{target}' of profile '{profile}' has neither 'schema' nor 'dataset'")]
    TargetSchemaMissing { profile: String, target: String },

    /// P010: Malformed YAML
    #[error("[P010] Failed to parse {path}: {details}")]
    ConfigParseError { path: String, details: String },

    /// P011: IO error with file path context
    #[error("[P011] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// P012: Home directory could not be determined
    #[error("[P012] Cannot locate the home directory for the default profiles path")]
    HomeDirNotFound,

    /// R001: Model/seed name absent from every registry folder
    #[error("[R001] Model '{name}' not found in the dbt project")]
    ModelNotFound { name: String },

    /// R002: Model/seed name registered under more than one folder
    #[error("[R002] Conflicting model name '{name}', registered under: {folders}")]
    AmbiguousModel { name: String, folders: String },

    /// R003: No schema override configured for the model's folder
    #[error("[R003] No '+schema' override for folder '{folder}' under profile '{profile}' in dbt_project.yml")]
    SchemaOverrideNotFound { profile: String, folder: String },

    /// R004: Source name absent from every descriptor file
    #[error("[R004] Source '{name}' not found while resolving table '{table}'")]
    SourceNotFound { name: String, table: String },

    /// R005: Source name declared by more than one registry entry
    #[error("[R005] Conflicting source '{name}': {candidates}")]
    ConflictingSource { name: String, candidates: String },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
