//! plume-core - Core library for Plume
//!
//! This crate answers one question for the interactive SQL layers above
//! it: given a dbt-style project, what physical table does a logical
//! name refer to? It parses the environment profiles and the project
//! manifest, indexes the model/seed/source tree, applies the project's
//! schema-naming rules, and exposes the [`NameResolver`] every backend
//! adapter shares.
//!
//! The crate performs no network I/O and executes no queries; it only
//! reads project files and computes names.

pub mod error;
pub mod macros;
pub mod manifest;
pub mod profiles;
pub mod registry;
pub mod resolver;
pub mod schema;

pub use error::{CoreError, CoreResult};
pub use macros::collect_macro_sql;
pub use manifest::{ProjectManifest, MANIFEST_FILE};
pub use profiles::{EngineType, Profile, ProfilesDoc, TargetOutput};
pub use registry::{
    build_registries, ModelEntry, Registries, SourceEntry, SourceTable, SEEDS_FOLDER,
};
pub use resolver::{
    NameResolver, QualifiedName, ResolverConfig, ResolverParts, TABLE_NOT_FOUND,
};
pub use schema::{compose_final_schema, custom_schema};
