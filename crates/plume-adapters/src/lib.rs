//! plume-adapters - Backend identifier formatting for Plume
//!
//! Every query engine quotes identifiers differently: Athena wants
//! double-quoted segments, BigQuery backticks, Snowflake and DuckDB bare
//! dotted names, SQLite a single `main` catalog. The [`Adapter`] trait
//! wraps one shared [`NameResolver`] per backend and turns its
//! structural [`plume_core::QualifiedName`]s into engine-ready SQL
//! identifier strings.

mod athena;
mod bigquery;
mod duckdb;
mod snowflake;
mod sqlite;

#[cfg(test)]
mod test_support;

pub use athena::AthenaAdapter;
pub use bigquery::BigQueryAdapter;
pub use duckdb::DuckDbAdapter;
pub use snowflake::SnowflakeAdapter;
pub use sqlite::SqliteAdapter;

use plume_core::{CoreResult, EngineType, NameResolver};

/// Per-backend name resolution surface consumed by the templating layer.
///
/// Implementations share the resolver core by composition and differ
/// only in identifier quoting and database-segment inclusion.
pub trait Adapter: Send + Sync {
    /// Engine this adapter formats identifiers for.
    fn engine(&self) -> EngineType;

    /// The shared resolver backing this adapter.
    fn resolver(&self) -> &NameResolver;

    /// Resolve `ref('model')` to a formatted, quoted identifier.
    fn resolve_ref(&self, model_name: &str) -> CoreResult<String>;

    /// Resolve `source('schema', 'table')` to a formatted, quoted
    /// identifier.
    fn resolve_source(&self, source_name: &str, table_name: &str) -> CoreResult<String>;
}
