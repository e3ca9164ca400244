//! SQLite adapter: single `main` catalog, quoted table names.

use crate::Adapter;
use plume_core::{CoreResult, EngineType, NameResolver};

/// Formats identifiers for the embedded SQLite engine.
///
/// SQLite has no schema layer; models live in the `main` catalog and
/// refs skip schema composition entirely. Attached source databases are
/// addressed by their logical source name.
#[derive(Debug)]
pub struct SqliteAdapter {
    resolver: NameResolver,
}

impl SqliteAdapter {
    /// Wrap a resolver for SQLite formatting.
    pub fn new(resolver: NameResolver) -> Self {
        Self { resolver }
    }
}

impl Adapter for SqliteAdapter {
    fn engine(&self) -> EngineType {
        EngineType::Sqlite
    }

    fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    fn resolve_ref(&self, model_name: &str) -> CoreResult<String> {
        Ok(format!("main.\"{model_name}\""))
    }

    fn resolve_source(&self, source_name: &str, table_name: &str) -> CoreResult<String> {
        let name = self.resolver.resolve_source(source_name, table_name)?;
        Ok(format!("{}.\"{}\"", name.schema, name.table))
    }
}
