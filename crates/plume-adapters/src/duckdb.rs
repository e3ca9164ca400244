//! DuckDB adapter: bare `schema.table` identifiers.

use crate::Adapter;
use plume_core::{CoreResult, EngineType, NameResolver};

/// Formats identifiers for the DuckDB columnar file engine.
///
/// DuckDB connections attach a single database file, so identifiers
/// never carry a database segment.
#[derive(Debug)]
pub struct DuckDbAdapter {
    resolver: NameResolver,
}

impl DuckDbAdapter {
    /// Wrap a resolver for DuckDB formatting.
    pub fn new(resolver: NameResolver) -> Self {
        Self { resolver }
    }
}

impl Adapter for DuckDbAdapter {
    fn engine(&self) -> EngineType {
        EngineType::DuckDb
    }

    fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    fn resolve_ref(&self, model_name: &str) -> CoreResult<String> {
        let name = self.resolver.resolve_ref(model_name)?;
        Ok(format!("{}.{}", name.schema, name.table))
    }

    fn resolve_source(&self, source_name: &str, table_name: &str) -> CoreResult<String> {
        let name = self.resolver.resolve_source(source_name, table_name)?;
        Ok(format!("{}.{}", name.schema, name.table))
    }
}
