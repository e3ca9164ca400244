//! Athena adapter: double-quoted identifier segments.

use crate::Adapter;
use plume_core::{CoreResult, EngineType, NameResolver, QualifiedName};

/// Formats identifiers for the Athena distributed query service.
#[derive(Debug)]
pub struct AthenaAdapter {
    resolver: NameResolver,
}

impl AthenaAdapter {
    /// Wrap a resolver for Athena formatting.
    pub fn new(resolver: NameResolver) -> Self {
        Self { resolver }
    }

    fn quote_source(name: &QualifiedName) -> String {
        match &name.database {
            Some(db) => format!("\"{}\".\"{}\".\"{}\"", db, name.schema, name.table),
            None => format!("\"{}\".\"{}\"", name.schema, name.table),
        }
    }
}

impl Adapter for AthenaAdapter {
    fn engine(&self) -> EngineType {
        EngineType::Athena
    }

    fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    fn resolve_ref(&self, model_name: &str) -> CoreResult<String> {
        let name = self.resolver.resolve_ref(model_name)?;
        // The catalog segment is implied by the connection; refs stay
        // schema-qualified.
        Ok(format!("\"{}\".\"{}\"", name.schema, name.table))
    }

    fn resolve_source(&self, source_name: &str, table_name: &str) -> CoreResult<String> {
        let name = self.resolver.resolve_source(source_name, table_name)?;
        Ok(Self::quote_source(&name))
    }
}
