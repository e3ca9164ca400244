//! Snowflake adapter: bare dotted identifiers.

use crate::Adapter;
use plume_core::{CoreResult, EngineType, NameResolver};

/// Formats identifiers for Snowflake.
#[derive(Debug)]
pub struct SnowflakeAdapter {
    resolver: NameResolver,
}

impl SnowflakeAdapter {
    /// Wrap a resolver for Snowflake formatting.
    pub fn new(resolver: NameResolver) -> Self {
        Self { resolver }
    }
}

impl Adapter for SnowflakeAdapter {
    fn engine(&self) -> EngineType {
        EngineType::Snowflake
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
        match &name.database {
            Some(db) => Ok(format!("{}.{}.{}", db, name.schema, name.table)),
            None => Ok(format!("{}.{}", name.schema, name.table)),
        }
    }
}
