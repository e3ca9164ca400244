//! BigQuery adapter: backtick-quoted identifier segments.

use crate::Adapter;
use plume_core::{CoreResult, EngineType, NameResolver};

/// Formats identifiers for BigQuery.
///
/// BigQuery names tables `project.dataset.table`; the project comes from
/// the profile output's `project` key and replaces the generic database
/// segment.
#[derive(Debug)]
pub struct BigQueryAdapter {
    resolver: NameResolver,
}

impl BigQueryAdapter {
    /// Wrap a resolver for BigQuery formatting.
    pub fn new(resolver: NameResolver) -> Self {
        Self { resolver }
    }

    fn project(&self) -> Option<&str> {
        self.resolver.output().project.as_deref()
    }
}

impl Adapter for BigQueryAdapter {
    fn engine(&self) -> EngineType {
        EngineType::BigQuery
    }

    fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    fn resolve_ref(&self, model_name: &str) -> CoreResult<String> {
        let name = self.resolver.resolve_ref(model_name)?;
        match self.project() {
            Some(project) => Ok(format!("`{}`.`{}`.`{}`", project, name.schema, name.table)),
            None => Ok(format!("`{}`.`{}`", name.schema, name.table)),
        }
    }

    fn resolve_source(&self, source_name: &str, table_name: &str) -> CoreResult<String> {
        let name = self.resolver.resolve_source(source_name, table_name)?;
        // The dataset segment is the source's declared database (or the
        // profile default), not the logical source name.
        let dataset = name.database.as_deref().unwrap_or(&name.schema);
        match self.project() {
            Some(project) => Ok(format!("`{}`.`{}`.`{}`", project, dataset, name.table)),
            None => Ok(format!("`{}`.`{}`", dataset, name.table)),
        }
    }
}
