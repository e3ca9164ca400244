//! Jinja environment wiring for SQL cells.

use crate::error::JinjaResult;
use crate::functions::{make_ref_fn, make_source_fn, make_var_fn};
use minijinja::Environment;
use plume_adapters::Adapter;
use std::sync::Arc;

/// Templating environment for interactive SQL cells.
///
/// Registers `ref()`, `source()`, and `var()` backed by a backend
/// adapter and renders project macros + cell text into engine-ready
/// SQL.
pub struct CellEnvironment<'a> {
    env: Environment<'a>,
    adapter: Arc<dyn Adapter>,
}

impl CellEnvironment<'_> {
    /// Build an environment around a backend adapter.
    pub fn new(adapter: Arc<dyn Adapter>) -> Self {
        let mut env = Environment::new();
        let vars = adapter.resolver().manifest().vars.clone();
        env.add_function("ref", make_ref_fn(adapter.clone()));
        env.add_function("source", make_source_fn(adapter.clone()));
        env.add_function("var", make_var_fn(vars));
        Self { env, adapter }
    }

    /// Render one cell.
    ///
    /// Project macros are prepended so cells can call them; the whole
    /// template is expanded, then trimmed.
    pub fn render(&self, cell: &str) -> JinjaResult<String> {
        let macros = self.adapter.resolver().macro_sql()?;
        log::debug!(
            "rendering cell ({} macro bytes, {} cell bytes)",
            macros.len(),
            cell.len()
        );
        let template = format!("{macros}{cell}");
        let rendered = self.env.render_str(&template, ())?;
        Ok(rendered.trim().to_string())
    }
}
