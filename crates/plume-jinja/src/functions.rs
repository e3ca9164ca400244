//! Template functions: ref(), source(), and var().

use minijinja::value::Value;
use minijinja::Error;
use plume_adapters::Adapter;
use std::collections::BTreeMap;
use std::sync::Arc;

fn resolve_error(err: plume_core::CoreError) -> Error {
    Error::new(minijinja::ErrorKind::InvalidOperation, err.to_string())
}

/// Create the ref() function backed by a backend adapter.
///
/// Usage in templates:
/// ```jinja
/// SELECT * FROM {{ ref('stg_orders') }}
/// ```
pub(crate) fn make_ref_fn(
    adapter: Arc<dyn Adapter>,
) -> impl Fn(&str) -> Result<Value, Error> + Send + Sync + Clone + 'static {
    move |model_name: &str| {
        adapter
            .resolve_ref(model_name)
            .map(Value::from)
            .map_err(resolve_error)
    }
}

/// Create the source() function backed by a backend adapter.
///
/// Usage in templates:
/// ```jinja
/// SELECT * FROM {{ source('raw_shop', 'orders') }}
/// ```
pub(crate) fn make_source_fn(
    adapter: Arc<dyn Adapter>,
) -> impl Fn(&str, &str) -> Result<Value, Error> + Send + Sync + Clone + 'static {
    move |source_name: &str, table_name: &str| {
        adapter
            .resolve_source(source_name, table_name)
            .map(Value::from)
            .map_err(resolve_error)
    }
}

/// Create the var() function over the project's vars map.
///
/// A missing variable yields an inline error marker so it shows up in
/// the previewed SQL instead of aborting the render.
pub(crate) fn make_var_fn(
    vars: BTreeMap<String, serde_yaml::Value>,
) -> impl Fn(&str) -> Value + Send + Sync + Clone + 'static {
    move |name: &str| match vars.get(name) {
        Some(value) => Value::from_serialize(value),
        None => Value::from(format!("ERROR: NOT FOUND VALUE {name}")),
    }
}
