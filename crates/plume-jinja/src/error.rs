//! Error types for plume-jinja

use thiserror::Error;

/// Templating errors
#[derive(Error, Debug)]
pub enum JinjaError {
    /// Template render error (J001)
    #[error("[J001] Jinja render error: {0}")]
    RenderError(String),

    /// Name resolution failed inside a template function (J002)
    #[error("[J002] {0}")]
    Resolve(#[from] plume_core::CoreError),
}

/// Result type alias for JinjaError
pub type JinjaResult<T> = Result<T, JinjaError>;

impl From<minijinja::Error> for JinjaError {
    fn from(err: minijinja::Error) -> Self {
        JinjaError::RenderError(err.to_string())
    }
}
