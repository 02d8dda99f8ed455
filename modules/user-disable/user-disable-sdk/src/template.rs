//! Parameter templating collaborator.

use thiserror::Error;

/// Errors reported by a [`TemplateResolver`].
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A placeholder referenced a path absent from the job data.
    #[error("unresolved placeholder `{0}`")]
    Unresolved(String),

    /// The template text could not be parsed.
    #[error("malformed template: {0}")]
    Malformed(String),
}

/// Substitutes path-expression placeholders in a parameter value using
/// job-scoped data.
///
/// Implementations return the input unchanged when it contains no placeholders.
pub trait TemplateResolver: Send + Sync {
    /// Resolve placeholders in `value` against `data`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if a placeholder cannot be resolved.
    fn resolve(&self, value: &str, data: &serde_json::Value) -> Result<String, TemplateError>;
}
