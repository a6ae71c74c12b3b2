use policygen_syntax::{PropertyError, SyntaxError};

/// A policy declaration that cannot be turned into a policy.
///
/// Every variant is fatal for the whole run.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("Missing required '{0}' property.")]
    Missing(&'static str),
    #[error("Property '{0}' should be localized.")]
    NotLocalized(&'static str),
    #[error("Property '{0}' should not be localized.")]
    Localized(&'static str),
    #[error("Can't create policy from setting type '{0}' (needs implementing)")]
    UnsupportedType(String),
    #[error(
        "Property 'enumDescriptions' has {descriptions} entries but 'enum' has {values}"
    )]
    LengthMismatch { values: usize, descriptions: usize },
    #[error("Duplicate policy name '{name}' (declared in {first} and {second})")]
    DuplicateName {
        name: String,
        first: String,
        second: String,
    },
    #[error(
        "Category '{key}' has conflicting labels '{first}' and '{second}' (declared in {module})"
    )]
    DuplicateCategoryKey {
        key: String,
        first: String,
        second: String,
        module: String,
    },
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("{error} in {module}")]
    InModule {
        module: String,
        error: Box<PolicyError>,
    },
}

impl PolicyError {
    pub(crate) fn in_module(self, module: &str) -> Self {
        PolicyError::InModule {
            module: module.to_string(),
            error: Box::new(self),
        }
    }

    /// The error with any module context stripped.
    pub fn root(&self) -> &PolicyError {
        match self {
            PolicyError::InModule { error, .. } => error.root(),
            other => other,
        }
    }
}
