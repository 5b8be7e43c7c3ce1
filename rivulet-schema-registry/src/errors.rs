use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaRegistryError>;

/// Errors returned by the registry.
///
/// Messages render the request path a remote registry would have served,
/// so callers of a network-backed implementation can swap this one in
/// without changing how they parse failures.
#[derive(Debug, Error)]
pub enum SchemaRegistryError {
    /// Byte-identical schema content is already registered under this
    /// subject. Carries the id of the existing registration.
    #[error("POST {path:?}: schema already registered with id {schema_id}")]
    AlreadyRegistered { path: String, schema_id: u64 },

    #[error("GET {path:?}: subject not found")]
    SubjectNotFound { path: String },

    #[error("GET {path:?}: version not found")]
    VersionNotFound { path: String },

    #[error("GET {path:?}: schema id not found")]
    SchemaIdNotFound { path: String },

    #[error("invalid subject: {0}")]
    InvalidSubject(String),
}

impl SchemaRegistryError {
    /// True for every lookup-miss variant, regardless of whether the id,
    /// the subject, or the (subject, version) pair was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SchemaRegistryError::SubjectNotFound { .. }
                | SchemaRegistryError::VersionNotFound { .. }
                | SchemaRegistryError::SchemaIdNotFound { .. }
        )
    }

    /// Id of the already-registered schema, if this is a duplicate error.
    pub fn existing_schema_id(&self) -> Option<u64> {
        match self {
            SchemaRegistryError::AlreadyRegistered { schema_id, .. } => Some(*schema_id),
            _ => None,
        }
    }
}
