use crate::db::GatewayError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),

    #[error("Blueprint already exists: {author}/{name}")]
    DuplicateBlueprint { author: String, name: String },

    #[error("Validation error: {0}")]
    Invalid(String),

    #[error("persistence failure: {0}")]
    Persistence(#[source] GatewayError),
}

impl Error {
    pub fn blueprint_not_found(author: &str, name: &str) -> Self {
        Error::NotFound(format!("Blueprint not found: {}/{}", author, name))
    }

    pub fn author_not_found(author: &str) -> Self {
        Error::NotFound(format!("No blueprints for author: {}", author))
    }
}

impl From<GatewayError> for Error {
    fn from(value: GatewayError) -> Self {
        match value {
            GatewayError::Conflict { author, name } => Error::DuplicateBlueprint { author, name },
            GatewayError::Missing { author, name } => Error::blueprint_not_found(&author, &name),
            other => Error::Persistence(other),
        }
    }
}
