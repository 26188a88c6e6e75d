mod blueprints;
pub use blueprints::*;
mod memory;
pub use memory::*;
mod mongo;
pub use mongo::*;

use async_trait::async_trait;

use crate::models::{Blueprint, Point};

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("blueprint {author}/{name} already exists")]
    Conflict { author: String, name: String },

    #[error("blueprint {author}/{name} does not exist")]
    Missing { author: String, name: String },

    #[error(transparent)]
    Backend(#[from] mongodb::error::Error),

    #[error(transparent)]
    Encoding(#[from] bson::ser::Error),
}

impl GatewayError {
    pub fn conflict(blueprint: &Blueprint) -> Self {
        GatewayError::Conflict {
            author: blueprint.author().to_owned(),
            name: blueprint.name().to_owned(),
        }
    }

    pub fn missing(author: &str, name: &str) -> Self {
        GatewayError::Missing {
            author: author.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Durable storage for blueprints, keyed by `(author, name)`.
///
/// Implementations own the atomicity guarantees the service relies on: `save` must check and
/// insert as one step so two racing creates for the same key cannot both succeed, and
/// `append_point` must not lose concurrent appends to the same blueprint.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Stores a new blueprint, failing with [`GatewayError::Conflict`] if the key is taken.
    async fn save(&self, blueprint: &Blueprint) -> GatewayResult<()>;

    async fn find_by_author_and_name(
        &self,
        author: &str,
        name: &str,
    ) -> GatewayResult<Option<Blueprint>>;

    /// Every blueprint by `author`; empty if there are none.
    async fn find_by_author(&self, author: &str) -> GatewayResult<Vec<Blueprint>>;

    async fn find_all(&self) -> GatewayResult<Vec<Blueprint>>;

    /// Appends `point` to the stored blueprint, failing with [`GatewayError::Missing`] if
    /// there is no blueprint under the key.
    async fn append_point(&self, author: &str, name: &str, point: Point) -> GatewayResult<()>;
}
