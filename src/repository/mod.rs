//! User persistence.
//!
//! The router only talks to [`UserRepository`]; [`MongoUserRepository`] is the
//! production adapter, one collection call per operation.

#[cfg(test)]
mod memory;
mod mongo;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

#[cfg(test)]
pub use memory::InMemoryUserRepository;
pub use mongo::MongoUserRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("invalid user identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Parses the external (hex string) form of a user identifier.
pub fn parse_user_id(id: &str) -> Result<ObjectId, RepositoryError> {
    ObjectId::parse_str(id).map_err(|_| RepositoryError::InvalidIdentifier(id.to_string()))
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetches one user. `Ok(None)` when the identifier is well formed but
    /// nothing matches.
    async fn find(&self, id: &str) -> Result<Option<Document>, RepositoryError>;

    /// Every user, in store order.
    async fn find_all(&self) -> Result<Vec<Document>, RepositoryError>;

    /// Inserts `user` and returns it with the store-assigned `_id`.
    async fn create(&self, user: Document) -> Result<Document, RepositoryError>;

    /// Merges `partial` into the stored user (`$set`, absent fields are kept)
    /// and returns the document as re-read from the store.
    async fn update(&self, id: &str, partial: Document) -> Result<Option<Document>, RepositoryError>;

    /// Removes the user if present. Returns whether a document was removed;
    /// a miss is not an error.
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;
}
