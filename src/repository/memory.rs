use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Document};
use tokio::sync::RwLock;

use super::{parse_user_id, RepositoryError, UserRepository};

/// Vec-backed repository with the same merge and lookup rules as the MongoDB
/// adapter. Used by the router tests.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<Document>>,
}

impl InMemoryUserRepository {
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

fn has_id(user: &Document, id: ObjectId) -> bool {
    user.get_object_id("_id").map_or(false, |stored| stored == id)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find(&self, id: &str) -> Result<Option<Document>, RepositoryError> {
        let id = parse_user_id(id)?;
        let users = self.users.read().await;
        Ok(users.iter().find(|user| has_id(user, id)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Document>, RepositoryError> {
        Ok(self.users.read().await.clone())
    }

    async fn create(&self, user: Document) -> Result<Document, RepositoryError> {
        let mut created = doc! { "_id": ObjectId::new() };
        for (key, value) in user {
            created.insert(key, value);
        }

        self.users.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, partial: Document) -> Result<Option<Document>, RepositoryError> {
        let id = parse_user_id(id)?;
        let mut users = self.users.write().await;

        Ok(users.iter_mut().find(|user| has_id(user, id)).map(|user| {
            for (key, value) in partial {
                user.insert(key, value);
            }
            user.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let id = parse_user_id(id)?;
        let mut users = self.users.write().await;

        let before = users.len();
        users.retain(|user| !has_id(user, id));
        Ok(users.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_does_not_alias_input() {
        let repository = InMemoryUserRepository::default();
        let input = doc! { "name": "Joao" };

        let created = repository.create(input.clone()).await.unwrap();

        assert!(!input.contains_key("_id"));
        assert!(created.get_object_id("_id").is_ok());
        assert_eq!(created.get_str("name").unwrap(), "Joao");
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let repository = InMemoryUserRepository::default();
        let updated = repository
            .update(&ObjectId::new().to_hex(), doc! { "name": "Joao" })
            .await
            .unwrap();

        assert!(updated.is_none());
        assert_eq!(repository.len().await, 0);
    }
}
