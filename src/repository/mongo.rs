use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::Collection;

use super::{parse_user_id, RepositoryError, UserRepository};

/// [`UserRepository`] backed by a single MongoDB collection.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<Document>,
}

impl MongoUserRepository {
    pub fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>, RepositoryError> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find(&self, id: &str) -> Result<Option<Document>, RepositoryError> {
        let id = parse_user_id(id)?;
        self.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Document>, RepositoryError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn create(&self, user: Document) -> Result<Document, RepositoryError> {
        let result = self.collection.insert_one(&user).await?;

        let mut created = doc! { "_id": result.inserted_id };
        for (key, value) in user {
            created.insert(key, value);
        }
        Ok(created)
    }

    async fn update(&self, id: &str, partial: Document) -> Result<Option<Document>, RepositoryError> {
        let id = parse_user_id(id)?;

        // MongoDB rejects an empty $set
        if !partial.is_empty() {
            self.collection
                .update_one(doc! { "_id": id }, doc! { "$set": partial })
                .await?;
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let id = parse_user_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
