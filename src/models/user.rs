use mongodb::bson::{Bson, Document};
use serde_json::{Map, Value};

/// Identifier field as seen by clients.
pub const ID_FIELD: &str = "id";
/// Identifier field as stored in MongoDB.
pub const STORE_ID_FIELD: &str = "_id";

/// Conventional user shape, used for the OpenAPI schema. Storage is
/// schemaless: extra fields are stored and returned as sent.
// Only referenced from `#[utoipa::path]` attributes, never built at runtime.
#[allow(dead_code)]
#[derive(Debug, utoipa::ToSchema)]
pub struct User {
    /// Store-assigned identifier (24 hex characters)
    #[schema(example = "64b7f0c2e4b0a1a2b3c4d5e6")]
    pub id: String,
    #[schema(example = "Joao")]
    pub name: Option<String>,
    #[schema(example = "joao@teste.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Renders a stored user for clients: `_id` becomes `id` (hex string), every
/// other field is relaxed extended JSON.
pub fn normalize_user(mut user: Document) -> Value {
    let mut body = Map::with_capacity(user.len());

    if let Some(id) = user.remove(STORE_ID_FIELD) {
        let id = match id {
            Bson::ObjectId(oid) => Value::String(oid.to_hex()),
            other => other.into_relaxed_extjson(),
        };
        body.insert(ID_FIELD.to_string(), id);
    }

    for (key, value) in user {
        body.entry(key).or_insert_with(|| value.into_relaxed_extjson());
    }

    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_normalize_renames_store_id() {
        let oid = ObjectId::new();
        let user = doc! { "_id": oid, "name": "Joao", "email": "joao@teste.com", "age": 30 };

        let body = normalize_user(user);

        assert_eq!(
            body,
            json!({ "id": oid.to_hex(), "name": "Joao", "email": "joao@teste.com", "age": 30 })
        );
        assert!(body.get("_id").is_none());
    }

    #[test]
    fn test_normalize_keeps_nested_fields() {
        let oid = ObjectId::new();
        let user = doc! { "_id": oid, "address": { "city": "Recife" }, "tags": ["a", "b"] };

        let body = normalize_user(user);

        assert_eq!(body["address"], json!({ "city": "Recife" }));
        assert_eq!(body["tags"], json!(["a", "b"]));
    }
}
