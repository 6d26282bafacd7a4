use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use mongodb::bson::{self, Document};
use serde_json::{Map, Value};

use crate::models::{normalize_user, ID_FIELD, STORE_ID_FIELD};
use crate::repository::{parse_user_id, UserRepository};
use crate::utils::ApiError;

/// Exposed to browsers through CORS, see `main`.
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

/// Request bodies must be JSON objects. Identifier keys are dropped: the id
/// is always assigned by the store. Top-level keys with `.` or a leading `$`
/// are rejected, `$set` would read them as paths or operators.
fn parse_user_body(body: &[u8]) -> Result<Document, ApiError> {
    let fields: Map<String, Value> =
        serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)?;
    if fields.keys().any(|key| key.contains('.') || key.starts_with('$')) {
        return Err(ApiError::InvalidBody);
    }
    let mut user = bson::to_document(&fields).map_err(|_| ApiError::InvalidBody)?;

    user.remove(STORE_ID_FIELD);
    user.remove(ID_FIELD);
    Ok(user)
}

/// GET /users - Lista todos os usuários
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, in store order", body = [crate::models::User],
            headers(("X-Total-Count" = usize, description = "Number of users returned")))
    )
)]
pub async fn list_users(repository: web::Data<dyn UserRepository>) -> Result<HttpResponse, ApiError> {
    let users: Vec<Value> = repository
        .find_all()
        .await?
        .into_iter()
        .map(normalize_user)
        .collect();

    Ok(HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, users.len().to_string()))
        .json(users))
}

/// GET /users/{id} - Busca usuário específico
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24 hex characters)")),
    responses(
        (status = 200, description = "User found", body = crate::models::User),
        (status = 404, description = "Malformed or unknown id", body = crate::utils::ErrorResponse)
    )
)]
pub async fn get_user(
    path: web::Path<String>,
    repository: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let user = repository
        .find(&path.into_inner())
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(normalize_user(user)))
}

/// POST /users - Cria novo usuário
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body(content = crate::models::User, content_type = "application/json"),
    responses(
        (status = 201, description = "User created", body = crate::models::User),
        (status = 400, description = "ContentTypeNotSupported or InvalidBody", body = crate::utils::ErrorResponse)
    )
)]
pub async fn create_user(
    req: HttpRequest,
    body: web::Bytes,
    repository: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, ApiError> {
    // Checked before the body is looked at, so nothing reaches the store
    if !req.content_type().eq_ignore_ascii_case("application/json") {
        return Err(ApiError::ContentTypeNotSupported);
    }

    let user = parse_user_body(&body)?;
    let created = repository.create(user).await?;

    if let Ok(id) = created.get_object_id(STORE_ID_FIELD) {
        log::info!("👤 User created: {}", id);
    }

    Ok(HttpResponse::Created().json(normalize_user(created)))
}

/// PUT /users/{id} - Atualiza usuário (merge dos campos enviados)
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24 hex characters)")),
    request_body(content = crate::models::User, content_type = "application/json",
        description = "Fields to overwrite; absent fields keep their stored value"),
    responses(
        (status = 200, description = "User after the merge", body = crate::models::User),
        (status = 400, description = "Body is not a JSON object", body = crate::utils::ErrorResponse),
        (status = 404, description = "Malformed or unknown id", body = crate::utils::ErrorResponse)
    )
)]
pub async fn update_user(
    path: web::Path<String>,
    body: web::Bytes,
    repository: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    // A bad id wins over a bad body
    parse_user_id(&id)?;
    let partial = parse_user_body(&body)?;

    let user = repository
        .update(&id, partial)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    Ok(HttpResponse::Ok().json(normalize_user(user)))
}

/// DELETE /users/{id} - Remove usuário
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id (24 hex characters)")),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "Malformed or unknown id", body = crate::utils::ErrorResponse)
    )
)]
pub async fn delete_user(
    path: web::Path<String>,
    repository: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if !repository.delete(&id).await? {
        return Err(ApiError::UserNotFound);
    }

    log::info!("🗑️  User deleted: {}", id);

    Ok(HttpResponse::NoContent().finish())
}
