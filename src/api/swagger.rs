use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users Service API",
        version = "1.0.0",
        description = "CRUD API for users stored in MongoDB.\n\n**Errors** are returned as `{\"error\": <status>, \"message\": <code>}`.\n\n**Listing** sets `X-Total-Count` to the number of users returned."
    ),
    paths(
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::User,
            crate::utils::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Create, read, update and delete users. Updates merge the fields sent into the stored document."),
        (name = "Health", description = "Service and MongoDB connectivity status."),
    )
)]
pub struct ApiDoc;
