use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::MongoDB;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    /// "connected" or "unreachable"
    pub database: String,
    pub timestamp: i64,
}

impl HealthResponse {
    fn new(database_up: bool) -> Self {
        Self {
            status: if database_up { "healthy" } else { "degraded" }.to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: if database_up { "connected" } else { "unreachable" }.to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "MongoDB did not answer the ping", body = HealthResponse)
    )
)]
pub async fn health_check(db: web::Data<MongoDB>) -> impl Responder {
    match db.ping().await {
        Ok(()) => HttpResponse::Ok().json(HealthResponse::new(true)),
        Err(e) => {
            log::warn!("⚠️  Health check: MongoDB ping failed: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse::new(false))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_status() {
        let healthy = HealthResponse::new(true);
        assert_eq!(healthy.status, "healthy");
        assert_eq!(healthy.database, "connected");
        assert_eq!(healthy.service, "users-service");

        let degraded = HealthResponse::new(false);
        assert_eq!(degraded.status, "degraded");
        assert_eq!(degraded.database, "unreachable");
    }
}
