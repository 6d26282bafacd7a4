mod api;
mod config;
mod database;
mod models;
mod repository;
mod utils;

use actix_cors::Cors;
use actix_web::{http::header, middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::io;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::repository::{MongoUserRepository, UserRepository};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = config::Settings::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    log::info!("🚀 Starting Users Service...");
    log::info!(
        "📊 Database: {} / collection: {}",
        settings.database,
        settings.collection
    );

    // Serving only starts once MongoDB answered the ping
    let db = database::MongoDB::connect(&settings).await.map_err(|e| {
        log::error!("❌ Failed to connect to MongoDB: {}", e);
        io::Error::new(io::ErrorKind::ConnectionRefused, e)
    })?;
    log::info!("✅ MongoDB connected successfully");

    let repository: Arc<dyn UserRepository> =
        Arc::new(MongoUserRepository::new(db.collection(&settings.collection)));
    let repository_data = web::Data::from(repository);
    let db_data = web::Data::new(db.clone());

    let bind_address = settings.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    let openapi = api::swagger::ApiDoc::openapi();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![api::users::TOTAL_COUNT_HEADER])
            .max_age(3600);

        App::new()
            .app_data(repository_data.clone())
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .route("/health", web::get().to(api::health::health_check))
            .configure(api::users::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    log::info!("👋 Server stopped, closing MongoDB connections");
    db.client().clone().shutdown().await;

    Ok(())
}
