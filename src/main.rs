use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use agrisetu_backend::auth::middleware::JwtSecret;
use agrisetu_backend::create_pool;
use agrisetu_backend::handlers;
use agrisetu_backend::ml::MlClient;
use agrisetu_backend::storage::BlobStore;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    let db_data = web::Data::new(db);

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let jwt_data = web::Data::new(JwtSecret(jwt_secret));

    let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads/contracts".to_string());
    let blob_store = BlobStore::new(&upload_dir).expect("Failed to create upload directory");
    let store_data = web::Data::new(blob_store);

    let ml_url = std::env::var("ML_SERVICE_URL").unwrap_or_else(|_| "http://localhost:5001".to_string());
    let ml_data = web::Data::new(MlClient::new(ml_url));

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            // Raw-body uploads (legal PDFs) may exceed the default 256 KB cap.
            .app_data(web::PayloadConfig::new(
                agrisetu_backend::storage::MAX_LEGAL_CONTRACT_BYTES + 1024,
            ))
            .app_data(db_data.clone())
            .app_data(jwt_data.clone())
            .app_data(store_data.clone())
            .app_data(ml_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
            .service(Files::new("/uploads", store_data.root()))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
