mod audit;
mod catalog;
mod config;
mod db;
mod documents;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::audit::benchmark::{BenchmarkResolver, PgBenchmarkStore};
use crate::audit::excerpt::S3DocumentStore;
use crate::catalog::cache::CatalogCache;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::documents::engine::TemplateEngine;
use crate::documents::source::FsTemplateSource;
use crate::llm_client::InferenceClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compliance API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    let documents = S3DocumentStore::new(s3, config.s3_bucket.clone());
    info!("S3 document store initialized (bucket: {})", config.s3_bucket);

    // Initialize inference client
    let inference = InferenceClient::new(config.inference_settings())?;
    info!(
        "Inference client initialized (model: {}, url: {})",
        inference.model(),
        config.inference_api_url
    );

    // Build and warm the catalog cache
    let catalog = Arc::new(CatalogCache::new(
        config.catalog_cache_max_entries,
        config.catalog_cache_ttl,
    ));
    catalog.warm();

    let source = FsTemplateSource::new(&config.templates_dir);
    info!("Template source: {}", source.root().display());
    let templates = TemplateEngine::new(source);

    // Build app state
    let state = AppState {
        db: db.clone(),
        llm: Arc::new(inference.clone()),
        inference,
        benchmarks: BenchmarkResolver::new(Arc::new(PgBenchmarkStore::new(db))),
        documents: Some(Arc::new(documents)),
        catalog,
        templates: Arc::new(templates),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "compliance-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    let s3 = aws_sdk_s3::config::Builder::from(&s3_config)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(s3)
}
