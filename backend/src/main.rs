use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_service::services::{
    AgentCodeSource, AgentLifecycleService, AgentStore, InMemoryAgentStore, PgAgentStore,
    RandomCodeGenerator,
};
use agent_service::{handlers, health_check, AppState, Config, StorageBackend};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_service=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");

    info!("Starting agent service on {}:{}", config.host, config.port);

    let store: Arc<dyn AgentStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL is required for the postgres backend");

            let db_pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await
                .expect("Failed to create database pool");

            info!("Database connection pool established");

            sqlx::migrate!("./migrations")
                .run(&db_pool)
                .await
                .expect("Failed to run database migrations");

            info!("Database migrations completed");

            Arc::new(PgAgentStore::new(db_pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory agent store; records are lost on shutdown");
            Arc::new(InMemoryAgentStore::new())
        }
    };

    let codes: Arc<dyn AgentCodeSource> = match config.agent_code_seed {
        Some(seed) => {
            info!(seed, "Agent code generator seeded");
            Arc::new(RandomCodeGenerator::seeded(seed))
        }
        None => Arc::new(RandomCodeGenerator::from_entropy()),
    };

    let agents = AgentLifecycleService::with_code_source(store, codes)
        .max_code_attempts(config.agent_code_max_attempts);

    let server_addr = format!("{}:{}", config.host, config.port);

    let app_state = web::Data::new(AppState { agents });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health_check))
            .service(web::scope("/v1").configure(handlers::configure_agent_routes))
    })
    .bind(&server_addr)?
    .run()
    .await
}
