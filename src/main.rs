//! GearGuard Server - Maintenance Management System
//!
//! A Rust REST API server for equipment maintenance management.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearguard_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "gearguard_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting GearGuard Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Seeded accounts ship without credentials until first boot
    let seeded = services
        .auth
        .ensure_bootstrap_passwords()
        .await
        .expect("Failed to bootstrap user passwords");
    if seeded > 0 {
        tracing::info!("Assigned the bootstrap password to {} user(s)", seeded);
    }

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        .route("/users", get(api::auth::list_users))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id/scrap", post(api::equipment::scrap_equipment))
        // Equipment categories
        .route("/categories", get(api::categories::list_categories))
        .route("/categories", post(api::categories::create_category))
        .route("/categories/:id", get(api::categories::get_category))
        .route("/categories/:id", put(api::categories::update_category))
        .route("/categories/:id", delete(api::categories::delete_category))
        // Maintenance requests
        .route("/requests", get(api::requests::list_requests))
        .route("/requests", post(api::requests::create_request))
        .route("/requests/:id", get(api::requests::get_request))
        .route("/requests/:id", put(api::requests::update_request))
        .route("/requests/:id/assign-to-me", post(api::requests::assign_to_me))
        .route("/requests/:id/mark-repaired", post(api::requests::mark_repaired))
        // Kanban stages
        .route("/stages", get(api::stages::list_stages))
        .route("/stages", post(api::stages::create_stage))
        .route("/stages/:id", get(api::stages::get_stage))
        .route("/stages/:id", put(api::stages::update_stage))
        .route("/stages/:id", delete(api::stages::delete_stage))
        // Maintenance teams
        .route("/teams", get(api::teams::list_teams))
        .route("/teams", post(api::teams::create_team))
        .route("/teams/:id", get(api::teams::get_team))
        .route("/teams/:id", put(api::teams::update_team))
        // Work centers
        .route("/work-centers", get(api::work_centers::list_work_centers))
        .route("/work-centers", post(api::work_centers::create_work_center))
        .route("/work-centers/:id", get(api::work_centers::get_work_center))
        .route("/work-centers/:id", put(api::work_centers::update_work_center))
        // Directory
        .route("/departments", get(api::directory::list_departments))
        .route("/employees", get(api::directory::list_employees))
        .route("/vendors", get(api::directory::list_vendors))
        // Audit trail
        .route(
            "/audit/:record_type/:record_id",
            get(api::audit::get_audit_trail),
        )
        .route(
            "/audit/:record_type/:record_id/messages",
            post(api::audit::post_message),
        )
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
