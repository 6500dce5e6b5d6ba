use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use otriples_db::{init_pool, run_migrations};
use otriples_server::{create_router, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: OTRIPLES_LISTEN_ADDR (default: 0.0.0.0:3000)");
            eprintln!("Optional: OTRIPLES_DATABASE_URL (default: sqlite://otriples.db)");
            eprintln!("Optional: OTRIPLES_RECENT_WINDOW_SECS (default: 60)");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting OtripleS server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Database: {}", config.database_url);
    tracing::info!(
        "Recent window: {}s",
        config.validation.recent_window.num_seconds()
    );

    // Connect to database
    let pool = match init_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Database connection error: {}", e);
            std::process::exit(1);
        }
    };

    // Run migrations
    if let Err(e) = run_migrations(&pool).await {
        eprintln!("Migration error: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Database migrations completed");

    let state = AppState::new(pool, config.validation);
    let app = create_router(state).layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("Server error");
}
