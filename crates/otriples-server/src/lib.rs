//! OtripleS Server - Axum HTTP API over the foundation services.

pub mod config;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::create_router;
pub use state::AppState;
