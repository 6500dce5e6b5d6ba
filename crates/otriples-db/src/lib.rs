//! OtripleS DB - SQLite implementation of the storage broker.

pub mod pool;
pub mod storage_broker;

pub use pool::{init_pool, run_migrations};
pub use storage_broker::SqliteStorageBroker;

pub use sqlx::SqlitePool;
