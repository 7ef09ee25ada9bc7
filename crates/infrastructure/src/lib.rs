//! Infrastructure layer - adapters for the application ports
//!
//! SQLite-backed implementations of the store ports, the static message
//! catalog, and configuration loading.

pub mod config;
pub mod messages;
pub mod persistence;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use messages::StaticMessages;
pub use persistence::connection::{ConnectionPool, DatabaseError, create_pool};
pub use persistence::{SqliteCompanyStore, SqliteDepartmentStore, SqliteEmployeeStore};
