//! Relational storage: connection pool setup and embedded schema migrations.

pub mod sqlite;

pub use sqlite::{connect, run_migrations, StorageError};
