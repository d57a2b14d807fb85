//! Shared helpers for integration suites that need a PostgreSQL database.

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{provision_migrated_database, shared_cluster};
