//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: mutex-guarded in-process stores for local runs and tests.
//!
//! Adapters only translate between storage representations and domain types;
//! they hold no business rules.

pub mod memory;
pub mod persistence;
