//! Driving port for user registration and lookup.
//!
//! HTTP handlers and the exercise log service talk to users only through this
//! port, so neither needs to know how users are stored.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, Username};

/// Domain use-case port for the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Register `username` after validating and case-folding it.
    ///
    /// Fails with `InvalidRequest` for a malformed name and `Conflict` when the
    /// folded name is taken.
    async fn create(&self, username: &str) -> Result<User, Error>;

    /// Username for `id`, or a `NotFound` error.
    async fn resolve_username(&self, id: &UserId) -> Result<Username, Error>;

    /// User registered under `username`, or a `NotFound` error.
    async fn find_by_username(&self, username: &Username) -> Result<User, Error>;

    /// Every registered user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
