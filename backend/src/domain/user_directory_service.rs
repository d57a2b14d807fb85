//! User directory service.
//!
//! Implements the [`UserDirectory`] driving port on top of a
//! [`UserRepository`]: validation and case folding happen here, uniqueness is
//! checked up front and enforced again by the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{UserDirectory, UserPersistenceError, UserRepository};
use crate::domain::{Error, User, UserId, Username};

pub(crate) const USERNAME_TAKEN_MESSAGE: &str = "Username already exists, please choose another";
pub(crate) const UNKNOWN_USER_MESSAGE: &str = "Can't find that userId";

fn map_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateUsername { .. } => Error::conflict(USERNAME_TAKEN_MESSAGE),
        UserPersistenceError::Connection { message } => {
            error!(error = %message, "user repository unavailable");
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(error = %message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// User directory backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    users: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    /// Create a directory over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserDirectory for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn create(&self, username: &str) -> Result<User, Error> {
        let username =
            Username::new(username).map_err(|err| Error::invalid_request(err.to_string()))?;

        let existing = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(USERNAME_TAKEN_MESSAGE));
        }

        let user = User::new(UserId::random(), username);
        self.users
            .insert(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    async fn resolve_username(&self, id: &UserId) -> Result<Username, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .map(|user| user.username().clone())
            .ok_or_else(|| Error::not_found(UNKNOWN_USER_MESSAGE))
    }

    async fn find_by_username(&self, username: &Username) -> Result<User, Error> {
        self.users
            .find_by_username(username)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("no user named {username}")))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_persistence_error)
    }
}
