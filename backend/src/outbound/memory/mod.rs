//! In-memory store adapters.
//!
//! Used when no database URL is configured and by the HTTP tests. Both
//! adapters keep their state behind a single `std::sync::Mutex`, so the
//! username check-and-insert is atomic and appends are totally ordered.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::ports::{
    ExerciseLogRepository, ExerciseLogRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{ExerciseEntry, NewExerciseEntry, User, UserId, Username};

fn lock<T, E>(
    mutex: &Mutex<T>,
    poisoned: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'_, T>, E> {
    mutex
        .lock()
        .map_err(|err| poisoned(format!("in-memory store lock poisoned: {err}")))
}

/// Users held in registration order.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = lock(&self.users, UserPersistenceError::query)?;
        if users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let users = lock(&self.users, UserPersistenceError::query)?;
        Ok(users.clone())
    }
}

/// Exercise entries held in append order.
#[derive(Debug, Default)]
pub struct InMemoryExerciseLogRepository {
    entries: Mutex<Vec<ExerciseEntry>>,
}

#[async_trait]
impl ExerciseLogRepository for InMemoryExerciseLogRepository {
    async fn append(
        &self,
        entry: &NewExerciseEntry,
    ) -> Result<ExerciseEntry, ExerciseLogRepositoryError> {
        let stored = ExerciseEntry::from(entry.clone());
        lock(&self.entries, ExerciseLogRepositoryError::query)?.push(stored.clone());
        Ok(stored)
    }

    async fn query_range(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExerciseEntry>, ExerciseLogRepositoryError> {
        let entries = lock(&self.entries, ExerciseLogRepositoryError::query)?;
        Ok(entries
            .iter()
            .filter(|entry| entry.user_id() == user_id)
            .filter(|entry| from.is_none_or(|from| entry.date() > from))
            .filter(|entry| to.is_none_or(|to| entry.date() < to))
            .cloned()
            .collect())
    }
}
