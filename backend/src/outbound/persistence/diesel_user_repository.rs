//! PostgreSQL-backed [`UserRepository`].
//!
//! Username uniqueness is enforced by the `users_username_key` constraint, so
//! concurrent registrations of the same name cannot both succeed. Any other
//! unique violation (an id clash) is a plain query failure.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, violates_unique_constraint,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

/// Diesel implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, username: &Username) -> UserPersistenceError {
    if violates_unique_constraint(&error, USERNAME_UNIQUE_CONSTRAINT) {
        UserPersistenceError::duplicate_username(username.as_ref())
    } else {
        map_diesel_error(error)
    }
}

/// Rows are validated on the way out; a row that no longer satisfies the
/// username rules is reported as a query failure.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from_strings(row.id.as_str(), row.username.as_str()).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored user row failed validation");
        UserPersistenceError::query(format!("invalid user row {}: {err}", row.id))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: user.id().as_ref(),
            username: user.username().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, user.username()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::id.eq(id.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::created_at.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn valid_rows_become_users() {
        let user = row_to_user(UserRow {
            id: "Ab3_9-xYz".to_owned(),
            username: "carol".to_owned(),
        })
        .expect("valid row");

        assert_eq!(user.id().as_ref(), "Ab3_9-xYz");
        assert_eq!(user.username().as_ref(), "carol");
    }

    #[rstest]
    fn invalid_rows_are_query_failures() {
        let err = row_to_user(UserRow {
            id: "Ab3_9-xYz".to_owned(),
            username: "no spaces allowed".to_owned(),
        })
        .expect_err("invalid row");

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn unique_violations_without_the_username_constraint_are_query_failures() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value violates unique constraint \"users_pkey\"".to_owned()),
        );
        let username = Username::new("carol").expect("username");

        let err = map_insert_error(error, &username);

        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_failures_are_connection_failures() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }
}
