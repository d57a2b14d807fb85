//! Driven port for the exercise log store.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{ExerciseEntry, NewExerciseEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exercise log repository adapters.
    pub enum ExerciseLogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "exercise log repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "exercise log repository query failed: {message}",
    }
}

/// Append-only storage for exercise entries.
///
/// The store does not check that `user_id` refers to a registered user;
/// callers verify that before appending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogRepository: Send + Sync {
    /// Persist a new entry and return the stored form.
    async fn append(
        &self,
        entry: &NewExerciseEntry,
    ) -> Result<ExerciseEntry, ExerciseLogRepositoryError>;

    /// Entries for `user_id` with `from < date < to`. A `None` bound leaves
    /// that side open. Results come back in no particular order.
    async fn query_range(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExerciseEntry>, ExerciseLogRepositoryError>;
}
