//! Exercise log service.
//!
//! Implements [`ExerciseLogService`] by combining the user directory, the
//! log store and the log query engine.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    AddExerciseRequest, AddExerciseResponse, ExerciseLogRepository, ExerciseLogRepositoryError,
    ExerciseLogService, UserDirectory,
};
use crate::domain::{Error, ErrorCode, ExerciseLog, LogQuery, NewExerciseEntry, shape_log};

fn map_repository_error(err: ExerciseLogRepositoryError) -> Error {
    match err {
        ExerciseLogRepositoryError::Connection { message } => {
            error!(error = %message, "exercise log store unavailable");
            Error::internal(format!("exercise log store unavailable: {message}"))
        }
        ExerciseLogRepositoryError::Query { message } => {
            error!(error = %message, "exercise log query failed");
            Error::internal(format!("exercise log store error: {message}"))
        }
    }
}

/// Exercise log use cases over a log store `L`.
#[derive(Clone)]
pub struct ExerciseLogServiceImpl<L> {
    users: Arc<dyn UserDirectory>,
    logs: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L> ExerciseLogServiceImpl<L> {
    /// Create the service.
    ///
    /// `clock` supplies the default date for entries submitted without one.
    ///
    /// # Examples
    /// ```no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use exercise_tracker::domain::{ExerciseLogServiceImpl, UserDirectoryService};
    /// # use exercise_tracker::outbound::memory::{
    /// #     InMemoryExerciseLogRepository, InMemoryUserRepository,
    /// # };
    /// let users = Arc::new(UserDirectoryService::new(Arc::new(InMemoryUserRepository::default())));
    /// let service = ExerciseLogServiceImpl::new(
    ///     users,
    ///     Arc::new(InMemoryExerciseLogRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(users: Arc<dyn UserDirectory>, logs: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { users, logs, clock }
    }
}

#[async_trait]
impl<L> ExerciseLogService for ExerciseLogServiceImpl<L>
where
    L: ExerciseLogRepository,
{
    async fn add_exercise(
        &self,
        request: AddExerciseRequest,
    ) -> Result<AddExerciseResponse, Error> {
        let AddExerciseRequest {
            user_id,
            description,
            duration,
            date,
        } = request;

        let username = self.users.resolve_username(&user_id).await?;
        let date = date.unwrap_or_else(|| self.clock.utc().date_naive());

        let entry = self
            .logs
            .append(&NewExerciseEntry {
                user_id,
                description,
                duration,
                date,
            })
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %entry.user_id(), %date, "exercise recorded");

        Ok(AddExerciseResponse { username, entry })
    }

    async fn fetch_log(&self, query: LogQuery) -> Result<ExerciseLog, Error> {
        let username = match self.users.resolve_username(&query.user_id).await {
            Ok(username) => Some(username),
            Err(err) if err.code() == ErrorCode::NotFound => None,
            Err(err) => return Err(err),
        };

        let entries = self
            .logs
            .query_range(&query.user_id, query.from_date(), query.to_date())
            .await
            .map_err(map_repository_error)?;

        Ok(shape_log(query, username, entries))
    }
}

#[cfg(test)]
#[path = "exercise_log_service_tests.rs"]
mod tests;
