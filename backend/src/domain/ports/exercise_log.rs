//! Driving port for recording and reading exercise logs.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Description, Error, ExerciseDuration, ExerciseEntry, ExerciseLog, LogQuery, UserId, Username,
};

/// Request to add one exercise entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExerciseRequest {
    pub user_id: UserId,
    pub description: Description,
    pub duration: ExerciseDuration,
    /// Calendar date of the exercise; `None` means today.
    pub date: Option<NaiveDate>,
}

/// Result of adding an exercise entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AddExerciseResponse {
    /// Username of the entry's owner.
    pub username: Username,
    pub entry: ExerciseEntry,
}

/// Domain use-case port for the exercise log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLogService: Send + Sync {
    /// Record an entry for an existing user.
    async fn add_exercise(
        &self,
        request: AddExerciseRequest,
    ) -> Result<AddExerciseResponse, Error>;

    /// Answer a log query: filter, sort, limit and format the user's entries.
    async fn fetch_log(&self, query: LogQuery) -> Result<ExerciseLog, Error>;
}
