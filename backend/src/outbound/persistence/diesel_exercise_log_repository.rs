//! PostgreSQL-backed [`ExerciseLogRepository`].

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ExerciseLogRepository, ExerciseLogRepositoryError};
use crate::domain::{Description, ExerciseDuration, ExerciseEntry, NewExerciseEntry, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ExerciseLogRow, NewExerciseLogRow};
use super::pool::{DbPool, PoolError};
use super::schema::exercise_logs;

/// Diesel implementation of the exercise log port.
#[derive(Clone)]
pub struct DieselExerciseLogRepository {
    pool: DbPool,
}

impl DieselExerciseLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExerciseLogRepositoryError {
    map_basic_pool_error(error, ExerciseLogRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ExerciseLogRepositoryError {
    map_basic_diesel_error(
        error,
        ExerciseLogRepositoryError::query,
        ExerciseLogRepositoryError::connection,
    )
}

fn row_to_entry(row: ExerciseLogRow) -> Result<ExerciseEntry, ExerciseLogRepositoryError> {
    let invalid = |what: String| {
        warn!(user_id = %row.user_id, %what, "stored exercise row failed validation");
        ExerciseLogRepositoryError::query(format!("invalid exercise row: {what}"))
    };

    let user_id = UserId::new(row.user_id.as_str()).map_err(|err| invalid(err.to_string()))?;
    let description =
        Description::new(row.description.as_str()).map_err(|err| invalid(err.to_string()))?;
    let duration = ExerciseDuration::new(row.duration).map_err(|err| invalid(err.to_string()))?;

    Ok(ExerciseEntry::new(user_id, description, duration, row.date))
}

#[async_trait]
impl ExerciseLogRepository for DieselExerciseLogRepository {
    async fn append(
        &self,
        entry: &NewExerciseEntry,
    ) -> Result<ExerciseEntry, ExerciseLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewExerciseLogRow {
            user_id: entry.user_id.as_ref(),
            description: entry.description.as_ref(),
            duration: entry.duration.value(),
            date: entry.date,
        };

        let stored: ExerciseLogRow = diesel::insert_into(exercise_logs::table)
            .values(&row)
            .returning(ExerciseLogRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_entry(stored)
    }

    async fn query_range(
        &self,
        user_id: &UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<ExerciseEntry>, ExerciseLogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = exercise_logs::table
            .filter(exercise_logs::user_id.eq(user_id.as_ref()))
            .into_boxed();
        if let Some(from) = from {
            query = query.filter(exercise_logs::date.gt(from));
        }
        if let Some(to) = to {
            query = query.filter(exercise_logs::date.lt(to));
        }

        let rows: Vec<ExerciseLogRow> = query
            .order(exercise_logs::id.asc())
            .select(ExerciseLogRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(duration: f64, description: &str) -> ExerciseLogRow {
        ExerciseLogRow {
            user_id: "Ab3_9-xYz".to_owned(),
            description: description.to_owned(),
            duration,
            date: NaiveDate::from_ymd_opt(2016, 1, 3).expect("date"),
        }
    }

    #[rstest]
    fn valid_rows_become_entries() {
        let entry = row_to_entry(row(30.0, "run")).expect("valid row");
        assert_eq!(entry.description().as_ref(), "run");
        assert_eq!(entry.duration().value(), 30.0);
    }

    #[rstest]
    #[case(0.0, "run")]
    #[case(30.0, "  ")]
    fn invalid_rows_are_query_failures(#[case] duration: f64, #[case] description: &str) {
        let err = row_to_entry(row(duration, description)).expect_err("invalid row");
        assert!(matches!(err, ExerciseLogRepositoryError::Query { .. }));
    }
}
