//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them to
//! domain types on the way out.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{exercise_logs, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = exercise_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExerciseLogRow {
    pub user_id: String,
    pub description: String,
    pub duration: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = exercise_logs)]
pub(crate) struct NewExerciseLogRow<'a> {
    pub user_id: &'a str,
    pub description: &'a str,
    pub duration: f64,
    pub date: NaiveDate,
}
