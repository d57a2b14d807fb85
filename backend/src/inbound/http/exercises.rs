//! Exercise log handlers.
//!
//! ```text
//! POST /api/exercise/add  userId=..&description=run&duration=30&date=2016-01-03
//! GET  /api/exercise/log?userId=..&from=2016-01-01&to=2016-02-01&limit=5
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{AddExerciseRequest, AddExerciseResponse};
use crate::domain::{ExerciseLog, LogItem, LogQuery, format_log_date, parse_limit};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FROM, NumberOrText, TO, parse_date_bound, parse_description, parse_duration,
    parse_optional_date, parse_user_id,
};
use crate::inbound::http::{ApiResult, JsonOrForm};

/// Body for `POST /api/exercise/add`, as JSON or form.
///
/// Every field is optional at the wire level so that omissions surface as
/// validation messages.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Number, or numeric text when sent as a form.
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub duration: Option<NumberOrText>,
    /// `YYYY-MM-DD`; blank or absent means today (UTC).
    #[serde(default)]
    pub date: Option<String>,
}

/// The stored entry, labelled with its owner's username.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseResponseBody {
    /// Owner's username.
    pub user_id: String,
    pub description: String,
    pub duration: f64,
    /// Formatted as `ddd MMM DD, YYYY`.
    pub date: String,
}

impl From<AddExerciseResponse> for AddExerciseResponseBody {
    fn from(value: AddExerciseResponse) -> Self {
        let AddExerciseResponse { username, entry } = value;
        Self {
            user_id: username.into(),
            description: entry.description().as_ref().to_owned(),
            duration: entry.duration().value(),
            date: format_log_date(entry.date()),
        }
    }
}

/// Query string for `GET /api/exercise/log`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogQueryParams {
    /// Required.
    pub user_id: Option<String>,
    /// Exclusive lower bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Exclusive upper bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Positive integer; anything else returns every entry.
    pub limit: Option<String>,
}

/// One log line.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct LogItemResponse {
    pub description: String,
    pub duration: f64,
    pub date: String,
}

impl From<LogItem> for LogItemResponse {
    fn from(item: LogItem) -> Self {
        Self {
            description: item.description,
            duration: item.duration,
            date: item.date,
        }
    }
}

/// Log envelope. Absent `username`, `from` and `to` are omitted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLogResponse {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub total_records: usize,
    pub record_limit: usize,
    pub log: Vec<LogItemResponse>,
}

impl From<ExerciseLog> for ExerciseLogResponse {
    fn from(value: ExerciseLog) -> Self {
        Self {
            user_id: value.user_id.into(),
            username: value.username.map(Into::into),
            from: value.from,
            to: value.to,
            total_records: value.total_records,
            record_limit: value.record_limit,
            log: value.log.into_iter().map(LogItemResponse::from).collect(),
        }
    }
}

impl TryFrom<AddExerciseBody> for AddExerciseRequest {
    type Error = crate::domain::Error;

    fn try_from(body: AddExerciseBody) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_user_id(body.user_id)?,
            description: parse_description(body.description)?,
            duration: parse_duration(body.duration)?,
            date: parse_optional_date(body.date)?,
        })
    }
}

impl TryFrom<LogQueryParams> for LogQuery {
    type Error = crate::domain::Error;

    fn try_from(params: LogQueryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: parse_user_id(params.user_id)?,
            from: parse_date_bound(params.from, FROM)?,
            to: parse_date_bound(params.to, TO)?,
            limit: parse_limit(params.limit.as_deref()),
        })
    }
}

/// Record an exercise for an existing user.
#[utoipa::path(
    post,
    path = "/api/exercise/add",
    request_body(
        content = AddExerciseBody,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Entry recorded", body = AddExerciseResponseBody),
        (status = 400, description = "Invalid input or unknown userId", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["exercises"],
    operation_id = "addExercise"
)]
#[post("/add")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    payload: JsonOrForm<AddExerciseBody>,
) -> ApiResult<web::Json<AddExerciseResponseBody>> {
    let request = AddExerciseRequest::try_from(payload.into_inner())?;
    let response = state.exercises.add_exercise(request).await?;
    Ok(web::Json(response.into()))
}

/// Read a user's log, newest first.
#[utoipa::path(
    get,
    path = "/api/exercise/log",
    params(LogQueryParams),
    responses(
        (status = 200, description = "Exercise log", body = ExerciseLogResponse),
        (status = 400, description = "Missing userId or malformed bound", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["exercises"],
    operation_id = "getExerciseLog"
)]
#[get("/log")]
pub async fn get_log(
    state: web::Data<HttpState>,
    params: web::Query<LogQueryParams>,
) -> ApiResult<web::Json<ExerciseLogResponse>> {
    let query = LogQuery::try_from(params.into_inner())?;
    let log = state.exercises.fetch_log(query).await?;
    Ok(web::Json(log.into()))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
