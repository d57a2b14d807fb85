//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request DTOs keep every field optional and untyped so that malformed input
//! reaches these helpers and fails with a domain message instead of a serde
//! one. Extractor failures that still happen (unparseable bodies or query
//! strings) are folded into the same `InvalidRequest` path.

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::http::header;
use actix_web::{HttpRequest, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{DateBound, Description, Error, ExerciseDuration, UserId, parse_exercise_date};

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("userId");
pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const DESCRIPTION: FieldName = FieldName::new("description");
pub(crate) const DURATION: FieldName = FieldName::new("duration");
pub(crate) const DATE: FieldName = FieldName::new("date");
pub(crate) const FROM: FieldName = FieldName::new("from");
pub(crate) const TO: FieldName = FieldName::new("to");

/// A numeric field as it arrives: JSON may send a number, forms always send
/// text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    Error::invalid_request(format!("missing required field: {}", field.as_str()))
}

fn invalid_field_error(field: FieldName, reason: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("invalid {}: {reason}", field.as_str()))
}

/// Present, non-blank text or a missing-field error.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_user_id(value: Option<String>) -> Result<UserId, Error> {
    let raw = require_text(value, USER_ID)?;
    UserId::new(raw).map_err(|err| invalid_field_error(USER_ID, err))
}

pub(crate) fn parse_description(value: Option<String>) -> Result<Description, Error> {
    let raw = require_text(value, DESCRIPTION)?;
    Description::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

pub(crate) fn parse_duration(value: Option<NumberOrText>) -> Result<ExerciseDuration, Error> {
    let number = match value {
        None => return Err(missing_field_error(DURATION)),
        Some(NumberOrText::Number(number)) => number,
        Some(NumberOrText::Text(text)) => {
            let text = require_text(Some(text), DURATION)?;
            text.trim()
                .parse::<f64>()
                .map_err(|_| invalid_field_error(DURATION, format!("{text:?} is not a number")))?
        }
    };
    ExerciseDuration::new(number).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Optional `YYYY-MM-DD` date; blank counts as absent.
pub(crate) fn parse_optional_date(value: Option<String>) -> Result<Option<NaiveDate>, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            parse_exercise_date(&raw).map_err(|err| Error::invalid_request(err.to_string()))
        })
        .transpose()
}

/// Optional `from`/`to` bound; blank counts as absent.
pub(crate) fn parse_date_bound(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateBound>, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| DateBound::parse(raw).map_err(|err| invalid_field_error(field, err)))
        .transpose()
}

fn extractor_error(
    kind: &str,
    err: impl std::fmt::Display,
    req: &HttpRequest,
) -> actix_web::Error {
    debug!(path = req.path(), error = %err, "request extraction failed");
    Error::invalid_request(format!("invalid {kind}: {err}")).into()
}

pub(crate) const UNSUPPORTED_BODY_MESSAGE: &str =
    "unsupported request body (expected JSON or form)";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn is_form_request(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

/// Rejection for a body that neither the JSON nor the form extractor accepts.
///
/// Bodies are tried as JSON first, so a form client sees the JSON
/// extractor's error; the content type decides which message applies.
fn body_content_type_error(req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), "request body has an unsupported content type");
    let message = if is_form_request(req) {
        "invalid form body"
    } else {
        UNSUPPORTED_BODY_MESSAGE
    };
    Error::invalid_request(message).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| match err {
        JsonPayloadError::ContentType => body_content_type_error(req),
        other => extractor_error("JSON body", other, req),
    })
}

pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, req| match err {
        UrlencodedError::ContentType => body_content_type_error(req),
        other => extractor_error("form body", other, req),
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| extractor_error("query string", err, req))
}
