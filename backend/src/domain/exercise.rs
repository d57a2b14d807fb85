//! Exercise log entries and their value types.
//!
//! Entries are immutable once written. Dates are calendar days; time of day
//! carries no meaning and is never stored.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::user::UserId;

/// Output pattern for log dates, e.g. `Sun Jan 03, 2016`.
pub const LOG_DATE_FORMAT: &str = "%a %b %d, %Y";

/// Validation errors raised when constructing exercise values.
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseValidationError {
    EmptyDescription,
    NonPositiveDuration { value: f64 },
    InvalidDate { value: String },
}

impl fmt::Display for ExerciseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "description must not be empty"),
            Self::NonPositiveDuration { value } => {
                write!(f, "duration must be a positive number, got {value}")
            }
            Self::InvalidDate { value } => {
                write!(f, "Please enter date in the YYYY-MM-DD format (got {value:?})")
            }
        }
    }
}

impl std::error::Error for ExerciseValidationError {}

/// Non-empty free-text description of an exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    /// Validate and construct a [`Description`].
    pub fn new(value: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

/// Positive, finite exercise duration. The unit is chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExerciseDuration(f64);

impl ExerciseDuration {
    /// Validate and construct an [`ExerciseDuration`].
    pub fn new(value: f64) -> Result<Self, ExerciseValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ExerciseValidationError::NonPositiveDuration { value });
        }
        Ok(Self(value))
    }

    /// Raw numeric value.
    pub fn value(self) -> f64 {
        self.0
    }
}

static DATE_RE: OnceLock<Regex> = OnceLock::new();

fn date_regex() -> &'static Regex {
    DATE_RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$")
            .unwrap_or_else(|error| panic!("date regex failed to compile: {error}"))
    })
}

/// Parse a `YYYY-MM-DD` calendar date. Month and day may omit the leading
/// zero; the date must exist on the calendar.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::parse_exercise_date;
///
/// let date = parse_exercise_date("2016-1-3").expect("valid date");
/// assert_eq!(date.to_string(), "2016-01-03");
/// assert!(parse_exercise_date("2016-02-30").is_err());
/// ```
pub fn parse_exercise_date(raw: &str) -> Result<NaiveDate, ExerciseValidationError> {
    let invalid = || ExerciseValidationError::InvalidDate {
        value: raw.to_owned(),
    };
    let captures = date_regex().captures(raw.trim()).ok_or_else(invalid)?;
    let field = |index: usize| captures.get(index).map(|m| m.as_str());

    let year = field(1).and_then(|s| s.parse::<i32>().ok());
    let month = field(2).and_then(|s| s.parse::<u32>().ok());
    let day = field(3).and_then(|s| s.parse::<u32>().ok());

    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => {
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Render a date the way logs present it: weekday, month, zero-padded day,
/// four-digit year.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use exercise_tracker::domain::format_log_date;
///
/// let date = NaiveDate::from_ymd_opt(2016, 1, 3).expect("valid date");
/// assert_eq!(format_log_date(date), "Sun Jan 03, 2016");
/// ```
pub fn format_log_date(date: NaiveDate) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Validated input for appending an entry to the log store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExerciseEntry {
    pub user_id: UserId,
    pub description: Description,
    pub duration: ExerciseDuration,
    pub date: NaiveDate,
}

/// Stored exercise log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    user_id: UserId,
    description: Description,
    duration: ExerciseDuration,
    date: NaiveDate,
}

impl ExerciseEntry {
    /// Build an entry from validated components.
    pub fn new(
        user_id: UserId,
        description: Description,
        duration: ExerciseDuration,
        date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            description,
            duration,
            date,
        }
    }

    /// Owner of the entry.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn duration(&self) -> ExerciseDuration {
        self.duration
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl From<NewExerciseEntry> for ExerciseEntry {
    fn from(value: NewExerciseEntry) -> Self {
        let NewExerciseEntry {
            user_id,
            description,
            duration,
            date,
        } = value;
        Self::new(user_id, description, duration, date)
    }
}
