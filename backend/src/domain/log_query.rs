//! Log query engine.
//!
//! Turns the raw entries returned by the log store into the response
//! envelope: newest first, truncated to the effective limit, each entry
//! projected to `{description, duration, date}` with a formatted date.
//!
//! The engine is pure; fetching (user lookup, range read) happens in
//! [`crate::domain::ExerciseLogServiceImpl`], which calls [`shape_log`] once
//! both reads have completed.

use chrono::NaiveDate;

use super::exercise::{
    ExerciseEntry, ExerciseValidationError, format_log_date, parse_exercise_date,
};
use super::user::{UserId, Username};

/// A date bound exactly as the caller supplied it, plus its parsed value.
///
/// The raw text is echoed back in the envelope untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBound {
    raw: String,
    date: NaiveDate,
}

impl DateBound {
    /// Parse a `YYYY-MM-DD` bound.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ExerciseValidationError> {
        let raw = raw.into();
        let date = parse_exercise_date(&raw)?;
        Ok(Self { raw, date })
    }

    /// The caller's original text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed calendar date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Interpret a raw `limit` parameter.
///
/// Only a positive integer counts as a limit; anything else (absent, blank,
/// zero, negative, fractional, non-numeric) means "return everything".
///
/// # Examples
/// ```
/// use exercise_tracker::domain::parse_limit;
///
/// assert_eq!(parse_limit(Some("2")), Some(2));
/// assert_eq!(parse_limit(Some("0")), None);
/// assert_eq!(parse_limit(Some("ten")), None);
/// assert_eq!(parse_limit(None), None);
/// ```
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|limit| *limit > 0)
}

/// Parameters of one log query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub user_id: UserId,
    /// Exclusive lower bound.
    pub from: Option<DateBound>,
    /// Exclusive upper bound.
    pub to: Option<DateBound>,
    /// Caller-supplied positive limit, if any.
    pub limit: Option<usize>,
}

impl LogQuery {
    /// Query for every entry of `user_id`.
    pub fn all(user_id: UserId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
            limit: None,
        }
    }

    pub fn from_date(&self) -> Option<NaiveDate> {
        self.from.as_ref().map(DateBound::date)
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        self.to.as_ref().map(DateBound::date)
    }
}

/// One formatted log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogItem {
    pub description: String,
    pub duration: f64,
    /// Formatted as `ddd MMM DD, YYYY`.
    pub date: String,
}

impl From<&ExerciseEntry> for LogItem {
    fn from(entry: &ExerciseEntry) -> Self {
        Self {
            description: entry.description().as_ref().to_owned(),
            duration: entry.duration().value(),
            date: format_log_date(entry.date()),
        }
    }
}

/// Response envelope for a log query.
///
/// ## Invariants
/// - `log` is sorted by date, newest first.
/// - `log.len() <= record_limit` and `log.len() <= total_records`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseLog {
    pub user_id: UserId,
    /// `None` when the id does not belong to a registered user.
    pub username: Option<Username>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Matching entries before truncation.
    pub total_records: usize,
    /// Limit actually applied.
    pub record_limit: usize,
    pub log: Vec<LogItem>,
}

/// Shape fetched entries into the response envelope.
///
/// Entries are sorted newest first (ties keep store order), the effective
/// limit is the caller's limit or else the total count, and the head of the
/// sorted list up to that limit is formatted.
pub fn shape_log(
    query: LogQuery,
    username: Option<Username>,
    mut entries: Vec<ExerciseEntry>,
) -> ExerciseLog {
    entries.sort_by(|a, b| b.date().cmp(&a.date()));

    let total_records = entries.len();
    let record_limit = query.limit.unwrap_or(total_records);
    let log = entries.iter().take(record_limit).map(LogItem::from).collect();

    let LogQuery {
        user_id, from, to, ..
    } = query;
    ExerciseLog {
        user_id,
        username,
        from: from.map(|bound| bound.raw),
        to: to.map(|bound| bound.raw),
        total_records,
        record_limit,
        log,
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for sorting, limiting and projection.
    use super::*;
    use crate::domain::{Description, ExerciseDuration};
    use rstest::{fixture, rstest};

    fn entry(date: &str, description: &str) -> ExerciseEntry {
        ExerciseEntry::new(
            UserId::new("u1").expect("user id"),
            Description::new(description).expect("description"),
            ExerciseDuration::new(30.0).expect("duration"),
            parse_exercise_date(date).expect("date"),
        )
    }

    #[fixture]
    fn three_entries() -> Vec<ExerciseEntry> {
        vec![
            entry("2023-05-10", "middle"),
            entry("2023-05-01", "oldest"),
            entry("2023-05-20", "newest"),
        ]
    }

    fn query(limit: Option<usize>) -> LogQuery {
        LogQuery {
            limit,
            ..LogQuery::all(UserId::new("u1").expect("user id"))
        }
    }

    #[rstest]
    fn sorts_newest_first_and_returns_all_without_limit(three_entries: Vec<ExerciseEntry>) {
        let log = shape_log(query(None), None, three_entries);

        let descriptions: Vec<_> = log.log.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(descriptions, ["newest", "middle", "oldest"]);
        assert_eq!(log.total_records, 3);
        assert_eq!(log.record_limit, 3);
    }

    #[rstest]
    fn limit_keeps_the_most_recent(three_entries: Vec<ExerciseEntry>) {
        let log = shape_log(query(Some(1)), None, three_entries);

        assert_eq!(log.log.len(), 1);
        assert_eq!(log.log[0].date, "Sat May 20, 2023");
        assert_eq!(log.record_limit, 1);
        assert_eq!(log.total_records, 3);
    }

    #[rstest]
    fn limit_above_total_is_reported_as_given(three_entries: Vec<ExerciseEntry>) {
        let log = shape_log(query(Some(10)), None, three_entries);

        assert_eq!(log.log.len(), 3);
        assert_eq!(log.record_limit, 10);
    }

    #[rstest]
    fn empty_result_has_zero_counts() {
        let log = shape_log(query(None), None, Vec::new());
        assert!(log.log.is_empty());
        assert_eq!(log.total_records, 0);
        assert_eq!(log.record_limit, 0);
    }

    #[rstest]
    fn equal_dates_keep_store_order() {
        let entries = vec![entry("2023-01-01", "first"), entry("2023-01-01", "second")];
        let log = shape_log(query(None), None, entries);
        assert_eq!(log.log[0].description, "first");
        assert_eq!(log.log[1].description, "second");
    }

    #[rstest]
    fn echoes_bounds_and_username() {
        let mut q = query(None);
        q.from = Some(DateBound::parse("2023-5-1").expect("from"));
        q.to = Some(DateBound::parse("2023-05-20").expect("to"));
        let username = Username::new("runner").expect("username");

        let log = shape_log(q, Some(username.clone()), Vec::new());

        assert_eq!(log.from.as_deref(), Some("2023-5-1"));
        assert_eq!(log.to.as_deref(), Some("2023-05-20"));
        assert_eq!(log.username, Some(username));
        assert_eq!(log.user_id.as_ref(), "u1");
    }

    #[rstest]
    #[case(Some("3"), Some(3))]
    #[case(Some(" 7 "), Some(7))]
    #[case(Some("0"), None)]
    #[case(Some("-2"), None)]
    #[case(Some("1.5"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn limit_parsing(#[case] raw: Option<&str>, #[case] expected: Option<usize>) {
        assert_eq!(parse_limit(raw), expected);
    }

    #[rstest]
    fn bound_parse_rejects_garbage() {
        assert!(DateBound::parse("yesterday").is_err());
    }
}
