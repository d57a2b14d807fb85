//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities for users and exercise logs, the
//! log query engine, and the use-case services that inbound adapters drive.
//! Keep types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload shared by every use case.
//! - User / UserId / Username: registered identities.
//! - ExerciseEntry and its value types: stored log lines.
//! - LogQuery / ExerciseLog / shape_log: the log query engine.
//! - UserDirectoryService / ExerciseLogServiceImpl: driving port
//!   implementations.

pub mod error;
pub mod exercise;
mod exercise_log_service;
pub mod log_query;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_directory_service;

pub use self::error::{Error, ErrorCode};
pub use self::exercise::{
    Description, ExerciseDuration, ExerciseEntry, ExerciseValidationError, LOG_DATE_FORMAT,
    NewExerciseEntry, format_log_date, parse_exercise_date,
};
pub use self::exercise_log_service::ExerciseLogServiceImpl;
pub use self::log_query::{DateBound, ExerciseLog, LogItem, LogQuery, parse_limit, shape_log};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};
pub use self::user_directory_service::UserDirectoryService;
