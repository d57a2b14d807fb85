//! Domain ports for the hexagonal boundary.
//!
//! Driving ports ([`UserDirectory`], [`ExerciseLogService`]) are called by
//! inbound adapters. Driven ports ([`UserRepository`],
//! [`ExerciseLogRepository`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_log;
mod exercise_log_repository;
mod user_directory;
mod user_repository;

#[cfg(test)]
pub use exercise_log::MockExerciseLogService;
pub use exercise_log::{AddExerciseRequest, AddExerciseResponse, ExerciseLogService};
#[cfg(test)]
pub use exercise_log_repository::MockExerciseLogRepository;
pub use exercise_log_repository::{ExerciseLogRepository, ExerciseLogRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
