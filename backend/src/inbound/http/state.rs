//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only see driving
//! ports, so they stay testable without any store behind them.

use std::sync::Arc;

use crate::domain::ports::{ExerciseLogService, UserDirectory};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserDirectory>,
    pub exercises: Arc<dyn ExerciseLogService>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use exercise_tracker::domain::{ExerciseLogServiceImpl, UserDirectoryService};
    /// use exercise_tracker::inbound::http::state::HttpState;
    /// use exercise_tracker::outbound::memory::{
    ///     InMemoryExerciseLogRepository, InMemoryUserRepository,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// let users = Arc::new(UserDirectoryService::new(Arc::new(InMemoryUserRepository::default())));
    /// let exercises = Arc::new(ExerciseLogServiceImpl::new(
    ///     users.clone(),
    ///     Arc::new(InMemoryExerciseLogRepository::default()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(users, exercises);
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserDirectory>, exercises: Arc<dyn ExerciseLogService>) -> Self {
        Self { users, exercises }
    }
}
