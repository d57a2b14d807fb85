//! Builders for the HTTP state from configured adapters.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use exercise_tracker::domain::ports::{ExerciseLogRepository, UserDirectory, UserRepository};
use exercise_tracker::domain::{ExerciseLogServiceImpl, UserDirectoryService};
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::{
    InMemoryExerciseLogRepository, InMemoryUserRepository,
};
use exercise_tracker::outbound::persistence::{
    DieselExerciseLogRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Wire both services over a pair of repositories.
fn build_services<U, L>(users: U, logs: L, clock: Arc<dyn Clock>) -> HttpState
where
    U: UserRepository + 'static,
    L: ExerciseLogRepository + 'static,
{
    let directory: Arc<dyn UserDirectory> = Arc::new(UserDirectoryService::new(Arc::new(users)));
    let exercises = ExerciseLogServiceImpl::new(directory.clone(), Arc::new(logs), clock);
    HttpState::new(directory, Arc::new(exercises))
}

/// Build the shared HTTP state.
///
/// Uses the Diesel repositories when a pool is configured, otherwise the
/// in-memory ones.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => build_services(
            DieselUserRepository::new(pool.clone()),
            DieselExerciseLogRepository::new(pool.clone()),
            clock,
        ),
        None => build_services(
            InMemoryUserRepository::default(),
            InMemoryExerciseLogRepository::default(),
            clock,
        ),
    };
    web::Data::new(state)
}
