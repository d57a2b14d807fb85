//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{ExerciseLogServiceImpl, UserDirectoryService};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemoryExerciseLogRepository, InMemoryUserRepository};

/// Clock pinned to 2024-03-15 12:00 UTC.
pub struct FixedClock;

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

/// State wired to fresh in-memory stores and [`FixedClock`].
pub fn in_memory_state() -> HttpState {
    let users = Arc::new(UserDirectoryService::new(Arc::new(
        InMemoryUserRepository::default(),
    )));
    let exercises = Arc::new(ExerciseLogServiceImpl::new(
        users.clone(),
        Arc::new(InMemoryExerciseLogRepository::default()),
        Arc::new(FixedClock),
    ));
    HttpState::new(users, exercises)
}

/// Application with every exercise route mounted over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure)
}
