//! HTTP inbound adapter exposing the exercise tracker REST endpoints.

pub mod error;
pub mod exercises;
pub mod health;
pub mod index;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Either, web};

pub use error::ApiResult;

/// Request body accepted either as JSON or as an urlencoded form.
pub type JsonOrForm<T> = Either<web::Json<T>, web::Form<T>>;

/// Register the landing page, the `/api/exercise` scope and the extractor
/// error handlers.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use exercise_tracker::inbound::http::{configure, state::HttpState};
///
/// # fn build(state: HttpState) {
/// let app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(configure);
/// # let _ = app;
/// # }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::form_config())
        .app_data(validation::query_config())
        .service(index::index)
        .service(
            web::scope("/api/exercise")
                .service(users::list_users)
                .service(users::create_user)
                .service(exercises::add_exercise)
                .service(exercises::get_log),
        );
}
