//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every handler's `utoipa::path` and the request and
//! response DTOs. Swagger UI serves it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::exercises::{
    AddExerciseBody, AddExerciseResponseBody, ExerciseLogResponse, LogItemResponse,
};
use crate::inbound::http::users::{NewUserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Register users, record exercises and read filtered logs. \
            Request bodies may be JSON or urlencoded forms; errors are plain text."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index::index,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::exercises::add_exercise,
        crate::inbound::http::exercises::get_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        NewUserRequest,
        UserResponse,
        AddExerciseBody,
        AddExerciseResponseBody,
        LogItemResponse,
        ExerciseLogResponse
    )),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "exercises", description = "Exercise log writes and queries"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "pages", description = "HTML pages")
    )
)]
pub struct ApiDoc;
