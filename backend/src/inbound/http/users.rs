//! User registration and listing handlers.
//!
//! ```text
//! POST /api/exercise/new-user  username=alice
//! GET  /api/exercise/users
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{USERNAME, require_text};
use crate::inbound::http::{ApiResult, JsonOrForm};

/// Registration body for `POST /api/exercise/new-user`, as JSON or form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct NewUserRequest {
    #[serde(default)]
    pub username: Option<String>,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// Register a new username.
///
/// The name is case-folded before the uniqueness check, so `Alice` and
/// `alice` collide.
#[utoipa::path(
    post,
    path = "/api/exercise/new-user",
    request_body(
        content = NewUserRequest,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid or taken username", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/new-user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: JsonOrForm<NewUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let username = require_text(payload.into_inner().username, USERNAME)?;
    let user = state.users.create(&username).await?;
    Ok(web::Json(user.into()))
}

/// List every registered user.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use exercise_tracker::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api/exercise").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/exercise/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = String, content_type = "text/plain")
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}
