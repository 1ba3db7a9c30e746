//! Session API handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! POST /api/v1/logout
//! GET /api/v1/me
//! ```

use actix_web::web::Either;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError, Navigation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::protected::redirect_response;
use crate::inbound::http::schemas::ErrorEnvelope;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::DASHBOARD_PATH;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Identity of the authenticated caller.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,
}

/// Authenticate user and establish a session.
///
/// Accepts JSON from API clients and form posts from the login view. JSON
/// callers get an empty `200`; form posts are sent on to the dashboard.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success (JSON body)",
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 303, description = "Login success (form post); redirect to the dashboard"),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 401, description = "Invalid credentials", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Either<web::Json<LoginRequest>, web::Form<LoginRequest>>,
) -> ApiResult<HttpResponse> {
    let (request, from_form) = match payload {
        Either::Left(json) => (json.into_inner(), false),
        Either::Right(form) => (form.into_inner(), true),
    };
    let credentials = LoginCredentials::try_from(request).map_err(map_login_validation_error)?;
    let user_id = state.authenticator.authenticate(&credentials)?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, from_form, "user logged in");
    if from_form {
        Ok(redirect_response(&Navigation::replace(DASHBOARD_PATH)))
    } else {
        Ok(HttpResponse::Ok().finish())
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::EmptyUsername => "empty_username",
        LoginValidationError::EmptyPassword => "empty_password",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": code }))
}

/// End the session and send the caller back to the login view.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 303, description = "Session cleared; redirect to the login view"),
    ),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    session.clear();
    redirect_response(&Navigation::replace(state.gate.login_path()))
}

/// Return the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Authenticated user", body = CurrentUser),
        (status = 401, description = "Unauthorised", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["session"],
    operation_id = "currentUser"
)]
#[get("/me")]
pub async fn current_user(session: SessionContext) -> ApiResult<web::Json<CurrentUser>> {
    let id = session.require_user_id()?;
    Ok(web::Json(CurrentUser { id: id.to_string() }))
}
