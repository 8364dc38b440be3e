//! Session handlers.
//!
//! ```text
//! POST /login {"username":"kody","password":"twixrox"}
//! POST /logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /login`.
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

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/logout",
    responses((status = 200, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().finish()
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::session::SessionContext;
    use crate::inbound::http::test_utils::session_cookie;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, get, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    #[get("/whoami")]
    async fn whoami(session: SessionContext) -> HttpResponse {
        match session.identity() {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::NoContent().finish(),
        }
    }

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(HttpState::default()))
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .service(login)
            .service(logout)
            .service(whoami)
    }

    fn login_request(username: &str, password: &str) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request()
    }

    #[rstest]
    #[case("   ", "password", "username must not be empty", "username", "empty_username")]
    #[case("kody", "", "password must not be empty", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] message: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(&app, login_request(username, password)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value.get("message").and_then(Value::as_str), Some(message));
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        assert_eq!(value["details"]["field"], field);
        assert_eq!(value["details"]["code"], code);
    }

    #[actix_web::test]
    async fn login_rejects_wrong_credentials_with_unauthorised_status() {
        let app = actix_test::init_service(test_app()).await;
        let response = actix_test::call_service(&app, login_request("kody", "wrong")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("invalid credentials")
        );
    }

    #[actix_web::test]
    async fn login_then_logout_round_trips_the_identity() {
        let app = actix_test::init_service(test_app()).await;
        let login_res = actix_test::call_service(&app, login_request("kody", "twixrox")).await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = session_cookie(&login_res);

        let who = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(who.status(), StatusCode::OK);
        assert_eq!(
            actix_test::read_body(who).await,
            "5c3f5e8a-2f4b-4b8e-9d3c-6a1f0e2b7c41"
        );

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::OK);
        let cleared = logout_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("removal cookie");
        assert!(cleared.value().is_empty());
    }
}
