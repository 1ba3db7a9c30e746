//! Server-rendered views.
//!
//! `GET /login` is public. `GET /dashboard` is the protected view and must be
//! mounted behind [`ProtectedRoute`](super::protected::ProtectedRoute).

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, get};

/// Path of the protected dashboard view.
pub const DASHBOARD_PATH: &str = "/dashboard";

const LOGIN_PAGE: &str = concat!(
    "<!doctype html>",
    "<html><head><title>Sign in</title></head><body>",
    "<form id=\"login\" method=\"post\" action=\"/api/v1/login\">",
    "<input name=\"username\" autocomplete=\"username\">",
    "<input name=\"password\" type=\"password\" autocomplete=\"current-password\">",
    "<button type=\"submit\">Sign in</button>",
    "</form></body></html>",
);

/// Login view.
#[get("/login")]
pub async fn login_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(LOGIN_PAGE)
}

/// Protected dashboard view.
///
/// Registered as a plain handler so the caller can mount it on a resource
/// wrapped by the gate.
pub async fn dashboard() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body("Dashboard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn login_page_is_public_html() {
        let app = test::init_service(App::new().service(login_page)).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        assert!(res.status().is_success());
        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        assert!(content_type.starts_with("text/html"));
        let body = test::read_body(res).await;
        let html = std::str::from_utf8(&body).expect("utf8");
        assert!(html.contains("id=\"login\""));
    }

    #[actix_web::test]
    async fn dashboard_is_not_cached() {
        let app = test::init_service(
            App::new().route(DASHBOARD_PATH, actix_web::web::get().to(dashboard)),
        )
        .await;
        let req = test::TestRequest::get().uri(DASHBOARD_PATH).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(
            res.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
    }
}
