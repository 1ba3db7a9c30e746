//! Server construction and middleware wiring.

mod config;

pub use config::{ServerConfig, ServerSettings};

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::body::MessageBody;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::{form_config, json_config};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{current_user, login, logout};
use crate::inbound::http::views::{DASHBOARD_PATH, dashboard, login_page};
use crate::inbound::http::{ErrorBoundary, ProtectedRoute};
use crate::middleware::Trace;
use std::future::Future;
use tracing::info;

/// Name of the session cookie issued on login.
pub const SESSION_COOKIE: &str = "session";

/// Shared collaborators cloned into every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Assemble the application.
///
/// Middleware order, outermost first: [`Trace`], the cookie session,
/// [`ErrorBoundary`]. `/dashboard` additionally sits behind
/// [`ProtectedRoute`] using the gate from [`HttpState`].
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let gate = http_state.gate.clone();
    let api = web::scope("/api/v1")
        .service(login)
        .service(logout)
        .service(current_user);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(form_config())
        .wrap(ErrorBoundary)
        .wrap(session)
        .wrap(Trace)
        .service(api)
        .service(login_page)
        .service(
            web::resource(DASHBOARD_PATH)
                .wrap(ProtectedRoute::new(gate))
                .route(web::get().to(dashboard)),
        )
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness flips to true once the listener is bound. Actix's own signal
/// handling is disabled; drive shutdown with [`drain_on_shutdown`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        gate,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(HttpState {
            gate,
            ..HttpState::default()
        }),
        key,
        cookie_secure,
        same_site,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .disable_signals()
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}

/// Wait for `signal`, fail liveness checks, then stop the server gracefully.
pub async fn drain_on_shutdown<F>(
    handle: ServerHandle,
    health_state: web::Data<HealthState>,
    signal: F,
) where
    F: Future<Output = ()>,
{
    signal.await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}
