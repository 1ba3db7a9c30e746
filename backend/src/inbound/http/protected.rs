//! Route gate middleware for protected views.
//!
//! Wraps a scope so every request is checked by [`RouteGate`] before the
//! wrapped service sees it. The inner service is handed to the gate as the
//! protected content, which means it is never called for unauthenticated
//! requests.
//!
//! Unauthenticated requests receive `303 See Other` to the login path.
//! Browsers follow a 303 without recording the protected URL in history, the
//! HTTP counterpart of a replace-style navigation. The session middleware
//! must wrap outside this one so the session is loaded first.

use std::task::{Context, Poll};

use actix_session::SessionExt;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error as ActixError, HttpResponse, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::session::{SessionAuthSignal, SessionContext};
use crate::domain::{Error, GateOutcome, Navigation, RouteGate};

/// Middleware applying a [`RouteGate`] to every request it wraps.
///
/// # Examples
/// ```
/// use actix_web::{web, HttpResponse};
/// use prunk::domain::RouteGate;
/// use prunk::inbound::http::protected::ProtectedRoute;
///
/// let scope = web::scope("/app")
///     .wrap(ProtectedRoute::new(RouteGate::default()))
///     .route("/dashboard", web::get().to(|| async { HttpResponse::Ok().body("Dashboard") }));
/// ```
#[derive(Clone, Debug)]
pub struct ProtectedRoute {
    gate: RouteGate,
}

impl ProtectedRoute {
    /// Protect routes with `gate`.
    pub fn new(gate: RouteGate) -> Self {
        Self { gate }
    }
}

impl Default for ProtectedRoute {
    fn default() -> Self {
        Self::new(RouteGate::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for ProtectedRoute
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = ProtectedRouteMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ProtectedRouteMiddleware {
            service,
            gate: self.gate.clone(),
        }))
    }
}

/// Service wrapper produced by [`ProtectedRoute`].
pub struct ProtectedRouteMiddleware<S> {
    service: S,
    gate: RouteGate,
}

impl<S, B> Service<ServiceRequest> for ProtectedRouteMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session = SessionContext::new(req.get_session());
        let http_req = req.request().clone();
        let signal = SessionAuthSignal::new(&session);

        match self.gate.evaluate(&signal, || self.service.call(req)) {
            GateOutcome::Authorized(fut) => {
                debug!(path = http_req.path(), "route gate granted access");
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            GateOutcome::Redirect(navigation) => {
                debug!(
                    path = http_req.path(),
                    to = navigation.to(),
                    "route gate redirecting to login"
                );
                Box::pin(async move {
                    let response = redirect_response(&navigation);
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                })
            }
            GateOutcome::Pending => {
                debug!(path = http_req.path(), "route gate cannot decide");
                // Built inside the future so the error captures the trace id.
                Box::pin(async move {
                    let error = Error::service_unavailable("authentication state unavailable");
                    let response = error.error_response();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                })
            }
        }
    }
}

/// Render a navigation instruction as an HTTP redirect.
pub fn redirect_response(navigation: &Navigation) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, navigation.to()))
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}
