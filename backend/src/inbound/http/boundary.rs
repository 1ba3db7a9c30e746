//! Error boundary middleware.
//!
//! Sits at the edge of the application and guarantees every failure leaves
//! as the JSON error envelope:
//!
//! - responses produced from a typed [`Error`] pass through untouched;
//! - anything else, including `Err` results escaping inner middleware and
//!   foreign 4xx responses, becomes the redacted internal error (500).
//!
//! Extractor rejections count as foreign unless the extractor is configured
//! to raise typed errors; see [`json_config`](super::error::json_config).

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::Error;

/// Middleware normalising failures into the error envelope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use prunk::inbound::http::boundary::ErrorBoundary;
///
/// let app = App::new().wrap(ErrorBoundary);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorBoundary;

impl<S, B> Transform<S, ServiceRequest> for ErrorBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = ActixError;
    type InitError = ();
    type Transform = ErrorBoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorBoundaryMiddleware { service }))
    }
}

/// Service wrapper produced by [`ErrorBoundary`].
pub struct ErrorBoundaryMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for ErrorBoundaryMiddleware<S>
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
        let http_req = req.request().clone();
        let fut = self.service.call(req);
        Box::pin(async move {
            match fut.await {
                Ok(res) => Ok(normalise(res)),
                Err(err) => {
                    let error = Error::from(err);
                    let response = error.error_response();
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
            }
        })
    }
}

fn normalise<B>(res: ServiceResponse<B>) -> ServiceResponse<EitherBody<B>> {
    let replacement = match res.response().error() {
        Some(err) if err.as_error::<Error>().is_none() => Some(classify(err, res.status())),
        Some(_) | None => None,
    };

    match replacement {
        None => res.map_into_left_body(),
        Some(error) => {
            let (req, _) = res.into_parts();
            ServiceResponse::new(req, error.error_response()).map_into_right_body()
        }
    }
}

fn classify(err: &ActixError, status: StatusCode) -> Error {
    error!(
        error = %err,
        status = status.as_u16(),
        "foreign failure mapped to internal error"
    );
    Error::internal(err.to_string())
}
