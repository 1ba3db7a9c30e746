//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! [`SessionContext`] wraps the Actix session so handlers deal with user ids
//! rather than raw cookie keys. [`SessionAuthSignal`] exposes the same
//! session as an [`AuthSignal`] for the route gate.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::ports::AuthSignal;
use crate::domain::{AuthState, Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    ///
    /// The session id is renewed first so a pre-login cookie cannot be
    /// replayed as an authenticated one.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.as_ref())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// Malformed ids are treated as absent.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop all session state and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Authentication signal backed by the session cookie.
///
/// A readable, valid user id means authenticated; a missing or malformed id
/// means unauthenticated. A session that cannot be read at all reports
/// [`AuthState::Pending`].
pub struct SessionAuthSignal<'a>(&'a SessionContext);

impl<'a> SessionAuthSignal<'a> {
    /// Borrow a session as an authentication signal.
    pub fn new(session: &'a SessionContext) -> Self {
        Self(session)
    }
}

impl AuthSignal for SessionAuthSignal<'_> {
    fn auth_state(&self) -> AuthState {
        match self.0.user_id() {
            Ok(Some(_)) => AuthState::Authenticated,
            Ok(None) => AuthState::Unauthenticated,
            Err(error) => {
                warn!(error = %error, "session unreadable; authentication state pending");
                AuthState::Pending
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn auth_state_label(session: &SessionContext) -> &'static str {
        match SessionAuthSignal::new(session).auth_state() {
            AuthState::Authenticated => "authenticated",
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::Pending => "pending",
        }
    }

    #[actix_web::test]
    async fn round_trips_user_id() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        let id = UserId::new(FIXTURE_ID).expect("fixture id");
                        session.persist_user(&id)?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let id = session.require_user_id()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(id.to_string()))
                    }),
                ),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        assert_eq!(test::read_body(get_res).await, FIXTURE_ID);
    }

    #[actix_web::test]
    async fn missing_user_is_unauthorised() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/require",
            web::get().to(|session: SessionContext| async move {
                session.require_user_id()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn signal_tracks_session_contents() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/tamper",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .map_err(actix_web::error::ErrorInternalServerError)?;
                        Ok::<_, actix_web::Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/corrupt",
                    web::get().to(|session: Session| async move {
                        // A non-string value cannot be read back as a user id.
                        session
                            .insert(USER_ID_KEY, 7_u32)
                            .map_err(actix_web::error::ErrorInternalServerError)?;
                        Ok::<_, actix_web::Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/state",
                    web::get().to(|session: SessionContext| async move {
                        HttpResponse::Ok().body(auth_state_label(&session))
                    }),
                ),
        )
        .await;

        let anonymous =
            test::call_service(&app, test::TestRequest::get().uri("/state").to_request()).await;
        assert_eq!(test::read_body(anonymous).await, "unauthenticated");

        let tampered =
            test::call_service(&app, test::TestRequest::get().uri("/tamper").to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/state")
                .cookie(session_cookie(&tampered))
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "unauthenticated");

        let corrupt =
            test::call_service(&app, test::TestRequest::get().uri("/corrupt").to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/state")
                .cookie(session_cookie(&corrupt))
                .to_request(),
        )
        .await;
        assert_eq!(test::read_body(res).await, "pending");
    }
}
