//! Domain ports.
//!
//! Inbound adapters hand these traits to domain logic explicitly instead of
//! letting the domain reach for ambient framework state. Fixture
//! implementations keep handlers testable without a credential store.

use super::{AuthState, Error, LoginCredentials, UserId};

/// Synchronous, render-safe answer to "is the current user authenticated?".
///
/// Implementations must not block; staleness and refresh are the provider's
/// concern. A provider that cannot decide reports [`AuthState::Pending`]
/// rather than guessing.
///
/// # Examples
/// ```
/// use prunk::domain::AuthState;
/// use prunk::domain::ports::AuthSignal;
///
/// assert_eq!(true.auth_state(), AuthState::Authenticated);
/// assert_eq!(false.auth_state(), AuthState::Unauthenticated);
/// ```
pub trait AuthSignal {
    /// Current authentication state.
    fn auth_state(&self) -> AuthState;
}

impl AuthSignal for bool {
    fn auth_state(&self) -> AuthState {
        AuthState::from(*self)
    }
}

impl AuthSignal for AuthState {
    fn auth_state(&self) -> AuthState {
        *self
    }
}

impl<T: AuthSignal + ?Sized> AuthSignal for &T {
    fn auth_state(&self) -> AuthState {
        (**self).auth_state()
    }
}

/// Driving port that turns credentials into a user identity.
pub trait Authenticator: Send + Sync {
    /// Verify credentials, returning `401` errors for mismatches.
    fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Fixture authenticator accepting a single hard-coded account.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthenticator;

impl FixtureAuthenticator {
    /// Username accepted by the fixture.
    pub const USERNAME: &'static str = "admin";
    /// Password accepted by the fixture.
    pub const PASSWORD: &'static str = "password";
    /// Identity returned on success.
    pub const USER_ID: &'static str = "123e4567-e89b-12d3-a456-426614174000";
}

impl Authenticator for FixtureAuthenticator {
    fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() == Self::USERNAME && credentials.password() == Self::PASSWORD {
            UserId::new(Self::USER_ID)
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
