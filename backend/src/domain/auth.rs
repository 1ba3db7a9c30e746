//! Login credentials accepted by the authenticator.
//!
//! Handlers parse raw payload strings through [`LoginCredentials::try_from_parts`]
//! so the authenticator only ever sees validated values.

use std::fmt;

use zeroize::Zeroizing;

/// Reasons a login payload is rejected before authentication runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was empty.
    EmptyPassword,
}

impl LoginValidationError {
    /// Name of the offending payload field.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} must not be empty", self.field())
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated username and password.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and kept verbatim, including whitespace. It is
///   zeroed on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use prunk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "s3cret").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert!(!format!("{creds:?}").contains("s3cret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as supplied.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
