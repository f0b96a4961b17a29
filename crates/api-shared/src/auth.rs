//! HTTP Basic authentication against a single configured user.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("Authorization header is not HTTP Basic")]
    UnsupportedScheme,
    #[error("malformed Basic credentials")]
    Malformed,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("both TRENDS_API_USER and TRENDS_API_PASSWORD must be set, or neither")]
    IncompleteConfig,
}

/// The one user allowed to call the data API.
#[derive(Clone)]
pub struct Credentials {
    user: String,
    password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Build credentials from raw environment values.
    ///
    /// Returns `Ok(None)` when neither value is set, which disables authentication.
    pub fn from_env_values(
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Option<Self>, AuthError> {
        let user = user.filter(|v| !v.trim().is_empty());
        let password = password.filter(|v| !v.is_empty());

        match (user, password) {
            (Some(user), Some(password)) => Ok(Some(Self::new(user.trim(), password))),
            (None, None) => Ok(None),
            _ => Err(AuthError::IncompleteConfig),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

/// Validates an `Authorization` header value against `expected`.
///
/// Returns `Ok(())` if the header carries the expected user and password.
pub fn validate_basic_auth(header: Option<&str>, expected: &Credentials) -> Result<(), AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let (scheme, encoded) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::UnsupportedScheme)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::UnsupportedScheme);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::Malformed)?;
    let (user, password) = decoded.split_once(':').ok_or(AuthError::Malformed)?;

    if user == expected.user && password == expected.password {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(user_pass))
    }

    #[test]
    fn test_accepts_matching_credentials() {
        let creds = Credentials::new("curator", "s3cret:with:colons");
        let header = basic("curator:s3cret:with:colons");

        assert_eq!(validate_basic_auth(Some(&header), &creds), Ok(()));
    }

    #[test]
    fn test_rejects_bad_headers() {
        let creds = Credentials::new("curator", "s3cret");

        assert_eq!(
            validate_basic_auth(None, &creds),
            Err(AuthError::MissingHeader)
        );
        assert_eq!(
            validate_basic_auth(Some("Bearer abc"), &creds),
            Err(AuthError::UnsupportedScheme)
        );
        assert_eq!(
            validate_basic_auth(Some("Basic !!!"), &creds),
            Err(AuthError::Malformed)
        );
        assert_eq!(
            validate_basic_auth(Some(&basic("curator:wrong")), &creds),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_from_env_values() {
        assert!(Credentials::from_env_values(None, None).unwrap().is_none());
        assert!(
            Credentials::from_env_values(Some("  ".into()), None)
                .unwrap()
                .is_none()
        );

        let creds = Credentials::from_env_values(Some("curator".into()), Some("pw".into()))
            .unwrap()
            .unwrap();
        assert_eq!(creds.user(), "curator");
        assert!(!format!("{creds:?}").contains("pw"));

        assert_eq!(
            Credentials::from_env_values(Some("curator".into()), None).unwrap_err(),
            AuthError::IncompleteConfig
        );
    }
}
