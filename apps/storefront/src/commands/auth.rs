//! # Auth Commands
//!
//! Login, registration and logout. The session cookie itself is kept by
//! the HTTP client; [`SessionState`] mirrors who it belongs to.
//!
//! Logging out does not touch the checkout.

use serde::Serialize;
use tracing::{debug, info};

use artbid_client::{AuthSession, StorefrontApi};
use artbid_core::dto::{AuthResponse, Credentials, Registration};
use artbid_core::validation::{validate_address, validate_field, validate_registration};
use artbid_core::FieldErrors;

use crate::error::{ApiError, ErrorCode};
use crate::state::SessionState;

/// Who is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    pub email: Option<String>,
}

impl From<&AuthSession> for SessionInfo {
    fn from(session: &AuthSession) -> Self {
        SessionInfo {
            authenticated: session.is_authenticated(),
            email: session.email().map(str::to_string),
        }
    }
}

/// Logs in with email and password.
///
/// ## Errors
/// - `VALIDATION_ERROR` for a missing or malformed email or password
/// - `UNAUTHORIZED` with "Invalid email or password" unless the backend
///   says something more specific
pub async fn login(
    api: &StorefrontApi,
    session: &SessionState,
    credentials: &Credentials,
) -> Result<SessionInfo, ApiError> {
    debug!(email = %credentials.email, "login command");

    let mut errors = FieldErrors::new();
    for (name, value) in [("email", &credentials.email), ("password", &credentials.password)] {
        if let Some(message) = validate_field(name, value, None) {
            errors.insert(name, message);
        }
    }
    errors.into_result()?;

    let response = match api.login(credentials).await {
        Ok(response) => response,
        Err(e) if matches!(e.status(), Some(401 | 403)) => {
            return Err(ApiError::new(ErrorCode::Unauthorized, e.user_message()));
        }
        Err(e) => return Err(ApiError::from_client(e, "Login failed. Please try again.")),
    };

    adopt(session, &response, &credentials.email, "Invalid email or password")
}

/// Creates an account and logs it in.
///
/// The artist profile is validated for artist accounts, the address for
/// customer accounts that send one.
pub async fn register(
    api: &StorefrontApi,
    session: &SessionState,
    registration: &Registration,
    re_password: &str,
) -> Result<SessionInfo, ApiError> {
    debug!(
        email = %registration.user.email,
        account_type = ?registration.user.account_type,
        "register command"
    );

    let mut errors = validate_registration(
        &registration.user,
        re_password,
        registration.artist.as_ref(),
    );
    if let Some(address) = &registration.address {
        for (field, message) in validate_address(address).iter() {
            errors.insert(field, message);
        }
    }
    errors.into_result()?;

    let response = api
        .register(registration)
        .await
        .map_err(|e| ApiError::from_client(e, "Registration failed. Retry again."))?;

    adopt(
        session,
        &response,
        &registration.user.email,
        "Registration failed. Retry again.",
    )
}

/// Ends the session on the backend, then forgets it locally.
pub async fn logout(api: &StorefrontApi, session: &SessionState) -> Result<SessionInfo, ApiError> {
    debug!("logout command");
    api.logout()
        .await
        .map_err(|e| ApiError::from_client(e, "Logout failed"))?;

    session.with_session_mut(|s| s.logout());
    info!("Logged out");
    Ok(session.with_session(|s| SessionInfo::from(s)))
}

/// Asks the backend whether the session cookie is still valid.
pub async fn check_session(
    api: &StorefrontApi,
    session: &SessionState,
) -> Result<SessionInfo, ApiError> {
    debug!("check_session command");
    let check = api
        .check_session()
        .await
        .map_err(|e| ApiError::from_client(e, "Could not reach the server"))?;

    session.with_session_mut(|s| s.apply_check(&check));
    Ok(session.with_session(|s| SessionInfo::from(s)))
}

/// Applies a login/register answer to the session.
fn adopt(
    session: &SessionState,
    response: &AuthResponse,
    requested_email: &str,
    fallback: &str,
) -> Result<SessionInfo, ApiError> {
    if !response.success {
        let message = response
            .error
            .clone()
            .or_else(|| response.message.clone())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ApiError::new(ErrorCode::Unauthorized, message));
    }

    session.with_session_mut(|s| s.apply_auth(response, requested_email));
    info!(email = ?session.email(), "Logged in");
    Ok(session.with_session(|s| SessionInfo::from(s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adopt_success_and_failure() {
        let session = SessionState::new();

        let err = adopt(
            &session,
            &AuthResponse::default(),
            "ada@example.com",
            "Invalid email or password",
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "Invalid email or password");

        let info = adopt(
            &session,
            &AuthResponse {
                success: true,
                ..AuthResponse::default()
            },
            "ada@example.com",
            "unused",
        )
        .unwrap();
        assert!(info.authenticated);
        assert_eq!(info.email.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_login_validates_before_network() {
        let api = StorefrontApi::new(artbid_client::ClientConfig::with_base_url(
            "http://127.0.0.1:9/api",
        ))
        .unwrap();
        let session = SessionState::new();

        let err = login(
            &api,
            &session,
            &Credentials {
                email: "not-an-email".into(),
                password: "short".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        let fields = err.fields.unwrap();
        assert_eq!(fields.get("email"), Some("Please enter a valid email"));
        assert!(fields.get("password").is_some());
        assert!(!session.with_session(|s| s.is_authenticated()));
    }
}
