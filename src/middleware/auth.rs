//! Session verification middleware
//!
//! Provides the `SessionUser` extractor for handlers requiring an
//! authenticated caller. The credential travels in an http-only cookie
//! rather than an Authorization header; the extractor recovers it from the
//! request, verifies signature and expiry, and hands the embedded identity
//! to the handler.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::jwt::SessionClaims;
use crate::state::HasSessions;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "token";

/// Authenticated caller extracted from the session cookie
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub claims: SessionClaims,
}

impl SessionUser {
    /// Email of the authenticated identity
    pub fn email(&self) -> &str {
        &self.claims.identity.email
    }
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: HasSessions,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| AppError::Unauthenticated("no session cookie".to_string()))?;

        let claims = state.jwt_manager().verify_session(&token)?;

        Ok(SessionUser { claims })
    }
}
