//! Session endpoints: credential issuance and revocation

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::StatusResponse;
use crate::domain::Identity;
use crate::error::Result;
use crate::middleware::auth::SESSION_COOKIE;
use crate::state::HasSessions;

/// POST /jwt
///
/// Mints a session token for the asserted identity and attaches it as an
/// http-only cookie. The identity is trusted as-is; any extra fields in
/// the body are embedded opaquely in the token.
///
/// Cookie attributes depend on the deployment environment: production
/// serves cross-site from a browser app, so the cookie is Secure with
/// SameSite=None; development stays on localhost and uses SameSite=Strict
/// without Secure.
pub async fn issue_token<S: HasSessions>(
    State(state): State<S>,
    jar: CookieJar,
    Json(identity): Json<Identity>,
) -> Result<(CookieJar, Json<StatusResponse>)> {
    let token = state.jwt_manager().sign_session(&identity)?;

    let production = state.config().environment.is_production();
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(production)
        .same_site(if production {
            SameSite::None
        } else {
            SameSite::Strict
        })
        .build();

    Ok((jar.add(cookie), Json(StatusResponse { status: true })))
}

/// POST /logout
///
/// Clears the browser's copy of the session cookie. The token itself
/// stays valid until expiry; there is no server-side blacklist.
pub async fn logout<S: HasSessions>(
    State(_state): State<S>,
    jar: CookieJar,
) -> (CookieJar, Json<StatusResponse>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), Json(StatusResponse { status: true }))
}
