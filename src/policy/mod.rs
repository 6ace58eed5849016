//! Authorization decisions
//!
//! The ownership guard compares the authenticated identity against the
//! owner asserted in the request path. It is applied selectively: only the
//! two order-scan routes are guarded, mirroring the rest of the API where
//! reads and mutations are deliberately open.

use crate::error::{AppError, Result};

/// Allow only the named owner through.
///
/// Strict string equality between the session identity's email and the
/// path-supplied owner; anything else is a 403.
pub fn require_owner(identity_email: &str, claimed_owner: &str) -> Result<()> {
    if identity_email != claimed_owner {
        return Err(AppError::Forbidden(format!(
            "session {identity_email} is not {claimed_owner}"
        )));
    }
    Ok(())
}
