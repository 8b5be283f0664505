//! Admin authorization guard.
//!
//! A single shared secret, fixed at startup, gates every privileged
//! operation. The guard fails closed: it cannot be built without a token.

use std::{fmt, sync::Arc};

use subtle::ConstantTimeEq;
use tracing::warn;
use wyr_common::{AppError, AppResult, Config};

/// Checks caller-supplied tokens against the configured admin token.
#[derive(Clone)]
pub struct AdminGuard {
    token: Arc<[u8]>,
}

impl AdminGuard {
    /// Create a guard for `token`. A blank token is a configuration error.
    pub fn new(token: &str) -> AppResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Config("admin token must not be empty".to_string()));
        }
        Ok(Self {
            token: Arc::from(token.as_bytes()),
        })
    }

    /// Create a guard from validated configuration.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(config.admin_token()?)
    }

    /// Decide whether a request carrying `supplied` may proceed.
    ///
    /// Absent or empty → [`AppError::Unauthorized`]; present but different →
    /// [`AppError::Forbidden`].
    pub fn authorize(&self, supplied: Option<&[u8]>) -> AppResult<()> {
        let Some(supplied) = supplied.filter(|s| !s.is_empty()) else {
            return Err(AppError::Unauthorized);
        };

        if bool::from(self.token.as_ref().ct_eq(supplied)) {
            Ok(())
        } else {
            warn!("Rejected admin request with invalid token");
            Err(AppError::Forbidden)
        }
    }
}

impl fmt::Debug for AdminGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGuard").finish_non_exhaustive()
    }
}
