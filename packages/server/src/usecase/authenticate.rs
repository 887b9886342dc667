//! UseCase: resolve the caller's session.

use std::sync::Arc;

use crate::{
    domain::{SessionLookupError, SessionToken, User},
    infrastructure::SessionCache,
};

/// 認証のユースケース
pub struct AuthenticateUseCase {
    session_cache: Arc<SessionCache>,
}

impl AuthenticateUseCase {
    pub fn new(session_cache: Arc<SessionCache>) -> Self {
        Self { session_cache }
    }

    /// Resolve `session_token` to a user through the session cache.
    ///
    /// `SessionLookupError::NotFound` means the caller is not logged in;
    /// `SessionLookupError::Store` means the lookup could not be performed.
    pub async fn execute(&self, session_token: &SessionToken) -> Result<User, SessionLookupError> {
        self.session_cache.get(session_token).await
    }
}
