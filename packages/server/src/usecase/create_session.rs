//! UseCase: create a guest user with a fresh session.

use std::sync::Arc;

use crate::{
    domain::{SessionStore, StoreError, User},
    infrastructure::SessionCache,
};

use super::error::CreateSessionError;

/// セッション作成のユースケース
pub struct CreateSessionUseCase {
    session_store: Arc<dyn SessionStore>,
    session_cache: Arc<SessionCache>,
}

impl CreateSessionUseCase {
    pub fn new(session_store: Arc<dyn SessionStore>, session_cache: Arc<SessionCache>) -> Self {
        Self {
            session_store,
            session_cache,
        }
    }

    /// Create a user named `name` and pre-populate the session cache, so the
    /// first authenticated request skips the store round trip.
    pub async fn execute(&self, name: &str) -> Result<User, CreateSessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CreateSessionError::EmptyName);
        }

        let user = self
            .session_store
            .create_session(name)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => CreateSessionError::NameTaken(name.to_string()),
                other => CreateSessionError::Store(other),
            })?;

        self.session_cache
            .set(user.session_token.clone(), user.clone())
            .await;
        tracing::info!("Created session for user '{}' (id {})", user.name, user.id);

        Ok(user)
    }
}
