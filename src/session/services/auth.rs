//! Login, logout, and session restore.

use crate::{
    api::ApiError,
    session::{
        SessionHandle,
        domain::{Credentials, Registration, Session, UserProfile},
        ports::{AuthApi, SessionStore, SessionStoreError},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Service-level errors for authentication operations.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The session could not be persisted or read.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotSignedIn,
}

/// Result type for authentication service operations.
pub type AuthServiceResult<T> = Result<T, AuthServiceError>;

/// Authentication orchestration service.
///
/// Keeps three things in step: the backend, the persisted session, and the
/// in-process [`SessionHandle`] that the API client reads its token from.
#[derive(Clone)]
pub struct AuthService<A, S>
where
    A: AuthApi,
    S: SessionStore,
{
    api: Arc<A>,
    store: Arc<S>,
    session: SessionHandle,
}

impl<A, S> AuthService<A, S>
where
    A: AuthApi,
    S: SessionStore,
{
    /// Creates a new authentication service.
    #[must_use]
    pub const fn new(api: Arc<A>, store: Arc<S>, session: SessionHandle) -> Self {
        Self {
            api,
            store,
            session,
        }
    }

    /// Returns the session handle this service maintains.
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Loads the persisted session into the handle.
    ///
    /// Returns the restored user, or `None` when nothing was stored. A stored
    /// session that cannot be read is discarded and the user stays signed
    /// out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Store`] when an unreadable session cannot
    /// be removed either.
    pub async fn restore(&self) -> AuthServiceResult<Option<UserProfile>> {
        let loaded = match self.store.load().await {
            Ok(loaded) => loaded,
            Err(err) => {
                warn!(error = %err, "discarding unreadable stored session");
                self.session.clear();
                self.store.clear().await?;
                return Ok(None);
            }
        };
        let Some(session) = loaded else {
            return Ok(None);
        };
        let user = session.user().clone();
        self.session.set(session);
        Ok(Some(user))
    }

    /// Logs in and persists the resulting session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Api`] when the backend refuses the
    /// credentials, or [`AuthServiceError::Store`] when persisting fails.
    pub async fn login(&self, credentials: &Credentials) -> AuthServiceResult<UserProfile> {
        let grant = self.api.login(credentials).await?;
        self.establish(Session::from(grant)).await
    }

    /// Registers an account and signs it in.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    pub async fn register(&self, registration: &Registration) -> AuthServiceResult<UserProfile> {
        let grant = self.api.register(registration).await?;
        self.establish(Session::from(grant)).await
    }

    /// Logs out.
    ///
    /// A failing backend call is logged and otherwise ignored: the local
    /// session is always cleared.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::Store`] when the persisted session cannot
    /// be removed.
    pub async fn logout(&self) -> AuthServiceResult<()> {
        if self.session.is_authenticated() {
            if let Err(err) = self.api.logout().await {
                warn!(error = %err, "backend logout failed, clearing local session anyway");
            }
        }
        self.session.clear();
        self.store.clear().await?;
        info!("signed out");
        Ok(())
    }

    /// Fetches the profile from the backend and stores it with the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotSignedIn`] without a session,
    /// [`AuthServiceError::Api`] when the backend call fails, or
    /// [`AuthServiceError::Store`] when persisting fails.
    pub async fn refresh_profile(&self) -> AuthServiceResult<UserProfile> {
        let current = self.session.current().ok_or(AuthServiceError::NotSignedIn)?;
        let user = self.api.profile().await?;
        let updated = current.with_user(user.clone());
        self.store.save(&updated).await?;
        self.session.set(updated);
        Ok(user)
    }

    /// Returns the signed-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.user()
    }

    /// Returns `true` when a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    async fn establish(&self, session: Session) -> AuthServiceResult<UserProfile> {
        self.store.save(&session).await?;
        let user = session.user().clone();
        self.session.set(session);
        info!(email = %user.email, role = user.role.as_str(), "signed in");
        Ok(user)
    }
}
