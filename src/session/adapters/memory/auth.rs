//! In-memory authentication backend.

use crate::{
    api::{ApiError, ApiResult},
    session::{
        SessionHandle,
        domain::{AuthGrant, AuthToken, Credentials, Registration, UserProfile},
        ports::AuthApi,
    },
    task::domain::UserId,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{
        Arc, RwLock,
        atomic::{AtomicBool, Ordering},
    },
};
use uuid::Uuid;

/// Authentication backend emulated in memory.
///
/// Tokens issued at login are resolved through the injected
/// [`SessionHandle`], the same way the HTTP adapter sends the handle's token.
#[derive(Debug, Clone)]
pub struct InMemoryAuthApi {
    session: SessionHandle,
    state: Arc<RwLock<InMemoryAuthState>>,
    fail_logout: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct InMemoryAuthState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    profile: UserProfile,
}

fn poisoned(err: impl ToString) -> ApiError {
    ApiError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryAuthApi {
    /// Creates a backend with no accounts.
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            state: Arc::new(RwLock::new(InMemoryAuthState::default())),
            fail_logout: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Adds an account that can log in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when lock acquisition fails.
    pub fn add_account(&self, profile: UserProfile, password: impl Into<String>) -> ApiResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.accounts.insert(
            profile.email.to_ascii_lowercase(),
            Account {
                password: password.into(),
                profile,
            },
        );
        Ok(())
    }

    /// Makes subsequent logout calls fail, as an unreachable backend would.
    pub fn fail_logout(&self, fail: bool) {
        self.fail_logout.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of tokens currently valid.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when lock acquisition fails.
    pub fn active_tokens(&self) -> ApiResult<usize> {
        Ok(self.state.read().map_err(poisoned)?.tokens.len())
    }

    fn issue(state: &mut InMemoryAuthState, profile: UserProfile) -> ApiResult<AuthGrant> {
        let raw = format!("token-{}", Uuid::new_v4().simple());
        let token = AuthToken::new(raw.clone()).map_err(|err| ApiError::Encode(err.to_string()))?;
        state
            .tokens
            .insert(raw, profile.email.to_ascii_lowercase());
        Ok(AuthGrant {
            user: profile,
            token,
            refresh_token: None,
        })
    }
}

#[async_trait]
impl AuthApi for InMemoryAuthApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthGrant> {
        let mut state = self.state.write().map_err(poisoned)?;
        let profile = state
            .accounts
            .get(credentials.email())
            .filter(|account| account.password == credentials.password())
            .map(|account| account.profile.clone())
            .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_owned()))?;
        Self::issue(&mut state, profile)
    }

    async fn register(&self, registration: &Registration) -> ApiResult<AuthGrant> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.accounts.contains_key(registration.email()) {
            return Err(ApiError::bad_request("User already exists"));
        }
        let id = UserId::new(format!("user-{}", Uuid::new_v4().simple()))
            .map_err(|err| ApiError::Encode(err.to_string()))?;
        let profile = UserProfile::new(
            id,
            registration.name(),
            registration.email(),
            registration.role(),
        );
        state.accounts.insert(
            registration.email().to_owned(),
            Account {
                password: registration.password().to_owned(),
                profile: profile.clone(),
            },
        );
        Self::issue(&mut state, profile)
    }

    async fn logout(&self) -> ApiResult<()> {
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                status: 503,
                message: "Service unavailable".to_owned(),
            });
        }
        let Some(token) = self.session.token() else {
            return Err(ApiError::Unauthorized("No token provided".to_owned()));
        };
        let mut state = self.state.write().map_err(poisoned)?;
        state.tokens.remove(token.expose());
        Ok(())
    }

    async fn profile(&self) -> ApiResult<UserProfile> {
        let token = self
            .session
            .token()
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_owned()))?;
        let state = self.state.read().map_err(poisoned)?;
        state
            .tokens
            .get(token.expose())
            .and_then(|email| state.accounts.get(email))
            .map(|account| account.profile.clone())
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_owned()))
    }
}
