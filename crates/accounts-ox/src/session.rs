//! Tab-wide authentication state.
//!
//! [`SessionStore`] is the single writer of the session snapshot. Other components read it
//! through [`SessionStore::snapshot`] or [`SessionStore::subscribe`] and change it only through
//! [`SessionStore::login`], [`SessionStore::logout`] and [`SessionStore::refresh`].

use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    Accounts, AccountsRequestError,
    organization::Organization,
    user::{LoginRequest, SignupRequest, User},
};

/// Coarse state derived from a [`SessionSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionState {
    Loading,
    Authenticated,
    Anonymous,
}

/// Read-only view of the session, replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_user: Option<User>,
    pub current_organization: Option<Organization>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    fn loading() -> Self {
        Self {
            current_user: None,
            current_organization: None,
            is_loading: true,
        }
    }

    fn anonymous() -> Self {
        Self {
            current_user: None,
            current_organization: None,
            is_loading: false,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.is_loading {
            SessionState::Loading
        } else if self.current_user.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }
}

/// Owner of the session snapshot for one console tab.
///
/// Cloning yields another handle to the same store.
#[derive(Clone, Debug)]
pub struct SessionStore {
    api: Accounts,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionStore {
    /// A store in the initial `Loading` state. Call [`SessionStore::refresh`] to settle it.
    pub fn new(api: Accounts) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::loading());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Creates the store and runs the initial validate + fetch sequence.
    pub async fn mount(api: Accounts) -> Self {
        let store = Self::new(api);
        store.refresh().await;
        store
    }

    pub fn api(&self) -> &Accounts {
        &self.api
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().state()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().current_user.clone()
    }

    pub fn current_organization(&self) -> Option<Organization> {
        self.state.borrow().current_organization.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Receiver that observes every snapshot replacement.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Re-derives the session from the server.
    ///
    /// The status probe always completes before the protected init fetch is attempted; an
    /// invalid session or any failure leaves the store anonymous. Never fails and always
    /// clears `is_loading`.
    pub async fn refresh(&self) -> SessionState {
        let next = match self.resolve().await {
            Ok(Some((user, organization))) => SessionSnapshot {
                current_user: Some(user),
                current_organization: organization,
                is_loading: false,
            },
            Ok(None) => SessionSnapshot::anonymous(),
            Err(e) => {
                log::warn!("session refresh failed, treating visitor as anonymous: {e}");
                SessionSnapshot::anonymous()
            }
        };
        let state = next.state();
        self.state.send_replace(next);
        state
    }

    async fn resolve(&self) -> Result<Option<(User, Option<Organization>)>, AccountsRequestError> {
        if !self.api.session_status().await? {
            return Ok(None);
        }

        let init = self.api.init().await?;
        let Some(user) = init.user_information else {
            log::warn!("init returned no user information for a valid session");
            return Ok(None);
        };
        Ok(Some((user, init.default_organizations)))
    }

    /// Records a freshly authenticated user, then pulls the authoritative organization context.
    pub async fn login(&self, user: User) -> SessionState {
        self.state.send_modify(|s| {
            s.current_user = Some(user);
            s.is_loading = false;
        });
        self.refresh().await
    }

    /// Authenticates with credentials and records the returned user.
    pub async fn sign_in(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<User, AccountsRequestError> {
        let request = LoginRequest {
            email: email.into(),
            password: password.into(),
        };
        let user = self.api.login(&request).await?;
        self.login(user.clone()).await;
        Ok(user)
    }

    /// Registers an account; the server starts its session right away.
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<User, AccountsRequestError> {
        let user = self.api.signup(request).await?;
        self.login(user.clone()).await;
        Ok(user)
    }

    /// Ends the session. The local state is cleared even when the server call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            log::warn!("logout failed on server: {e}");
        }
        self.state.send_replace(SessionSnapshot::anonymous());
    }
}
