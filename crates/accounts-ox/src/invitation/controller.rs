use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use accounts_ox_common::Notifier;
use url::Url;

use super::{
    details::{InvitationDetails, InvitationToken},
    form::ClaimForm,
};
use crate::{
    AccountsRequestError,
    navigation::{ConsoleRoutes, Navigator, login_redirect_url},
    session::{SessionState, SessionStore},
};

pub const MISSING_TOKEN_MESSAGE: &str = "Invalid invitation link. Token is missing.";
pub const FETCH_FAILED_MESSAGE: &str = "Invalid or expired invitation link.";
pub const CLAIM_FAILED_MESSAGE: &str = "Failed to activate account.";
pub const JOIN_FAILED_MESSAGE: &str = "Failed to join organization.";
pub const JOINED_MESSAGE: &str = "Joined successfully!";
pub const CLAIMED_MESSAGE: &str = "Account activated! Welcome aboard.";

/// Server messages meaning the token was already consumed, possibly by this very visitor.
const CONSUMED_TOKEN_MARKERS: [&str; 2] = ["Invalid invitation token", "already accepted"];

/// Whether an accept failure actually means the visitor is already a member.
///
/// The backend exposes no dedicated code for this, so the check matches message text.
pub fn is_already_joined(err: &AccountsRequestError) -> bool {
    err.message()
        .is_some_and(|m| CONSUMED_TOKEN_MARKERS.iter().any(|marker| m.contains(marker)))
}

/// Where the invitation page currently stands.
#[derive(Debug, Clone, PartialEq, Eq, strum::IntoStaticStr)]
pub enum InvitationState {
    Start,
    FetchingDetails,
    /// Details loaded. `error` carries the last claim/accept failure to show inline.
    Ready {
        details: InvitationDetails,
        error: Option<String>,
    },
    /// Claim form submitted, waiting for the server.
    Submitting { details: InvitationDetails },
    /// Existing account, anonymous visitor: only a login link is offered.
    PromptLogin {
        details: InvitationDetails,
        login_url: String,
    },
    /// Accept call in flight.
    Accepting { details: InvitationDetails },
    Joined { destination: String },
    Error { message: String },
}

impl InvitationState {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn details(&self) -> Option<&InvitationDetails> {
        match self {
            Self::Ready { details, .. }
            | Self::Submitting { details }
            | Self::PromptLogin { details, .. }
            | Self::Accepting { details } => Some(details),
            _ => None,
        }
    }

    /// Inline error text to render, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Ready { error, .. } => error.as_deref(),
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            Self::FetchingDetails | Self::Submitting { .. } | Self::Accepting { .. }
        )
    }
}

#[derive(Debug)]
struct Inner {
    state: InvitationState,
    /// Automatic accept already issued for this details fetch.
    auto_accept_fired: bool,
    /// An accept call is in flight or has succeeded.
    accept_latched: bool,
}

impl Inner {
    fn transition(&mut self, next: InvitationState) {
        log::debug!("invitation: {} -> {}", self.state.name(), next.name());
        self.state = next;
    }
}

/// Drives one invitation page: resolves the token, then claims, prompts for login, or joins.
///
/// One controller per page instance. Every method may be called repeatedly and from
/// concurrent tasks; each returns the state it left the page in.
pub struct InvitationController {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
    routes: ConsoleRoutes,
    location: Url,
    token: Option<InvitationToken>,
    inner: Mutex<Inner>,
}

impl InvitationController {
    /// `location` is the full URL of the invitation page, including its `token` parameter.
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>, location: Url) -> Self {
        Self {
            session,
            navigator,
            routes: ConsoleRoutes::default(),
            token: InvitationToken::from_url(&location),
            location,
            inner: Mutex::new(Inner {
                state: InvitationState::Start,
                auto_accept_fired: false,
                accept_latched: false,
            }),
        }
    }

    #[must_use]
    pub fn with_routes(mut self, routes: ConsoleRoutes) -> Self {
        self.routes = routes;
        self
    }

    pub fn token(&self) -> Option<&InvitationToken> {
        self.token.as_ref()
    }

    pub fn state(&self) -> InvitationState {
        self.lock().state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify_failure(&self, err: &AccountsRequestError, message: &str) {
        if !err.is_notified() {
            self.session.api().notifier().error(message);
        }
    }

    /// Resolves the token into invitation details. Runs once; later calls return the state.
    pub async fn load(&self) -> InvitationState {
        let token = {
            let mut inner = self.lock();
            if inner.state != InvitationState::Start {
                return inner.state.clone();
            }
            let Some(token) = self.token.clone() else {
                inner.transition(InvitationState::Error {
                    message: MISSING_TOKEN_MESSAGE.to_string(),
                });
                return inner.state.clone();
            };
            inner.transition(InvitationState::FetchingDetails);
            token
        };

        match self.session.api().invitation_details(&token).await {
            Ok(details) => {
                // Validating some links sets a session cookie. The page stays in
                // `FetchingDetails` until the session is re-derived, so no evaluation sees the
                // pre-link session.
                self.session.refresh().await;
                self.lock().transition(InvitationState::Ready {
                    details,
                    error: None,
                });
                self.evaluate().await
            }
            Err(e) => {
                log::warn!("fetching invitation details failed: {e}");
                let message = e.message().unwrap_or(FETCH_FAILED_MESSAGE).to_string();
                let mut inner = self.lock();
                inner.transition(InvitationState::Error { message });
                inner.state.clone()
            }
        }
    }

    /// Recomputes what the page should do for the current session.
    ///
    /// Safe to call whenever the session or details change. Until the details and the
    /// session that follows their fetch have settled, this returns the state unchanged. The
    /// automatic accept is issued at most once per successful details fetch.
    pub async fn evaluate(&self) -> InvitationState {
        let details = {
            let mut inner = self.lock();
            let details = match &inner.state {
                InvitationState::Ready { details, .. } if !details.is_new_user => details.clone(),
                _ => return inner.state.clone(),
            };
            match self.session.state() {
                SessionState::Loading => return inner.state.clone(),
                SessionState::Anonymous => {
                    let login_url = login_redirect_url(&self.routes, &self.location);
                    inner.transition(InvitationState::PromptLogin { details, login_url });
                    return inner.state.clone();
                }
                SessionState::Authenticated => {}
            }
            if inner.auto_accept_fired || inner.accept_latched {
                return inner.state.clone();
            }
            inner.auto_accept_fired = true;
            inner.accept_latched = true;
            inner.transition(InvitationState::Accepting {
                details: details.clone(),
            });
            details
        };

        self.run_accept(details).await
    }

    /// Explicit accept, offered after a failed attempt. Ignored while another accept is in
    /// flight or when the visitor is not signed in.
    pub async fn accept(&self) -> InvitationState {
        let details = {
            let mut inner = self.lock();
            let details = match &inner.state {
                InvitationState::Ready { details, .. } if !details.is_new_user => details.clone(),
                _ => return inner.state.clone(),
            };
            if inner.accept_latched || !self.session.snapshot().is_authenticated() {
                return inner.state.clone();
            }
            inner.accept_latched = true;
            inner.transition(InvitationState::Accepting {
                details: details.clone(),
            });
            details
        };

        self.run_accept(details).await
    }

    async fn run_accept(&self, details: InvitationDetails) -> InvitationState {
        let Some(token) = self.token.clone() else {
            return self.state();
        };

        match self.session.api().accept_invite(&token).await {
            Ok(()) => self.join(Some(JOINED_MESSAGE)).await,
            Err(e) if is_already_joined(&e) => {
                log::info!("invitation token already consumed, treating as joined: {e}");
                self.join(None).await
            }
            Err(e) => {
                log::warn!("accepting invitation failed: {e}");
                let message = e.message().unwrap_or(JOIN_FAILED_MESSAGE).to_string();
                self.notify_failure(&e, &message);
                let mut inner = self.lock();
                inner.accept_latched = false;
                inner.transition(InvitationState::Ready {
                    details,
                    error: Some(message),
                });
                inner.state.clone()
            }
        }
    }

    /// The claim form for a brand-new invitee, pre-filled from the invitation.
    pub fn claim_form(&self) -> Option<ClaimForm> {
        match &self.lock().state {
            InvitationState::Ready { details, .. } if details.is_new_user => {
                Some(ClaimForm::prefilled(details))
            }
            _ => None,
        }
    }

    /// Activates the invited shadow account and joins the organization.
    ///
    /// Invalid input is rejected before any network call; on failure the form may be
    /// resubmitted.
    pub async fn submit_claim(&self, form: ClaimForm) -> InvitationState {
        let (details, token) = {
            let mut inner = self.lock();
            let details = match &inner.state {
                InvitationState::Ready { details, .. } if details.is_new_user => details.clone(),
                _ => return inner.state.clone(),
            };
            let Some(token) = self.token.clone() else {
                return inner.state.clone();
            };
            if let Err(e) = form.validate() {
                inner.transition(InvitationState::Ready {
                    details,
                    error: Some(e.to_string()),
                });
                return inner.state.clone();
            }
            inner.transition(InvitationState::Submitting {
                details: details.clone(),
            });
            (details, token)
        };

        let request = form.into_request(token);
        match self.session.api().claim_account(&request).await {
            Ok(()) => self.join(Some(CLAIMED_MESSAGE)).await,
            Err(e) => {
                log::warn!("claiming invited account failed: {e}");
                let message = e.message().unwrap_or(CLAIM_FAILED_MESSAGE).to_string();
                self.notify_failure(&e, &message);
                let mut inner = self.lock();
                inner.transition(InvitationState::Ready {
                    details,
                    error: Some(message),
                });
                inner.state.clone()
            }
        }
    }

    /// Joined paths land on the organization page: a new member's first task is the
    /// organization context.
    async fn join(&self, success_message: Option<&str>) -> InvitationState {
        if let Some(message) = success_message {
            self.session.api().notifier().success(message);
        }
        self.session.refresh().await;

        let destination = self.routes.organization.clone();
        {
            let mut inner = self.lock();
            inner.transition(InvitationState::Joined {
                destination: destination.clone(),
            });
        }
        self.navigator.navigate(&destination);
        InvitationState::Joined { destination }
    }

    /// Follows the login call-to-action; returns false when no login prompt is shown.
    pub fn go_to_login(&self) -> bool {
        let login_url = match &self.lock().state {
            InvitationState::PromptLogin { login_url, .. } => login_url.clone(),
            _ => return false,
        };
        self.navigator.navigate(&login_url);
        true
    }

    /// Leaves an errored invitation page for the console home.
    pub fn go_home(&self) {
        self.navigator.navigate(&self.routes.home);
    }
}
