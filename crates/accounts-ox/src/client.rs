use std::sync::Arc;

use accounts_ox_common::{Endpoint, HttpMethod, LogNotifier, Notifier};
use bon::Builder;
use core::fmt;

use crate::{
    AccountsRequestError,
    internal::AccountsRequestHelper,
    invitation::{ClaimAccountRequest, InvitationDetails, InvitationToken},
    organization::InitData,
    security::UserSession,
    user::{LoginRequest, ResetPasswordRequest, SignupRequest, User, UserStatus},
};

const BASE_URL: &str = "http://localhost:8080/api";
const BASE_URL_ENV: &str = "ACCOUNTS_API_BASE_URL";

const SESSION_STATUS_URL: &str = "auth/ustatus";
const INIT_URL: &str = "auth/init";
const LOGIN_URL: &str = "auth/login";
const LOGOUT_URL: &str = "auth/logout";
const SIGNUP_URL: &str = "auth/signup";
const CHECK_STATUS_URL: &str = "auth/check-status";
const FORGOT_PASSWORD_URL: &str = "auth/forgot-password";
const RESET_PASSWORD_URL: &str = "auth/reset-password";
const INVITATION_DETAILS_URL: &str = "orgs/invitation-details";
const ACCEPT_INVITE_URL: &str = "orgs/accept-invite";
const CLAIM_ACCOUNT_URL: &str = "orgs/claim-account";
const USER_SESSIONS_URL: &str = "user/sessions";

/// A `reqwest::Client` that keeps the server session cookie between calls.
///
/// Falls back to a plain client when the TLS backend cannot be initialized; that client
/// carries no session, so every protected call fails until a working client is supplied.
fn cookie_client() -> reqwest::Client {
    match reqwest::Client::builder().cookie_store(true).build() {
        Ok(client) => client,
        Err(e) => {
            log::warn!("building cookie-aware HTTP client failed, sessions will not persist: {e}");
            reqwest::Client::default()
        }
    }
}

fn log_notifier() -> Arc<dyn Notifier> {
    Arc::new(LogNotifier)
}

/// Client for the accounts API.
///
/// Authentication is carried exclusively by the server-set session cookie; the client never
/// reads or stores it. Cloning is cheap and clones share the cookie jar.
#[derive(Clone, Builder)]
pub struct Accounts {
    #[builder(default = cookie_client())]
    pub(crate) client: reqwest::Client,
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    #[builder(default = log_notifier())]
    pub(crate) notifier: Arc<dyn Notifier>,
}

impl Default for Accounts {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Accounts {
    /// Create a new client against the given API base path (e.g. `https://host/api`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::builder().base_url(base_url).build()
    }

    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let base_url = std::env::var(BASE_URL_ENV)?;
        Ok(Self::builder().base_url(base_url).build())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The sink used for user-facing notifications.
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    fn request_helper(&self) -> AccountsRequestHelper {
        AccountsRequestHelper::new(self.client.clone(), &self.base_url, self.notifier.clone())
    }
}

impl Accounts {
    /// Lightweight probe: does the current cookie denote a valid session?
    pub async fn session_status(&self) -> Result<bool, AccountsRequestError> {
        let endpoint = Endpoint::new(SESSION_STATUS_URL, HttpMethod::Get);
        let res = self.request_helper().get::<bool>(endpoint).await?;
        Ok(res.into_result()?.data.unwrap_or(false))
    }

    /// Profile plus default and other organizations of the session user.
    pub async fn init(&self) -> Result<InitData, AccountsRequestError> {
        let endpoint = Endpoint::new(INIT_URL, HttpMethod::Get);
        self.request_helper().get(endpoint).await?.into_data()
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<User, AccountsRequestError> {
        let endpoint = Endpoint::new(LOGIN_URL, HttpMethod::Post);
        self.request_helper()
            .send(endpoint, Some(request))
            .await?
            .into_data()
    }

    pub async fn logout(&self) -> Result<(), AccountsRequestError> {
        let endpoint = Endpoint::new(LOGOUT_URL, HttpMethod::Post);
        self.request_helper()
            .send_unit::<()>(endpoint, None)
            .await
            .map(|_| ())
    }

    /// Registers a new account; the server starts a session for it.
    pub async fn signup(&self, request: &SignupRequest) -> Result<User, AccountsRequestError> {
        let endpoint = Endpoint::new(SIGNUP_URL, HttpMethod::Post);
        self.request_helper()
            .send(endpoint, Some(request))
            .await?
            .into_data()
    }

    pub async fn check_status(&self, email: &str) -> Result<UserStatus, AccountsRequestError> {
        let endpoint = Endpoint::new(CHECK_STATUS_URL, HttpMethod::Get).with_query("email", email);
        self.request_helper().get(endpoint).await?.into_data()
    }

    /// Returns the server's confirmation message, which does not reveal whether the account exists.
    pub async fn forgot_password(
        &self,
        email: &str,
    ) -> Result<Option<String>, AccountsRequestError> {
        let endpoint = Endpoint::new(FORGOT_PASSWORD_URL, HttpMethod::Post);
        let body = serde_json::json!({ "email": email });
        self.request_helper().send_unit(endpoint, Some(&body)).await
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<Option<String>, AccountsRequestError> {
        let endpoint = Endpoint::new(RESET_PASSWORD_URL, HttpMethod::Post);
        self.request_helper().send_unit(endpoint, Some(request)).await
    }

    /// Resolves an invitation token. May establish a session cookie as a side effect.
    pub async fn invitation_details(
        &self,
        token: &InvitationToken,
    ) -> Result<InvitationDetails, AccountsRequestError> {
        let endpoint = Endpoint::new(INVITATION_DETAILS_URL, HttpMethod::Get)
            .with_query("token", token.as_str());
        self.request_helper().get(endpoint).await?.into_data()
    }

    pub async fn accept_invite(&self, token: &InvitationToken) -> Result<(), AccountsRequestError> {
        let endpoint =
            Endpoint::new(ACCEPT_INVITE_URL, HttpMethod::Post).with_query("token", token.as_str());
        self.request_helper()
            .send_unit::<()>(endpoint, None)
            .await
            .map(|_| ())
    }

    /// Sets a password on a shadow account created by an invitation and joins the organization.
    pub async fn claim_account(
        &self,
        request: &ClaimAccountRequest,
    ) -> Result<(), AccountsRequestError> {
        let endpoint = Endpoint::new(CLAIM_ACCOUNT_URL, HttpMethod::Post);
        self.request_helper()
            .send_unit(endpoint, Some(request))
            .await
            .map(|_| ())
    }

    pub async fn list_sessions(&self) -> Result<Vec<UserSession>, AccountsRequestError> {
        let endpoint = Endpoint::new(USER_SESSIONS_URL, HttpMethod::Get);
        let res = self.request_helper().get::<Vec<UserSession>>(endpoint).await?;
        Ok(res.into_result()?.data.unwrap_or_default())
    }

    pub async fn revoke_session(&self, session_id: i64) -> Result<(), AccountsRequestError> {
        let endpoint = Endpoint::new(USER_SESSIONS_URL, HttpMethod::Delete)
            .with_query("session_id", session_id.to_string());
        self.request_helper()
            .send_unit::<()>(endpoint, None)
            .await
            .map(|_| ())
    }
}

impl fmt::Debug for Accounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accounts")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
