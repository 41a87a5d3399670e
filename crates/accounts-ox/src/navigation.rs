//! Routing capability and session-based route gating.

use url::{Url, form_urlencoded};

use crate::session::{SessionSnapshot, SessionState};

/// Fire-and-forget navigation to an in-app path.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// In-app paths the session and invitation flows route to.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ConsoleRoutes {
    #[builder(default = "/".to_string(), into)]
    pub home: String,
    #[builder(default = "/login".to_string(), into)]
    pub login: String,
    #[builder(default = "/settings/profile".to_string(), into)]
    pub profile: String,
    #[builder(default = "/settings/organization".to_string(), into)]
    pub organization: String,
}

impl Default for ConsoleRoutes {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// What a protected screen should do for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Initial session check still running.
    Loading,
    RedirectToLogin,
    Allow,
}

impl Gate {
    pub fn for_session(snapshot: &SessionSnapshot) -> Self {
        match snapshot.state() {
            SessionState::Loading => Self::Loading,
            SessionState::Anonymous => Self::RedirectToLogin,
            SessionState::Authenticated => Self::Allow,
        }
    }
}

/// Login URL that returns to `location` (path and query) once the visitor has signed in.
pub fn login_redirect_url(routes: &ConsoleRoutes, location: &Url) -> String {
    let mut target = location.path().to_string();
    if let Some(query) = location.query() {
        target.push('?');
        target.push_str(query);
    }
    let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("{}?redirect={encoded}", routes.login)
}

/// Where to go after login, read from the `redirect` query parameter of the login page.
///
/// Only same-origin absolute paths are honoured; anything else lands on the home route.
pub fn redirect_target(routes: &ConsoleRoutes, login_location: &Url) -> String {
    login_location
        .query_pairs()
        .find(|(key, _)| key == "redirect")
        .map(|(_, value)| value.into_owned())
        .filter(|path| is_local_path(path))
        .unwrap_or_else(|| routes.home.clone())
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn login_url_carries_path_and_query() {
        let routes = ConsoleRoutes::default();
        let location = url("https://console.test/invitations?token=abc&x=1");
        assert_eq!(
            login_redirect_url(&routes, &location),
            "/login?redirect=%2Finvitations%3Ftoken%3Dabc%26x%3D1"
        );
    }

    #[test]
    fn redirect_round_trips_through_login_page() {
        let routes = ConsoleRoutes::default();
        let location = url("https://console.test/invitations?token=abc");
        let login = url(&format!("https://console.test{}", login_redirect_url(&routes, &location)));
        assert_eq!(redirect_target(&routes, &login), "/invitations?token=abc");
    }

    #[test]
    fn foreign_redirects_fall_back_home() {
        let routes = ConsoleRoutes::default();
        for bad in [
            "https://console.test/login?redirect=https%3A%2F%2Fevil.test",
            "https://console.test/login?redirect=%2F%2Fevil.test",
            "https://console.test/login?redirect=%2F%5Cevil.test",
            "https://console.test/login",
        ] {
            assert_eq!(redirect_target(&routes, &url(bad)), "/");
        }
    }

    #[test]
    fn gate_follows_session_state() {
        let mut snapshot = SessionSnapshot {
            current_user: None,
            current_organization: None,
            is_loading: true,
        };
        assert_eq!(Gate::for_session(&snapshot), Gate::Loading);
        snapshot.is_loading = false;
        assert_eq!(Gate::for_session(&snapshot), Gate::RedirectToLogin);
        let user: User =
            serde_json::from_value(serde_json::json!({"id": 1, "email": "a@x.com"})).unwrap();
        snapshot.current_user = Some(user);
        assert_eq!(Gate::for_session(&snapshot), Gate::Allow);
    }

    #[test]
    fn routes_builder_overrides() {
        let routes = ConsoleRoutes::builder().login("/signin").build();
        assert_eq!(routes.login, "/signin");
        assert_eq!(routes.organization, "/settings/organization");
    }
}
