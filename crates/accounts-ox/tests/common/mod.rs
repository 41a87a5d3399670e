#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use accounts_ox::{Accounts, Navigator, Notifier, NotifyKind};
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
pub struct RecordingNotifier(Mutex<Vec<(String, NotifyKind)>>);

impl RecordingNotifier {
    pub fn of_kind(&self, kind: NotifyKind) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, k)| *k == kind)
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, kind: NotifyKind) {
        self.0.lock().unwrap().push((message.to_string(), kind));
    }
}

#[derive(Default)]
pub struct RecordingNavigator(Mutex<Vec<String>>);

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.0.lock().unwrap().push(path.to_string());
    }
}

pub fn accounts(server: &MockServer, notifier: &Arc<RecordingNotifier>) -> Accounts {
    Accounts::builder()
        .base_url(format!("{}/api", server.uri()))
        .notifier(notifier.clone())
        .build()
}

pub fn invitation_url(token: Option<&str>) -> Url {
    let mut url = Url::parse("https://console.test/invitations").unwrap();
    if let Some(token) = token {
        url.query_pairs_mut().append_pair("token", token);
    }
    url
}

pub fn user_json() -> Value {
    json!({
        "id": 7,
        "email": "ada@acme.test",
        "first_name": "Ada",
        "last_name": "Lovelace",
        "status": 1,
        "source": 1
    })
}

pub fn init_json() -> Value {
    json!({
        "success": true,
        "data": {
            "user_information": user_json(),
            "default_organizations": {"id": 3, "org_name": "Acme"},
            "other_organizations": [{"id": 4, "org_name": "Globex"}]
        }
    })
}

pub async fn mount_status(server: &MockServer, valid: bool) {
    Mock::given(method("GET"))
        .and(path("/api/auth/ustatus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": valid})))
        .mount(server)
        .await;
}

pub async fn mount_init(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/auth/init"))
        .respond_with(ResponseTemplate::new(200).set_body_json(init_json()))
        .mount(server)
        .await;
}

/// Valid session with a user and a default organization.
pub async fn mount_authenticated(server: &MockServer) {
    mount_status(server, true).await;
    mount_init(server).await;
}
