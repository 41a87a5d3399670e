use derive_more::{Deref, Display, Into};
use serde::{Deserialize, Serialize};
use url::Url;

/// Opaque single-use invitation token carried by the invitation link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, Into)]
#[serde(transparent)]
pub struct InvitationToken(String);

impl InvitationToken {
    /// Wraps a raw token; blank strings are not tokens.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    /// Reads the `token` query parameter of the invitation page URL.
    pub fn from_url(location: &Url) -> Option<Self> {
        location
            .query_pairs()
            .find(|(key, _)| key == "token")
            .and_then(|(_, value)| Self::new(value.into_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What the invitation link resolves to, fetched once per token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationDetails {
    pub email: String,
    #[serde(rename = "orgName", alias = "org_name", alias = "organization_name")]
    pub organization_name: String,
    #[serde(alias = "first_name", default)]
    pub first_name: Option<String>,
    #[serde(alias = "last_name", default)]
    pub last_name: Option<String>,
    /// No account exists yet for `email`; a password must be set before joining.
    #[serde(rename = "newUser", alias = "new_user", alias = "is_new_user", default)]
    pub is_new_user: bool,
}

/// Body of `POST /orgs/claim-account`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAccountRequest {
    pub token: InvitationToken,
    pub password: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_from_url() {
        let url = Url::parse("https://console.test/invitations?token=abc%2B1&x=y").unwrap();
        assert_eq!(InvitationToken::from_url(&url).unwrap().as_str(), "abc+1");
    }

    #[test]
    fn blank_or_missing_token_is_none() {
        let url = Url::parse("https://console.test/invitations?token=%20").unwrap();
        assert!(InvitationToken::from_url(&url).is_none());
        let url = Url::parse("https://console.test/invitations").unwrap();
        assert!(InvitationToken::from_url(&url).is_none());
    }

    #[test]
    fn details_accept_both_spellings() {
        let camel: InvitationDetails = serde_json::from_value(json!({
            "email": "a@x.com", "orgName": "Acme", "firstName": "Ada", "lastName": "L", "newUser": true
        }))
        .unwrap();
        let snake: InvitationDetails = serde_json::from_value(json!({
            "email": "a@x.com", "organization_name": "Acme", "first_name": "Ada", "last_name": "L", "is_new_user": true
        }))
        .unwrap();
        assert_eq!(camel, snake);
        assert!(camel.is_new_user);
    }

    #[test]
    fn claim_request_wire_format() {
        let req = ClaimAccountRequest {
            token: InvitationToken::new("tok").unwrap(),
            password: "password1".to_string(),
            first_name: "Ada".to_string(),
            last_name: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"token": "tok", "password": "password1", "firstName": "Ada"})
        );
    }
}
