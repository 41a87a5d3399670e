use serde::{Deserialize, Serialize};

use crate::invitation::{FormError, validate_password};

/// Account status as reported by the accounts API (`0` pending, `1` active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum UserStatus {
    /// Created but not yet verified or claimed (shadow users from invitations).
    #[default]
    Pending,
    Active,
    /// Any other code the server uses for blocked or deactivated accounts.
    Disabled(i64),
}

impl From<i64> for UserStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Active,
            other => Self::Disabled(other),
        }
    }
}

impl From<UserStatus> for i64 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Pending => 0,
            UserStatus::Active => 1,
            UserStatus::Disabled(code) => code,
        }
    }
}

/// Signup channel the account originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum UserSource {
    #[default]
    Direct,
    Google,
    Facebook,
    Other(i64),
}

impl From<i64> for UserSource {
    fn from(code: i64) -> Self {
        match code {
            1 => Self::Direct,
            2 => Self::Google,
            3 => Self::Facebook,
            other => Self::Other(other),
        }
    }
}

impl From<UserSource> for i64 {
    fn from(source: UserSource) -> Self {
        match source {
            UserSource::Direct => 1,
            UserSource::Google => 2,
            UserSource::Facebook => 3,
            UserSource::Other(code) => code,
        }
    }
}

/// Identity of the authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(alias = "firstName", default, deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(alias = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub status: UserStatus,
    #[serde(default, deserialize_with = "nullable")]
    pub source: UserSource,
}

impl User {
    /// "First Last", or just the first name when the last name is missing.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// Treats an explicit `null` like an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[builder(into)]
    pub email: String,
    #[builder(into)]
    pub password: String,
    #[builder(into)]
    pub first_name: String,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[builder(into)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Body of `POST /auth/reset-password`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

impl ResetPasswordRequest {
    /// Rejects a password below the minimum length before anything is sent.
    pub fn new(token: impl Into<String>, new_password: impl Into<String>) -> Result<Self, FormError> {
        let new_password = new_password.into();
        validate_password(&new_password)?;
        Ok(Self {
            token: token.into(),
            new_password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reset_request_enforces_minimum_length() {
        assert_eq!(
            ResetPasswordRequest::new("r-1", "short"),
            Err(FormError::PasswordTooShort)
        );
        let req = ResetPasswordRequest::new("r-1", "long enough").unwrap();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"token": "r-1", "newPassword": "long enough"})
        );
    }

    #[test]
    fn user_decodes_numeric_codes() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "email": "a@x.com",
            "first_name": "Ada",
            "last_name": null,
            "status": 1,
            "source": 2
        }))
        .unwrap();
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.source, UserSource::Google);
        assert_eq!(user.last_name, None);
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn user_tolerates_missing_and_null_codes() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "email": "b@x.com",
            "firstName": "Bo",
            "lastName": "Li",
            "status": null
        }))
        .unwrap();
        assert_eq!(user.status, UserStatus::Pending);
        assert_eq!(user.source, UserSource::Direct);
        assert_eq!(user.display_name(), "Bo Li");
    }

    #[test]
    fn unknown_status_is_disabled() {
        assert_eq!(UserStatus::from(9), UserStatus::Disabled(9));
        assert_eq!(i64::from(UserStatus::Disabled(9)), 9);
    }

    #[test]
    fn signup_request_uses_camel_case() {
        let req = SignupRequest::builder()
            .email("c@x.com")
            .password("longenough")
            .first_name("Cy")
            .time_zone("UTC")
            .build();
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"email": "c@x.com", "password": "longenough", "firstName": "Cy", "timeZone": "UTC"})
        );
    }
}
