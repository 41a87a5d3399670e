use serde::{Deserialize, Serialize};

use crate::user::User;

/// An organization the user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: i64,
    #[serde(rename = "org_name", alias = "orgName", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "employeeCount", default)]
    pub employee_count: Option<String>,
}

/// Payload of `GET /auth/init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitData {
    #[serde(alias = "userInformation", default)]
    pub user_information: Option<User>,
    #[serde(alias = "defaultOrganizations", default)]
    pub default_organizations: Option<Organization>,
    #[serde(alias = "otherOrganizations", default)]
    pub other_organizations: Vec<Organization>,
}
