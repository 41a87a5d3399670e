//! Active login sessions listed on the security screen.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A server-side login session of the current user.
///
/// The session cookie itself is never part of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: i64,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(alias = "deviceName", default)]
    pub device_name: Option<String>,
    #[serde(alias = "deviceOs", default)]
    pub device_os: Option<String>,
    #[serde(alias = "machineIp", default)]
    pub machine_ip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Epoch milliseconds
    #[serde(alias = "expireTime", default)]
    pub expire_time: Option<i64>,
    /// Epoch milliseconds
    #[serde(alias = "createdTime", default)]
    pub created_time: Option<i64>,
}

impl UserSession {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expire_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_time.and_then(DateTime::from_timestamp_millis)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }
}
