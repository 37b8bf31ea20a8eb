//! Structured reports returned by lifecycle operations
//!
//! Every operation returns one of these, JSON-serializable, even when every
//! item in its working set failed. Shapes follow what the scheduler and any
//! CLI/API wrapper consume.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::HealthStatus;

/// Lifecycle operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Discover,
    Check,
    Restart,
    Cleanup,
    Update,
}

impl Action {
    /// Parse a CLI/scheduler argument; anything unrecognized falls back to
    /// `Check`.
    pub fn from_arg(arg: &str) -> Self {
        match arg.to_lowercase().as_str() {
            "discover" => Action::Discover,
            "check" => Action::Check,
            "restart" => Action::Restart,
            "cleanup" => Action::Cleanup,
            "update" => Action::Update,
            _ => Action::Check,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Discover => write!(f, "discover"),
            Action::Check => write!(f, "check"),
            Action::Restart => write!(f, "restart"),
            Action::Cleanup => write!(f, "cleanup"),
            Action::Update => write!(f, "update"),
        }
    }
}

/// Result of a `discover` pass
#[derive(Debug, Clone, Serialize)]
pub struct DiscoverReport {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub discovered: u64,
    pub errors: u64,
    pub timestamp: DateTime<Utc>,
}

impl DiscoverReport {
    /// Short-circuit report for the feature-flag-off case
    pub fn disabled() -> Self {
        Self {
            status: "disabled".to_string(),
            message: Some("Auto discover is disabled".to_string()),
            discovered: 0,
            errors: 0,
            timestamp: Utc::now(),
        }
    }
}

/// Per-record outcome within a `check` pass
#[derive(Debug, Clone, Serialize)]
pub struct CheckDetail {
    pub id: Uuid,
    pub name: String,
    pub status: HealthStatus,
    pub checked_at: DateTime<Utc>,
}

/// Result of a `check` pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub total: u64,
    pub online: u64,
    pub offline: u64,
    pub restarted: u64,
    pub details: Vec<CheckDetail>,
}

/// Result of a bulk `restart` pass
#[derive(Debug, Clone, Serialize)]
pub struct RestartReport {
    pub restarted: u64,
    pub total: u64,
}

/// Result of a `cleanup` pass
#[derive(Debug, Clone, Serialize)]
pub struct CleanupReport {
    pub deleted: u64,
    pub deactivated: u64,
}

/// Result of an `update` enrichment pass
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub updated: u64,
    pub total: u64,
}

/// Report returned by [`LifecycleManager::run`](crate::services::lifecycle::LifecycleManager::run)
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LifecycleReport {
    Discover(DiscoverReport),
    Check(CheckReport),
    Restart(RestartReport),
    Cleanup(CleanupReport),
    Update(UpdateReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_action_falls_back_to_check() {
        assert_eq!(Action::from_arg("discover"), Action::Discover);
        assert_eq!(Action::from_arg("CLEANUP"), Action::Cleanup);
        assert_eq!(Action::from_arg("bogus"), Action::Check);
        assert_eq!(Action::from_arg(""), Action::Check);
    }

    #[test]
    fn disabled_discover_report_serializes_with_status() {
        let json = serde_json::to_value(LifecycleReport::Discover(DiscoverReport::disabled()))
            .unwrap();
        assert_eq!(json["status"], "disabled");
        assert_eq!(json["discovered"], 0);
    }
}
