use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod reports;
pub mod stream;

pub use reports::*;

/// A transient stream descriptor extracted from a playlist.
///
/// Candidates only exist between parsing and filtering; accepted ones are
/// turned into [`StreamRecord`]s, rejected ones are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub url: String,
    pub category: Option<String>,
    pub logo: Option<String>,
    pub country_hint: Option<String>,
}

/// Transport protocol of a stream source URL
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Rtmp,
    Rtsp,
    Udp,
    M3u8,
}

/// Probed health of a registered stream
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

/// A registered stream as stored by the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamRecord {
    pub id: Uuid,
    /// Registering account; auto-added records carry the system identity
    pub owner_id: Uuid,
    pub name: String,
    /// URL-safe unique identifier, fixed at creation
    pub slug: String,
    pub source_url: String,
    /// Public restream URL derived from the slug at creation, immutable
    pub output_url: String,
    pub protocol: Protocol,
    pub category: String,
    pub country_code: String,
    pub is_active: bool,
    pub health_status: HealthStatus,
    /// Consecutive failed probes since the last success or restart
    pub failure_count: i32,
    pub last_working: Option<DateTime<Utc>>,
    pub last_restart: Option<DateTime<Utc>>,
    pub total_views: i64,
    pub content_type: Option<String>,
    pub content_length: Option<i64>,
    pub info_updated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// True for records created by discovery rather than by hand
    pub auto_added: bool,
}

/// Payload for inserting a new stream record
#[derive(Debug, Clone)]
pub struct StreamCreateRequest {
    pub owner_id: Uuid,
    pub name: String,
    pub slug: String,
    pub source_url: String,
    pub output_url: String,
    pub protocol: Protocol,
    pub category: String,
    pub country_code: String,
    pub auto_added: bool,
}

/// Informational metadata learned by the `update` operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamInfo {
    pub content_type: Option<String>,
    pub content_length: Option<i64>,
}
