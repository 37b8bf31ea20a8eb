//! Serde default functions for configuration fields

use uuid::Uuid;

pub fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

pub fn default_owner_id() -> Uuid {
    Uuid::nil()
}

pub fn default_database_url() -> String {
    "sqlite://./stream-warden.db".to_string()
}

pub fn default_max_connections() -> u32 {
    5
}

pub fn default_check_interval_seconds() -> u64 {
    60
}

pub fn default_max_streams() -> u64 {
    50
}

pub fn default_countries() -> Vec<String> {
    vec!["SY".to_string()]
}

pub fn default_categories() -> Vec<String> {
    vec!["News".to_string(), "Sports".to_string()]
}

pub fn default_country() -> String {
    "SY".to_string()
}

pub fn default_probe_timeout_seconds() -> u64 {
    30
}

pub fn default_probe_concurrency() -> usize {
    8
}
