//! Stream model implementations

use crate::models::{HealthStatus, Protocol};
use anyhow::Result;

impl Protocol {
    /// Detect the protocol from a source URL.
    ///
    /// Scheme prefixes win over the `.m3u8` path check; anything
    /// unrecognized is treated as plain HTTP.
    pub fn detect(url: &str) -> Self {
        if url.starts_with("rtmp://") {
            Protocol::Rtmp
        } else if url.starts_with("rtsp://") {
            Protocol::Rtsp
        } else if url.starts_with("udp://") {
            Protocol::Udp
        } else if url.contains(".m3u8") {
            Protocol::M3u8
        } else {
            Protocol::Http
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "rtmp" => Ok(Protocol::Rtmp),
            "rtsp" => Ok(Protocol::Rtsp),
            "udp" => Ok(Protocol::Udp),
            "m3u8" => Ok(Protocol::M3u8),
            _ => Err(anyhow::anyhow!("Invalid protocol: {}", s)),
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Http => write!(f, "http"),
            Protocol::Rtmp => write!(f, "rtmp"),
            Protocol::Rtsp => write!(f, "rtsp"),
            Protocol::Udp => write!(f, "udp"),
            Protocol::M3u8 => write!(f, "m3u8"),
        }
    }
}

impl std::str::FromStr for HealthStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "online" => Ok(HealthStatus::Online),
            "offline" => Ok(HealthStatus::Offline),
            "unknown" => Ok(HealthStatus::Unknown),
            _ => Err(anyhow::anyhow!("Invalid health status: {}", s)),
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Online => write!(f, "online"),
            HealthStatus::Offline => write!(f, "offline"),
            HealthStatus::Unknown => write!(f, "unknown"),
        }
    }
}
