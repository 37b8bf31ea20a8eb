//! Playlist source handling
//!
//! Discovery pulls candidate streams out of extended-M3U playlists hosted by
//! third parties. Fetching sits behind a trait so the lifecycle manager can
//! be driven against scripted playlists in tests.

use async_trait::async_trait;

use crate::errors::SourceResult;

pub mod m3u;

pub use m3u::{HttpPlaylistFetcher, parse_extended_m3u, parse_playlist};

/// Retrieves raw playlist text from a source URL
#[async_trait]
pub trait PlaylistFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> SourceResult<String>;
}
