//! Extended-M3U playlist fetching and parsing
//!
//! Supports `#EXTINF` metadata lines with `group-title`, `tvg-logo` and
//! `tvg-country` attributes followed by a bare media URL line. Parser state
//! is local to one call; the returned candidates are never persisted as-is.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::PlaylistFetcher;
use crate::errors::{SourceError, SourceResult};
use crate::models::Candidate;

/// Hard timeout for retrieving one playlist
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP playlist fetcher
pub struct HttpPlaylistFetcher {
    client: Client,
}

impl HttpPlaylistFetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for HttpPlaylistFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaylistFetcher for HttpPlaylistFetcher {
    async fn fetch(&self, url: &str) -> SourceResult<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout {
                    url: url.to_string(),
                }
            } else {
                SourceError::Fetch {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        if !response.status().is_success() {
            return Err(SourceError::Fetch {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        response.text().await.map_err(|e| SourceError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Parse fetched playlist text, distinguishing "empty but well-formed" from
/// "not a playlist at all".
///
/// A body with zero candidates is only an error when it also carries no
/// `#EXTM3U`/`#EXTINF` marker; a bare header parses to an empty, valid
/// result.
pub fn parse_playlist(content: &str, url: &str) -> SourceResult<Vec<Candidate>> {
    let candidates = parse_extended_m3u(content);
    if candidates.is_empty() && !looks_like_playlist(content) {
        return Err(SourceError::Format {
            url: url.to_string(),
        });
    }
    debug!("Parsed {} candidates from {}", candidates.len(), url);
    Ok(candidates)
}

fn looks_like_playlist(content: &str) -> bool {
    content.lines().any(|line| {
        let line = line.trim();
        line.starts_with("#EXTM3U") || line.starts_with("#EXTINF")
    })
}

/// Scan playlist text into candidates.
///
/// An `#EXTINF` line introduces or continues the in-progress candidate; a
/// later metadata line overwrites the fields it carries and leaves the rest
/// in place (last write wins until a URL line completes the entry). The
/// first non-comment, non-blank line after metadata is taken as the media
/// URL, and the candidate is kept only when both name and URL are
/// non-empty. All other `#`-prefixed lines are ignored.
pub fn parse_extended_m3u(content: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut current = Candidate::default();

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with("#EXTINF") {
            current.name = extinf_title(line).unwrap_or_default();
            if let Some(category) = extinf_attribute(line, "group-title") {
                current.category = Some(category);
            }
            if let Some(logo) = extinf_attribute(line, "tvg-logo") {
                current.logo = Some(logo);
            }
            if let Some(country) = extinf_attribute(line, "tvg-country") {
                current.country_hint = Some(country);
            }
        } else if !line.is_empty() && !line.starts_with('#') {
            current.url = line.to_string();
            if !current.name.is_empty() {
                candidates.push(std::mem::take(&mut current));
            } else {
                current = Candidate::default();
            }
        }
    }

    candidates
}

/// Display name: the trailing comma-separated title segment
fn extinf_title(line: &str) -> Option<String> {
    let pos = line.rfind(',')?;
    let title = line[pos + 1..].trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Extract a quoted `key="value"` attribute from an EXTINF line
fn extinf_attribute(line: &str, key: &str) -> Option<String> {
    let marker = format!("{key}=\"");
    let start = line.find(&marker)? + marker.len();
    let rest = &line[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metadata_and_url_pairs() {
        let text = "#EXTM3U\n\
                    #EXTINF:-1 tvg-logo=\"http://x/l.png\" group-title=\"News\" tvg-country=\"SY\",Syria News HD\n\
                    http://example.com/syria.m3u8\n\
                    #EXTINF:-1,Plain Channel\n\
                    http://example.com/plain.ts\n";
        let candidates = parse_extended_m3u(text);
        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates[0].name, "Syria News HD");
        assert_eq!(candidates[0].url, "http://example.com/syria.m3u8");
        assert_eq!(candidates[0].category.as_deref(), Some("News"));
        assert_eq!(candidates[0].logo.as_deref(), Some("http://x/l.png"));
        assert_eq!(candidates[0].country_hint.as_deref(), Some("SY"));

        assert_eq!(candidates[1].name, "Plain Channel");
        assert!(candidates[1].category.is_none());
    }

    #[test]
    fn later_metadata_line_overwrites_earlier_fields() {
        let text = "#EXTINF:-1 group-title=\"News\",First Title\n\
                    #EXTINF:-1,Second Title\n\
                    http://example.com/a.ts\n";
        let candidates = parse_extended_m3u(text);
        assert_eq!(candidates.len(), 1);
        // name replaced, category from the earlier line survives
        assert_eq!(candidates[0].name, "Second Title");
        assert_eq!(candidates[0].category.as_deref(), Some("News"));
    }

    #[test]
    fn url_without_title_is_dropped() {
        let text = "#EXTM3U\nhttp://example.com/orphan.ts\n";
        assert!(parse_extended_m3u(text).is_empty());
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let text = "#EXTM3U\n\n#EXTVLCOPT:network-caching=1000\n\
                    #EXTINF:-1,Channel\n\
                    #EXTGRP:Misc\n\
                    http://example.com/c.ts\n";
        let candidates = parse_extended_m3u(text);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Channel");
    }

    #[test]
    fn well_formed_empty_playlist_is_valid() {
        let candidates = parse_playlist("#EXTM3U\n", "http://example.com/empty.m3u").unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn non_playlist_body_is_a_format_error() {
        let err = parse_playlist("<html>not found</html>", "http://example.com/x.m3u")
            .unwrap_err();
        assert!(matches!(err, SourceError::Format { .. }));
    }

    #[test]
    fn candidate_state_resets_between_entries() {
        let text = "#EXTINF:-1 group-title=\"News\",A\n\
                    http://example.com/a.ts\n\
                    #EXTINF:-1,B\n\
                    http://example.com/b.ts\n";
        let candidates = parse_extended_m3u(text);
        assert_eq!(candidates.len(), 2);
        assert!(candidates[1].category.is_none());
    }
}
