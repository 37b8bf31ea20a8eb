//! Autonomous stream lifecycle management
//!
//! One manager, five operations: `discover`, `check`, `restart`, `cleanup`
//! and `update`. Each is independently invocable by whatever scheduler
//! drives the binary, holds no state between invocations beyond what the
//! registry persists, and always returns a structured report unless the
//! registry itself is unreachable.
//!
//! Per-stream health transitions depend only on that stream's stored
//! record, so probes fan out concurrently (bounded by
//! `auto.probe_concurrency`) while every registry write stays on the
//! calling task; the store sees a single writer.

use chrono::{Duration, Utc};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{AutoConfig, Config};
use crate::errors::{AppError, AppResult, RegistryResult, SourceResult};
use crate::filter::FilterEngine;
use crate::models::{
    Action, Candidate, CheckDetail, CheckReport, CleanupReport, DiscoverReport, HealthStatus,
    LifecycleReport, Protocol, RestartReport, StreamCreateRequest, StreamInfo, StreamRecord,
    UpdateReport,
};
use crate::repositories::StreamRegistry;
use crate::services::alerts::AlertSink;
use crate::services::probe::{HealthProbe, ProbeOutcome};
use crate::sources::{PlaylistFetcher, parse_playlist};
use crate::utils::{build_output_url, detect_country, slugify};

/// Consecutive failures before the bulk restart operation acts
const RESTART_FAILURE_THRESHOLD: i32 = 3;

/// Minimum minutes between automated restarts of the same stream
const RESTART_COOLDOWN_MINUTES: i64 = 5;

/// Category assigned when a playlist entry carries none
const DEFAULT_CATEGORY: &str = "Auto-Discovered";

/// Orchestrates discovery, health checking, restarts, cleanup and
/// enrichment over the stream registry.
pub struct LifecycleManager {
    registry: Arc<dyn StreamRegistry>,
    probe: Arc<dyn HealthProbe>,
    fetcher: Arc<dyn PlaylistFetcher>,
    alerts: Arc<dyn AlertSink>,
    filter: FilterEngine,
    auto: AutoConfig,
    base_url: String,
    owner_id: Uuid,
}

impl LifecycleManager {
    pub fn new(
        config: &Config,
        registry: Arc<dyn StreamRegistry>,
        probe: Arc<dyn HealthProbe>,
        fetcher: Arc<dyn PlaylistFetcher>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            filter: FilterEngine::new(&config.auto.countries, &config.auto.categories),
            auto: config.auto.clone(),
            base_url: config.app.base_url.clone(),
            owner_id: config.app.owner_id,
            registry,
            probe,
            fetcher,
            alerts,
        }
    }

    /// Single entry point used by the CLI and any scheduler wrapper
    pub async fn run(&self, action: Action) -> AppResult<LifecycleReport> {
        info!("Running lifecycle operation: {}", action);
        match action {
            Action::Discover => Ok(LifecycleReport::Discover(self.discover().await?)),
            Action::Check => Ok(LifecycleReport::Check(self.check().await?)),
            Action::Restart => Ok(LifecycleReport::Restart(self.restart().await?)),
            Action::Cleanup => Ok(LifecycleReport::Cleanup(self.cleanup().await?)),
            Action::Update => Ok(LifecycleReport::Update(self.update().await?)),
        }
    }

    /// Scan configured playlists for new streams.
    ///
    /// A fetch or format failure on one source counts as one error and
    /// never aborts the remaining sources. Inserting stops once the
    /// registry holds `max_streams` records.
    pub async fn discover(&self) -> AppResult<DiscoverReport> {
        if !self.auto.discover_enabled {
            info!("Discovery requested but auto-discover is disabled");
            return Ok(DiscoverReport::disabled());
        }

        let mut discovered = 0u64;
        let mut errors = 0u64;
        let mut total = self.registry.count().await?;

        'sources: for source_url in &self.auto.playlist_urls {
            let source_url = source_url.trim();
            if source_url.is_empty() {
                continue;
            }

            let candidates = match self.fetch_candidates(source_url).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    errors += 1;
                    warn!("Failed to ingest playlist {}: {}", source_url, e);
                    continue;
                }
            };

            for candidate in candidates {
                if total >= self.auto.max_streams {
                    warn!(
                        "Stream cap of {} reached, skipping remaining candidates",
                        self.auto.max_streams
                    );
                    break 'sources;
                }

                if !self
                    .filter
                    .accepts(&candidate, self.registry.as_ref())
                    .await
                    .map_err(AppError::Registry)?
                {
                    continue;
                }

                match self.add_stream(&candidate).await {
                    Ok(record) => {
                        discovered += 1;
                        total += 1;
                        info!("Discovered stream: {} ({})", record.name, record.slug);
                    }
                    Err(e) if e.is_constraint() => {
                        // lost a race against another insert; already present
                        debug!("Skipping {}: already exists", candidate.name);
                    }
                    Err(e) => return Err(AppError::Registry(e)),
                }
            }
        }

        Ok(DiscoverReport {
            status: "success".to_string(),
            message: None,
            discovered,
            errors,
            timestamp: Utc::now(),
        })
    }

    /// Probe every active stream and apply health transitions.
    ///
    /// A successful probe resets the failure counter and stamps
    /// `last_working`; a failed one increments the counter, and when
    /// auto-restart is enabled the restart sub-action runs immediately in
    /// the same pass (no threshold, no cooldown, no alert).
    pub async fn check(&self) -> AppResult<CheckReport> {
        let records = self.registry.list_active().await?;
        let mut report = CheckReport {
            total: records.len() as u64,
            ..Default::default()
        };

        let concurrency = self.auto.probe_concurrency.max(1);
        let outcomes: Vec<(StreamRecord, ProbeOutcome)> =
            stream::iter(records.into_iter().map(|record| {
                let probe = Arc::clone(&self.probe);
                async move {
                    let outcome = probe.probe(&record.source_url).await;
                    (record, outcome)
                }
            }))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        for (record, outcome) in outcomes {
            let status = if outcome.online {
                HealthStatus::Online
            } else {
                HealthStatus::Offline
            };

            if outcome.online {
                report.online += 1;
                self.registry
                    .update_health(record.id, HealthStatus::Online, 0, Some(Utc::now()))
                    .await?;
            } else {
                report.offline += 1;
                self.registry
                    .update_health(record.id, HealthStatus::Offline, 1, None)
                    .await?;

                if self.auto.restart_enabled {
                    self.restart_stream(&record).await?;
                    report.restarted += 1;
                }
            }

            report.details.push(CheckDetail {
                id: record.id,
                name: record.name,
                status,
                checked_at: Utc::now(),
            });
        }

        info!(
            "Check complete: {} online, {} offline, {} restarted",
            report.online, report.offline, report.restarted
        );
        Ok(report)
    }

    /// Restart every active, offline stream that has failed at least
    /// [`RESTART_FAILURE_THRESHOLD`] times and is outside its cooldown.
    pub async fn restart(&self) -> AppResult<RestartReport> {
        let cooldown_cutoff = Utc::now() - Duration::minutes(RESTART_COOLDOWN_MINUTES);

        let eligible: Vec<StreamRecord> = self
            .registry
            .list_active()
            .await?
            .into_iter()
            .filter(|record| {
                record.health_status == HealthStatus::Offline
                    && record.failure_count >= RESTART_FAILURE_THRESHOLD
                    && record.last_restart.is_none_or(|at| at < cooldown_cutoff)
            })
            .collect();

        let total = eligible.len() as u64;
        let mut restarted = 0u64;

        for record in &eligible {
            self.restart_stream(record).await?;
            self.alerts
                .notify(&format!("Stream Restarted: {}", record.name))
                .await;
            restarted += 1;
        }

        Ok(RestartReport { restarted, total })
    }

    /// Reclaim stale entries.
    ///
    /// Hard-deletes auto-added, never-viewed records created at least a
    /// week ago and unseen working for three days; deactivates active
    /// offline records that have not worked for 24 hours (a null
    /// `last_working` counts once the record itself is that old).
    pub async fn cleanup(&self) -> AppResult<CleanupReport> {
        let now = Utc::now();
        let stale_cutoff = now - Duration::days(7);
        let unseen_cutoff = now - Duration::days(3);
        let offline_cutoff = now - Duration::hours(24);

        let mut deleted = 0u64;
        for record in self.registry.list_created_before(stale_cutoff).await? {
            let unseen = record.last_working.is_none_or(|at| at < unseen_cutoff);
            if record.auto_added && record.total_views == 0 && unseen {
                self.registry.delete(record.id).await?;
                deleted += 1;
                info!("Deleted stale stream: {}", record.name);
            }
        }

        let mut deactivated = 0u64;
        for record in self.registry.list_active().await? {
            if record.health_status != HealthStatus::Offline {
                continue;
            }
            let dead = match record.last_working {
                Some(at) => at < offline_cutoff,
                None => record.created_at < offline_cutoff,
            };
            if dead {
                self.registry.deactivate(record.id).await?;
                deactivated += 1;
                info!("Deactivated offline stream: {}", record.name);
            }
        }

        Ok(CleanupReport {
            deleted,
            deactivated,
        })
    }

    /// Best-effort enrichment of every active record with content metadata.
    ///
    /// Per-record failures are skipped silently; they are informational,
    /// not errors.
    pub async fn update(&self) -> AppResult<UpdateReport> {
        let records = self.registry.list_active().await?;
        let total = records.len() as u64;

        let concurrency = self.auto.probe_concurrency.max(1);
        let results: Vec<(StreamRecord, Option<StreamInfo>)> =
            stream::iter(records.into_iter().map(|record| {
                let probe = Arc::clone(&self.probe);
                async move {
                    let info = probe.inspect(&record.source_url).await;
                    (record, info)
                }
            }))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let now = Utc::now();
        let mut updated = 0u64;
        for (record, info) in results {
            match info {
                Some(info) => {
                    self.registry.update_info(record.id, &info, now).await?;
                    updated += 1;
                }
                None => debug!("No stream info for {}", record.name),
            }
        }

        Ok(UpdateReport { updated, total })
    }

    async fn fetch_candidates(&self, url: &str) -> SourceResult<Vec<Candidate>> {
        let text = self.fetcher.fetch(url).await?;
        parse_playlist(&text, url)
    }

    /// Insert an accepted candidate as a new auto-added record
    async fn add_stream(&self, candidate: &Candidate) -> RegistryResult<StreamRecord> {
        let slug = self.unique_slug(&candidate.name).await?;
        let output_url = build_output_url(&self.base_url, &slug);

        let request = StreamCreateRequest {
            owner_id: self.owner_id,
            name: candidate.name.clone(),
            slug,
            source_url: candidate.url.clone(),
            output_url,
            protocol: Protocol::detect(&candidate.url),
            category: candidate
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            country_code: detect_country(
                &candidate.name,
                candidate.country_hint.as_deref(),
                &self.auto.default_country,
            ),
            auto_added: true,
        };

        self.registry.insert(request).await
    }

    /// Derive a slug and resolve collisions with a numeric suffix,
    /// re-checking the registry each time.
    async fn unique_slug(&self, name: &str) -> RegistryResult<String> {
        let base = slugify(name);
        let mut slug = base.clone();
        let mut counter = 1u32;
        while self.registry.slug_exists(&slug).await? {
            slug = format!("{base}-{counter}");
            counter += 1;
        }
        Ok(slug)
    }

    /// Restart sub-action: counter back to zero, restart stamped, audit
    /// event recorded.
    async fn restart_stream(&self, record: &StreamRecord) -> RegistryResult<()> {
        self.registry.update_restart(record.id, Utc::now()).await?;
        self.registry
            .record_event(record.id, "auto_restart", "Stream automatically restarted")
            .await?;
        info!("Restarted stream: {}", record.name);
        Ok(())
    }
}
