//! Persistence-facing gateway
//!
//! The lifecycle manager only ever talks to the store through the
//! [`StreamRegistry`] trait; the SeaORM implementation lives in
//! [`stream`]. Keeping the surface narrow keeps every operation drivable
//! from tests with an in-memory database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::RegistryResult;
use crate::models::{HealthStatus, StreamCreateRequest, StreamInfo, StreamRecord};

pub mod stream;

pub use stream::SeaOrmStreamRegistry;

/// Record-oriented access to the stream store.
///
/// All coordination happens through the store; the design assumes a single
/// writer at a time. Uniqueness conflicts surface as
/// [`RegistryError::Constraint`](crate::errors::RegistryError::Constraint)
/// and are recoverable "already exists" outcomes for callers.
#[async_trait]
pub trait StreamRegistry: Send + Sync {
    /// All records eligible for serving/probing
    async fn list_active(&self) -> RegistryResult<Vec<StreamRecord>>;

    /// Age query used by cleanup eligibility checks
    async fn list_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> RegistryResult<Vec<StreamRecord>>;

    async fn get(&self, id: Uuid) -> RegistryResult<Option<StreamRecord>>;

    /// Total number of records, active or not
    async fn count(&self) -> RegistryResult<u64>;

    /// Best-effort dedup check: true when any record matches either field
    async fn exists_by_source_or_name(
        &self,
        source_url: &str,
        name: &str,
    ) -> RegistryResult<bool>;

    async fn slug_exists(&self, slug: &str) -> RegistryResult<bool>;

    /// Insert a new record; fails with a constraint error on slug collisions
    async fn insert(&self, request: StreamCreateRequest) -> RegistryResult<StreamRecord>;

    /// Apply a probe outcome.
    ///
    /// An `online` status resets the failure counter to zero; any other
    /// status adds `failure_delta` to it. `last_working` is stamped only
    /// when provided.
    async fn update_health(
        &self,
        id: Uuid,
        status: HealthStatus,
        failure_delta: i32,
        last_working: Option<DateTime<Utc>>,
    ) -> RegistryResult<()>;

    /// Stamp a restart: `last_restart := at`, failure counter back to zero
    async fn update_restart(&self, id: Uuid, at: DateTime<Utc>) -> RegistryResult<()>;

    /// Store enrichment metadata learned by the `update` operation
    async fn update_info(
        &self,
        id: Uuid,
        info: &StreamInfo,
        at: DateTime<Utc>,
    ) -> RegistryResult<()>;

    async fn deactivate(&self, id: Uuid) -> RegistryResult<()>;

    async fn delete(&self, id: Uuid) -> RegistryResult<()>;

    /// Append an audit event for a stream
    async fn record_event(
        &self,
        stream_id: Uuid,
        event_type: &str,
        message: &str,
    ) -> RegistryResult<()>;
}
