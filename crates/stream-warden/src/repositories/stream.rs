//! SeaORM-backed stream registry
//!
//! Thin gateway over the `streams` and `stream_events` tables. Enum-ish
//! columns are stored as strings and decoded here; a value that no longer
//! parses surfaces as a decode error instead of a silent default.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{prelude::Streams, stream_events, streams};
use crate::errors::{RegistryError, RegistryResult};
use crate::models::{HealthStatus, StreamCreateRequest, StreamInfo, StreamRecord};

use super::StreamRegistry;

/// SeaORM implementation of [`StreamRegistry`]
#[derive(Clone)]
pub struct SeaOrmStreamRegistry {
    connection: Arc<DatabaseConnection>,
}

impl SeaOrmStreamRegistry {
    pub fn new(connection: Arc<DatabaseConnection>) -> Self {
        Self { connection }
    }

    fn model_to_record(model: streams::Model) -> RegistryResult<StreamRecord> {
        let protocol = model
            .protocol
            .parse()
            .map_err(|_| RegistryError::Decode {
                field: "protocol".to_string(),
                value: model.protocol.clone(),
            })?;
        let health_status = model
            .health_status
            .parse()
            .map_err(|_| RegistryError::Decode {
                field: "health_status".to_string(),
                value: model.health_status.clone(),
            })?;

        Ok(StreamRecord {
            id: model.id,
            owner_id: model.owner_id,
            name: model.name,
            slug: model.slug,
            source_url: model.source_url,
            output_url: model.output_url,
            protocol,
            category: model.category,
            country_code: model.country_code,
            is_active: model.is_active,
            health_status,
            failure_count: model.failure_count,
            last_working: model.last_working,
            last_restart: model.last_restart,
            total_views: model.total_views,
            content_type: model.content_type,
            content_length: model.content_length,
            info_updated: model.info_updated,
            created_at: model.created_at,
            auto_added: model.auto_added,
        })
    }

    async fn find_model(&self, id: Uuid) -> RegistryResult<streams::Model> {
        Streams::find_by_id(id)
            .one(&*self.connection)
            .await?
            .ok_or_else(|| RegistryError::NotFound {
                resource: "stream".to_string(),
                id: id.to_string(),
            })
    }
}

#[async_trait]
impl StreamRegistry for SeaOrmStreamRegistry {
    async fn list_active(&self) -> RegistryResult<Vec<StreamRecord>> {
        let models = Streams::find()
            .filter(streams::Column::IsActive.eq(true))
            .all(&*self.connection)
            .await?;

        models.into_iter().map(Self::model_to_record).collect()
    }

    async fn list_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> RegistryResult<Vec<StreamRecord>> {
        let models = Streams::find()
            .filter(streams::Column::CreatedAt.lt(cutoff))
            .all(&*self.connection)
            .await?;

        models.into_iter().map(Self::model_to_record).collect()
    }

    async fn get(&self, id: Uuid) -> RegistryResult<Option<StreamRecord>> {
        let model = Streams::find_by_id(id).one(&*self.connection).await?;
        model.map(Self::model_to_record).transpose()
    }

    async fn count(&self) -> RegistryResult<u64> {
        Ok(Streams::find().count(&*self.connection).await?)
    }

    async fn exists_by_source_or_name(
        &self,
        source_url: &str,
        name: &str,
    ) -> RegistryResult<bool> {
        let matches = Streams::find()
            .filter(
                Condition::any()
                    .add(streams::Column::SourceUrl.eq(source_url))
                    .add(streams::Column::Name.eq(name)),
            )
            .count(&*self.connection)
            .await?;
        Ok(matches > 0)
    }

    async fn slug_exists(&self, slug: &str) -> RegistryResult<bool> {
        let matches = Streams::find()
            .filter(streams::Column::Slug.eq(slug))
            .count(&*self.connection)
            .await?;
        Ok(matches > 0)
    }

    async fn insert(&self, request: StreamCreateRequest) -> RegistryResult<StreamRecord> {
        let slug = request.slug.clone();
        let active_model = streams::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(request.owner_id),
            name: Set(request.name),
            slug: Set(request.slug),
            source_url: Set(request.source_url),
            output_url: Set(request.output_url),
            protocol: Set(request.protocol.to_string()),
            category: Set(request.category),
            country_code: Set(request.country_code),
            is_active: Set(true),
            health_status: Set(HealthStatus::Unknown.to_string()),
            failure_count: Set(0),
            last_working: Set(None),
            last_restart: Set(None),
            total_views: Set(0),
            content_type: Set(None),
            content_length: Set(None),
            info_updated: Set(None),
            created_at: Set(Utc::now()),
            auto_added: Set(request.auto_added),
        };

        let model = active_model
            .insert(&*self.connection)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => RegistryError::Constraint {
                    field: "slug".to_string(),
                    value: slug.clone(),
                },
                _ => RegistryError::Database(e),
            })?;

        Self::model_to_record(model)
    }

    async fn update_health(
        &self,
        id: Uuid,
        status: HealthStatus,
        failure_delta: i32,
        last_working: Option<DateTime<Utc>>,
    ) -> RegistryResult<()> {
        let model = self.find_model(id).await?;
        let failure_count = match status {
            HealthStatus::Online => 0,
            _ => model.failure_count + failure_delta,
        };

        let mut active: streams::ActiveModel = model.into();
        active.health_status = Set(status.to_string());
        active.failure_count = Set(failure_count);
        if let Some(at) = last_working {
            active.last_working = Set(Some(at));
        }
        active.update(&*self.connection).await?;
        Ok(())
    }

    async fn update_restart(&self, id: Uuid, at: DateTime<Utc>) -> RegistryResult<()> {
        let model = self.find_model(id).await?;
        let mut active: streams::ActiveModel = model.into();
        active.last_restart = Set(Some(at));
        active.failure_count = Set(0);
        active.update(&*self.connection).await?;
        Ok(())
    }

    async fn update_info(
        &self,
        id: Uuid,
        info: &StreamInfo,
        at: DateTime<Utc>,
    ) -> RegistryResult<()> {
        let model = self.find_model(id).await?;
        let mut active: streams::ActiveModel = model.into();
        active.content_type = Set(info.content_type.clone());
        active.content_length = Set(info.content_length);
        active.info_updated = Set(Some(at));
        active.update(&*self.connection).await?;
        Ok(())
    }

    async fn deactivate(&self, id: Uuid) -> RegistryResult<()> {
        let model = self.find_model(id).await?;
        let mut active: streams::ActiveModel = model.into();
        active.is_active = Set(false);
        active.update(&*self.connection).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RegistryResult<()> {
        Streams::delete_by_id(id).exec(&*self.connection).await?;
        Ok(())
    }

    async fn record_event(
        &self,
        stream_id: Uuid,
        event_type: &str,
        message: &str,
    ) -> RegistryResult<()> {
        let event = stream_events::ActiveModel {
            id: Set(Uuid::new_v4()),
            stream_id: Set(stream_id),
            event_type: Set(event_type.to_string()),
            message: Set(message.to_string()),
            created_at: Set(Utc::now()),
        };
        event.insert(&*self.connection).await?;
        Ok(())
    }
}
