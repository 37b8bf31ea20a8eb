use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "streams")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub source_url: String,
    pub output_url: String,
    pub protocol: String, // http, rtmp, rtsp, udp, m3u8
    pub category: String,
    pub country_code: String,
    pub is_active: bool,
    pub health_status: String, // online, offline, unknown
    pub failure_count: i32,
    pub last_working: Option<DateTimeUtc>,
    pub last_restart: Option<DateTimeUtc>,
    pub total_views: i64,
    pub content_type: Option<String>,
    pub content_length: Option<i64>,
    pub info_updated: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub auto_added: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
