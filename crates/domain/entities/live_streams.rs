use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::live_streams::CreateLiveStreamModel;

/// A live stream record as stored in the `livestreams` collection.
///
/// Field names are the on-disk schema shared with existing data and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStreamEntity {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub thumbnail: String, // preview image url
    pub publisher_id: ObjectId,
    pub stream_key: String, // secret used to authenticate the publishing connection
    pub live_stream_status: bool,
    pub viewer_count: i64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl LiveStreamEntity {
    /// Builds a fresh, offline record with no viewers.
    pub fn new(model: CreateLiveStreamModel, now: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            name: model.name,
            thumbnail: model.thumbnail,
            publisher_id: model.publisher_id,
            stream_key: model.stream_key,
            live_stream_status: false,
            viewer_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
