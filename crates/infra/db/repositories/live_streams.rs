use async_trait::async_trait;
use bson::{Bson, Document, doc, oid::ObjectId};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, options::FindOptions};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain;
use domain::{
    entities::live_streams::LiveStreamEntity,
    errors::{RepositoryError, RepositoryResult},
    repositories::live_streams::LiveStreamRepository,
    value_objects::live_streams::{CreateLiveStreamModel, UpdateLiveStreamModel},
};

pub const DEFAULT_LIVE_STREAM_COLLECTION: &str = "livestreams";

const ID: &str = "_id";
const NAME: &str = "name";
const PUBLISHER_ID: &str = "publisher_id";
const STREAM_KEY: &str = "stream_key";
const LIVE_STREAM_STATUS: &str = "live_stream_status";
const UPDATED_AT: &str = "updated_at";

pub struct LiveStreamMongo {
    db: Arc<Database>,
    collection_name: String,
}

impl LiveStreamMongo {
    pub fn new(db: Arc<Database>, collection_name: impl Into<String>) -> Self {
        Self {
            db,
            collection_name: collection_name.into(),
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Creates the secondary indexes used by the lookups. Safe to call on every start.
    pub async fn setup_collection(&self) -> Result<(), mongodb::error::Error> {
        let collection = self.collection();

        for field in [PUBLISHER_ID, NAME, STREAM_KEY, LIVE_STREAM_STATUS] {
            let mut keys = Document::new();
            keys.insert(field, 1);

            collection
                .create_index(IndexModel::builder().keys(keys).build(), None)
                .await?;
        }

        Ok(())
    }

    // Reads go through raw documents so a missing match and a malformed match stay distinct.
    fn collection(&self) -> Collection<Document> {
        self.db.collection(&self.collection_name)
    }

    async fn find_one_by(
        &self,
        operation: &'static str,
        field: &'static str,
        value: Bson,
    ) -> RepositoryResult<LiveStreamEntity> {
        let shown = displayed_value(field, &value);
        let target = format!("{field} = {shown}");
        let mut filter = Document::new();
        filter.insert(field, value);

        let document = self
            .collection()
            .find_one(filter, None)
            .await
            .map_err(RepositoryError::persistence(operation, &target))?;

        match document {
            Some(document) => {
                bson::from_document(document).map_err(RepositoryError::decode(operation, target))
            }
            None => {
                warn!(operation, field, "live stream not found");
                Err(RepositoryError::not_found(operation, field, shown))
            }
        }
    }

    async fn find_many_by(
        &self,
        operation: &'static str,
        target: &str,
        filter: Document,
        options: Option<FindOptions>,
    ) -> RepositoryResult<Vec<LiveStreamEntity>> {
        let documents = self
            .collection()
            .find(filter, options)
            .await
            .map_err(RepositoryError::persistence(operation, target))?
            .try_collect::<Vec<Document>>()
            .await
            .map_err(RepositoryError::persistence(operation, target))?;

        debug!(operation, count = documents.len(), "live streams fetched");

        documents
            .into_iter()
            .map(|document| {
                bson::from_document(document).map_err(RepositoryError::decode(operation, target))
            })
            .collect()
    }

    async fn update_one_by_id(
        &self,
        operation: &'static str,
        id: ObjectId,
        update: Document,
    ) -> RepositoryResult<()> {
        let result = self
            .collection()
            .update_one(doc! { "_id": id }, update, None)
            .await
            .map_err(RepositoryError::persistence(operation, id_target(id)))?;

        check_single_modification(operation, id, result.matched_count, result.modified_count)
    }
}

#[async_trait]
impl LiveStreamRepository for LiveStreamMongo {
    async fn create(
        &self,
        create_live_stream_model: CreateLiveStreamModel,
    ) -> RepositoryResult<ObjectId> {
        let entity = LiveStreamEntity::new(create_live_stream_model, Utc::now());

        self.db
            .collection::<LiveStreamEntity>(&self.collection_name)
            .insert_one(&entity, None)
            .await
            .map_err(RepositoryError::persistence("create", id_target(entity.id)))?;

        debug!(id = %entity.id, publisher_id = %entity.publisher_id, "live stream created");

        Ok(entity.id)
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(RepositoryError::persistence("delete", id_target(id)))?;

        if result.deleted_count != 1 {
            warn!(%id, deleted = result.deleted_count, "delete: live stream not found");
            return Err(RepositoryError::not_found("delete", ID, id.to_hex()));
        }

        debug!(%id, "live stream deleted");
        Ok(())
    }

    async fn delete_all_by_publisher(&self, publisher_id: ObjectId) -> RepositoryResult<()> {
        let result = self
            .collection()
            .delete_many(doc! { "publisher_id": publisher_id }, None)
            .await
            .map_err(RepositoryError::persistence(
                "delete_all_by_publisher",
                format!("{PUBLISHER_ID} = {}", publisher_id.to_hex()),
            ))?;

        debug!(%publisher_id, deleted = result.deleted_count, "publisher live streams deleted");
        Ok(())
    }

    async fn set_fields(&self, id: ObjectId, fields: Document) -> RepositoryResult<()> {
        if fields.is_empty() {
            debug!(%id, "set_fields: no fields given, only updated_at is written");
        }

        let update = set_fields_update(fields, Utc::now());
        self.update_one_by_id("set_fields", id, update).await
    }

    async fn set_status(&self, id: ObjectId, live: bool) -> RepositoryResult<()> {
        self.set_fields(id, UpdateLiveStreamModel::status(live).into())
            .await
    }

    async fn set_name(&self, id: ObjectId, name: String) -> RepositoryResult<()> {
        self.set_fields(id, UpdateLiveStreamModel::name(name).into())
            .await
    }

    async fn increment_viewer_count(&self, id: ObjectId) -> RepositoryResult<()> {
        let update = viewer_count_update(1, Utc::now());
        self.update_one_by_id("increment_viewer_count", id, update)
            .await
    }

    async fn decrement_viewer_count(&self, id: ObjectId) -> RepositoryResult<()> {
        let update = viewer_count_update(-1, Utc::now());
        self.update_one_by_id("decrement_viewer_count", id, update)
            .await
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<LiveStreamEntity> {
        self.find_one_by("find_by_id", ID, Bson::ObjectId(id)).await
    }

    async fn find_by_name(&self, name: String) -> RepositoryResult<LiveStreamEntity> {
        self.find_one_by("find_by_name", NAME, Bson::String(name))
            .await
    }

    async fn find_by_stream_key(&self, stream_key: String) -> RepositoryResult<LiveStreamEntity> {
        self.find_one_by("find_by_stream_key", STREAM_KEY, Bson::String(stream_key))
            .await
    }

    async fn list_by_publisher(
        &self,
        publisher_id: ObjectId,
    ) -> RepositoryResult<Vec<LiveStreamEntity>> {
        self.find_many_by(
            "list_by_publisher",
            &format!("{PUBLISHER_ID} = {}", publisher_id.to_hex()),
            doc! { "publisher_id": publisher_id },
            None,
        )
        .await
    }

    async fn list_feed(&self, max_count: u32) -> RepositoryResult<Vec<LiveStreamEntity>> {
        // A limit of 0 means "no limit" to MongoDB.
        if max_count == 0 {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder()
            .limit(Some(i64::from(max_count)))
            .build();

        self.find_many_by(
            "list_feed",
            "live_stream_status = true",
            doc! { "live_stream_status": true },
            Some(options),
        )
        .await
    }

    // TODO: replace with paginated listing once callers stop relying on the full dump.
    async fn list_all(&self) -> RepositoryResult<Vec<LiveStreamEntity>> {
        self.find_many_by("list_all", "all live streams", Document::new(), None)
            .await
    }
}

fn set_fields_update(mut fields: Document, now: DateTime<Utc>) -> Document {
    fields.insert(UPDATED_AT, bson::DateTime::from_chrono(now));
    doc! { "$set": fields }
}

fn viewer_count_update(delta: i64, now: DateTime<Utc>) -> Document {
    doc! {
        "$set": { "updated_at": bson::DateTime::from_chrono(now) },
        "$inc": { "viewer_count": delta },
    }
}

fn check_single_modification(
    operation: &'static str,
    id: ObjectId,
    matched: u64,
    modified: u64,
) -> RepositoryResult<()> {
    if matched == 0 {
        warn!(operation, %id, "live stream not found");
        return Err(RepositoryError::not_found(operation, ID, id.to_hex()));
    }

    if modified != 1 {
        warn!(operation, %id, matched, modified, "unexpected modification count");
        return Err(RepositoryError::UnexpectedModificationCount {
            operation,
            id,
            modified,
        });
    }

    Ok(())
}

fn id_target(id: ObjectId) -> String {
    format!("{ID} = {}", id.to_hex())
}

fn displayed_value(field: &str, value: &Bson) -> String {
    match value {
        // Stream keys authenticate publishers; keep them out of errors and logs.
        _ if field == STREAM_KEY => "<redacted>".to_string(),
        Bson::String(value) => value.clone(),
        Bson::ObjectId(id) => id.to_hex(),
        other => other.to_string(),
    }
}
