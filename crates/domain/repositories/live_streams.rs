use async_trait::async_trait;
use bson::{Document, oid::ObjectId};
use mockall::automock;

use crate::domain::entities::live_streams::LiveStreamEntity;
use crate::domain::errors::RepositoryResult;
use crate::domain::value_objects::live_streams::CreateLiveStreamModel;

#[async_trait]
#[automock]
pub trait LiveStreamRepository {
    async fn create(
        &self,
        create_live_stream_model: CreateLiveStreamModel,
    ) -> RepositoryResult<ObjectId>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Zero matching streams is not an error.
    async fn delete_all_by_publisher(&self, publisher_id: ObjectId) -> RepositoryResult<()>;
    /// `$set`s every field in `fields` and stamps `updated_at`. An empty document
    /// only stamps `updated_at`.
    async fn set_fields(&self, id: ObjectId, fields: Document) -> RepositoryResult<()>;
    async fn set_status(&self, id: ObjectId, live: bool) -> RepositoryResult<()>;
    async fn set_name(&self, id: ObjectId, name: String) -> RepositoryResult<()>;
    async fn increment_viewer_count(&self, id: ObjectId) -> RepositoryResult<()>;
    /// Not clamped at zero.
    async fn decrement_viewer_count(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<LiveStreamEntity>;
    async fn find_by_name(&self, name: String) -> RepositoryResult<LiveStreamEntity>;
    async fn find_by_stream_key(&self, stream_key: String) -> RepositoryResult<LiveStreamEntity>;
    async fn list_by_publisher(
        &self,
        publisher_id: ObjectId,
    ) -> RepositoryResult<Vec<LiveStreamEntity>>;
    /// Live streams only, unordered, at most `max_count` of them.
    async fn list_feed(&self, max_count: u32) -> RepositoryResult<Vec<LiveStreamEntity>>;
    async fn list_all(&self) -> RepositoryResult<Vec<LiveStreamEntity>>;
}
