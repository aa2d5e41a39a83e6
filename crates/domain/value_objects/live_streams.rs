use bson::{Document, oid::ObjectId};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateLiveStreamModel {
    pub name: String,
    pub thumbnail: String,
    pub stream_key: String,
    pub publisher_id: ObjectId,
}

/// Typed shorthand for the common `set_fields` documents. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateLiveStreamModel {
    pub name: Option<String>,
    pub thumbnail: Option<String>,
    pub stream_key: Option<String>,
    pub live_stream_status: Option<bool>,
}

impl UpdateLiveStreamModel {
    pub fn status(live: bool) -> Self {
        Self {
            live_stream_status: Some(live),
            ..Default::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn into_document(self) -> Document {
        let mut document = Document::new();

        if let Some(name) = self.name {
            document.insert("name", name);
        }
        if let Some(thumbnail) = self.thumbnail {
            document.insert("thumbnail", thumbnail);
        }
        if let Some(stream_key) = self.stream_key {
            document.insert("stream_key", stream_key);
        }
        if let Some(live_stream_status) = self.live_stream_status {
            document.insert("live_stream_status", live_stream_status);
        }

        document
    }
}

impl From<UpdateLiveStreamModel> for Document {
    fn from(update: UpdateLiveStreamModel) -> Self {
        update.into_document()
    }
}
