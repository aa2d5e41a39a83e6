use bson::oid::ObjectId;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by live stream repositories.
///
/// Every variant carries the operation that failed and the record it targeted
/// so the calling layer can report something actionable without extra context.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A single-target operation matched no record.
    #[error("{operation}: no live stream with {field} = {value}")]
    NotFound {
        operation: &'static str,
        field: &'static str,
        value: String,
    },

    /// The database call itself failed.
    #[error("{operation} ({target}): database request failed: {source}")]
    Persistence {
        operation: &'static str,
        target: String,
        #[source]
        source: mongodb::error::Error,
    },

    /// A matched document does not fit the live stream shape.
    #[error("{operation} ({target}): stored live stream could not be decoded: {source}")]
    Decode {
        operation: &'static str,
        target: String,
        #[source]
        source: bson::de::Error,
    },

    /// An update matched its record but did not modify exactly one document.
    #[error("{operation}: expected live stream {id} to be modified once, got {modified}")]
    UnexpectedModificationCount {
        operation: &'static str,
        id: ObjectId,
        modified: u64,
    },
}

impl RepositoryError {
    pub fn not_found<V: ToString>(operation: &'static str, field: &'static str, value: V) -> Self {
        Self::NotFound {
            operation,
            field,
            value: value.to_string(),
        }
    }

    pub fn persistence<T: ToString>(
        operation: &'static str,
        target: T,
    ) -> impl FnOnce(mongodb::error::Error) -> Self {
        let target = target.to_string();
        move |source| Self::Persistence {
            operation,
            target,
            source,
        }
    }

    pub fn decode<T: ToString>(
        operation: &'static str,
        target: T,
    ) -> impl FnOnce(bson::de::Error) -> Self {
        let target = target.to_string();
        move |source| Self::Decode {
            operation,
            target,
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_operation_and_target() {
        let err = RepositoryError::not_found("find_by_name", "name", "does-not-exist");

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "find_by_name: no live stream with name = does-not-exist"
        );
    }

    #[test]
    fn unexpected_modification_count_reports_the_count() {
        let id = ObjectId::new();
        let err = RepositoryError::UnexpectedModificationCount {
            operation: "set_fields",
            id,
            modified: 0,
        };

        assert!(!err.is_not_found());
        let message = err.to_string();
        assert!(message.contains("set_fields"), "got: {message}");
        assert!(message.contains(&id.to_hex()), "got: {message}");
        assert!(message.ends_with("got 0"), "got: {message}");
    }

    #[test]
    fn decode_errors_keep_their_source() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Named {
            name: String,
        }

        let source = bson::from_document::<Named>(bson::doc! {}).unwrap_err();
        let id = ObjectId::new();
        let err = RepositoryError::decode("find_by_id", format!("_id = {id}"))(source);

        assert!(matches!(err, RepositoryError::Decode { operation: "find_by_id", .. }));
        assert!(std::error::Error::source(&err).is_some());
        let message = err.to_string();
        assert!(message.starts_with("find_by_id (_id = "), "got: {message}");
        assert!(message.contains(&id.to_hex()), "got: {message}");
    }
}
