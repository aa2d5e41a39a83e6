use anyhow::{Context, Result};

use super::config_model::{Database, DotEnvyConfig};
use crate::infra::db::repositories::live_streams::DEFAULT_LIVE_STREAM_COLLECTION;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    from_lookup(|key| std::env::var(key).ok())
}

fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let database = Database {
        uri: non_empty("MONGODB_URI").context("MONGODB_URI is invalid")?,
        name: non_empty("MONGODB_DATABASE"),
        live_stream_collection: non_empty("LIVE_STREAM_COLLECTION")
            .unwrap_or_else(|| DEFAULT_LIVE_STREAM_COLLECTION.to_string()),
    };

    Ok(DotEnvyConfig { database })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_uri_is_set() {
        let config = from_lookup(lookup_from(&[("MONGODB_URI", "mongodb://localhost:27017/live")]))
            .unwrap();

        assert_eq!(config.database.uri, "mongodb://localhost:27017/live");
        assert_eq!(config.database.name, None);
        assert_eq!(config.database.live_stream_collection, "livestreams");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = from_lookup(lookup_from(&[
            ("MONGODB_URI", "mongodb://localhost:27017"),
            ("MONGODB_DATABASE", "livestream"),
            ("LIVE_STREAM_COLLECTION", "livestreams_staging"),
        ]))
        .unwrap();

        assert_eq!(config.database.name.as_deref(), Some("livestream"));
        assert_eq!(config.database.live_stream_collection, "livestreams_staging");
    }

    #[test]
    fn missing_or_blank_uri_is_rejected() {
        for vars in [vec![], vec![("MONGODB_URI", "  ")]] {
            let err = from_lookup(lookup_from(&vars)).unwrap_err().to_string();
            assert!(err.contains("MONGODB_URI"), "got: {err}");
        }
    }
}
