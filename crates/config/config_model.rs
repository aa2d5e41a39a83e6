#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub database: Database,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub uri: String,
    /// Falls back to the default database named in `uri`.
    pub name: Option<String>,
    pub live_stream_collection: String,
}
