#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("unknown storage '{0}' (expected \"memory\" or \"hbase\")")]
    UnknownStorage(String),

    #[error("store: {0}")]
    Store(#[from] quake_api::StoreError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
