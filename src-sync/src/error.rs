use thiserror::Error;

/// Failure of a single call against the remote data service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Response is missing `{0}`")]
    MissingData(&'static str),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Failed synchronizer operation, tagged with the remote call that failed.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Fetch failed: {0}")]
    Fetch(#[source] RemoteError),

    #[error("Create failed: {0}")]
    Create(#[source] RemoteError),

    #[error("Delete failed: {0}")]
    Delete(#[source] RemoteError),

    #[error("Subscription failed: {0}")]
    Subscription(#[source] RemoteError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No GraphQL endpoint configured")]
    MissingEndpoint,

    #[error("Authentication mode {0} needs credentials")]
    MissingCredentials(&'static str),
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;
pub type SyncResult<T> = std::result::Result<T, SyncError>;
