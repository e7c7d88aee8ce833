use thiserror::Error;

/// failures at the persistence boundary. the store absorbs these
/// (best-effort save, decode-as-empty); they are surfaced only to
/// `Storage` implementors and the log.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value did not decode: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;
