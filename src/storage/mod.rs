pub mod gridfs;

use async_trait::async_trait;

use crate::errors::AppResult;

pub use gridfs::GridFsMaterialStorage;

/// Object storage for uploaded learning materials, keyed by storage path.
#[async_trait]
pub trait MaterialStorage: Send + Sync + 'static {
    /// Stores `data` under `path`. Paths are unique per upload.
    async fn put_object(&self, path: &str, data: Vec<u8>) -> AppResult<()>;

    async fn get_object(&self, path: &str) -> AppResult<Vec<u8>>;

    async fn delete_object(&self, path: &str) -> AppResult<()>;
}
