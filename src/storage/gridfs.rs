use async_trait::async_trait;
use futures::io::{AsyncReadExt, AsyncWriteExt};
use mongodb::{
    bson::Bson,
    error::{Error as MongoError, ErrorKind, GridFsErrorKind},
    gridfs::GridFsBucket,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    storage::MaterialStorage,
};

pub const MATERIALS_BUCKET: &str = "learning_materials";

/// GridFS bucket where each file's `_id` is its storage path.
pub struct GridFsMaterialStorage {
    bucket: GridFsBucket,
}

impl GridFsMaterialStorage {
    pub fn new(db: &Database) -> Self {
        Self {
            bucket: db.gridfs_bucket(MATERIALS_BUCKET),
        }
    }
}

fn map_gridfs_error(path: &str, err: MongoError) -> AppError {
    match *err.kind {
        ErrorKind::GridFs(GridFsErrorKind::FileNotFound { .. }) => {
            AppError::NotFound(format!("Stored file '{}' not found", path))
        }
        _ => AppError::DatabaseError(err.to_string()),
    }
}

fn map_io_error(path: &str, err: std::io::Error) -> AppError {
    AppError::DatabaseError(format!("Storage I/O error for '{}': {}", path, err))
}

#[async_trait]
impl MaterialStorage for GridFsMaterialStorage {
    async fn put_object(&self, path: &str, data: Vec<u8>) -> AppResult<()> {
        let mut upload = self
            .bucket
            .open_upload_stream(path)
            .id(Bson::String(path.to_string()))
            .await?;

        if let Err(err) = upload.write_all(&data).await {
            if let Err(abort_err) = upload.abort().await {
                log::warn!("Failed to abort upload of '{}': {}", path, abort_err);
            }
            return Err(map_io_error(path, err));
        }
        upload.close().await.map_err(|e| map_io_error(path, e))?;

        log::info!("Stored object '{}' ({} bytes)", path, data.len());
        Ok(())
    }

    async fn get_object(&self, path: &str) -> AppResult<Vec<u8>> {
        let mut download = self
            .bucket
            .open_download_stream(Bson::String(path.to_string()))
            .await
            .map_err(|e| map_gridfs_error(path, e))?;

        let mut data = Vec::new();
        download
            .read_to_end(&mut data)
            .await
            .map_err(|e| map_io_error(path, e))?;
        Ok(data)
    }

    async fn delete_object(&self, path: &str) -> AppResult<()> {
        self.bucket
            .delete(Bson::String(path.to_string()))
            .await
            .map_err(|e| map_gridfs_error(path, e))?;

        log::info!("Deleted object '{}'", path);
        Ok(())
    }
}
