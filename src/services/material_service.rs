use std::sync::Arc;

use chrono::Utc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{learning_material::storage_path, LearningMaterial},
    repositories::LearningMaterialRepository,
    storage::MaterialStorage,
};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const PDF_MAGIC: &[u8] = b"%PDF-";

pub struct MaterialService {
    repository: Arc<dyn LearningMaterialRepository>,
    storage: Arc<dyn MaterialStorage>,
    max_upload_bytes: usize,
    public_base_url: String,
}

impl MaterialService {
    pub fn new(
        repository: Arc<dyn LearningMaterialRepository>,
        storage: Arc<dyn MaterialStorage>,
        max_upload_bytes: usize,
        public_base_url: &str,
    ) -> Self {
        Self {
            repository,
            storage,
            max_upload_bytes,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/files/{}", self.public_base_url, file_path)
    }

    fn check_upload(&self, name: &str, content_type: Option<&str>, body: &[u8]) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::ValidationError(
                "File name is required".to_string(),
            ));
        }

        let is_pdf_type = content_type
            .map(|ct| ct.split(';').next().unwrap_or_default().trim())
            .is_some_and(|ct| ct.eq_ignore_ascii_case(PDF_CONTENT_TYPE));
        if !is_pdf_type {
            return Err(AppError::ValidationError(
                "Only PDF files are accepted".to_string(),
            ));
        }

        if body.is_empty() {
            return Err(AppError::ValidationError("File is empty".to_string()));
        }

        if body.len() > self.max_upload_bytes {
            return Err(AppError::ValidationError(format!(
                "File exceeds the {} byte upload limit",
                self.max_upload_bytes
            )));
        }

        if !body.starts_with(PDF_MAGIC) {
            return Err(AppError::ValidationError(
                "File content is not a PDF document".to_string(),
            ));
        }

        Ok(())
    }

    /// Stores the PDF and records it for `user_id`.
    ///
    /// The stored object is removed again if the record cannot be written.
    pub async fn upload(
        &self,
        user_id: &str,
        name: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> AppResult<LearningMaterial> {
        self.check_upload(name, content_type, &body)?;

        let name = name.trim();
        let file_path = storage_path(user_id, name, Utc::now());
        let size = body.len() as i64;

        self.storage.put_object(&file_path, body).await?;

        let material = LearningMaterial::new_pdf(
            user_id,
            name,
            size,
            &file_path,
            &self.file_url(&file_path),
        );

        match self.repository.create(material).await {
            Ok(material) => {
                log::info!("Stored material {} for user {}", material.id, user_id);
                Ok(material)
            }
            Err(e) => {
                log::error!("Failed to record material at {}: {}", file_path, e);
                if let Err(cleanup) = self.storage.delete_object(&file_path).await {
                    log::warn!(
                        "Failed to remove orphaned object {}: {}",
                        file_path,
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    pub async fn list(&self, user_id: &str) -> AppResult<Vec<LearningMaterial>> {
        self.repository.list_by_user(user_id).await
    }

    pub async fn get(&self, id: &str, user_id: &str) -> AppResult<LearningMaterial> {
        let material = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Material with id '{}' not found", id)))?;

        if !material.is_owned_by(user_id) {
            return Err(AppError::Forbidden(
                "You do not own this material".to_string(),
            ));
        }
        Ok(material)
    }

    /// Deletes the backing object first, then the record.
    pub async fn delete(&self, id: &str, user_id: &str) -> AppResult<()> {
        let material = self.get(id, user_id).await?;

        match self.storage.delete_object(&material.file_path).await {
            Ok(()) => {}
            Err(AppError::NotFound(_)) => {
                log::warn!("Object {} was already gone", material.file_path);
            }
            Err(e) => return Err(e),
        }

        self.repository.delete(&material.id).await?;
        log::info!("Deleted material {} for user {}", material.id, user_id);
        Ok(())
    }

    pub async fn open_file(&self, file_path: &str) -> AppResult<Vec<u8>> {
        self.storage.get_object(file_path).await
    }
}
