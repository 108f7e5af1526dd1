use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::LearningMaterial,
};

#[async_trait]
pub trait LearningMaterialRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<LearningMaterial>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<LearningMaterial>>;
    async fn create(&self, material: LearningMaterial) -> AppResult<LearningMaterial>;
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct MongoLearningMaterialRepository {
    collection: Collection<LearningMaterial>,
}

impl MongoLearningMaterialRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("learning_materials");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for learning_materials collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let path_index = IndexModel::builder()
            .keys(doc! { "file_path": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("file_path_unique".to_string())
                    .build(),
            )
            .build();

        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_created".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(path_index).await?;
        self.collection.create_index(user_index).await?;

        log::info!("Successfully created indexes for learning_materials collection");
        Ok(())
    }
}

#[async_trait]
impl LearningMaterialRepository for MongoLearningMaterialRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<LearningMaterial>> {
        let material = self.collection.find_one(doc! { "id": id }).await?;
        Ok(material)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<LearningMaterial>> {
        let materials = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(materials)
    }

    async fn create(&self, material: LearningMaterial) -> AppResult<LearningMaterial> {
        self.collection.insert_one(&material).await?;
        Ok(material)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Learning material with id '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
