use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::PodcastNote};

#[async_trait]
pub trait PodcastNoteRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<PodcastNote>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<PodcastNote>>;
    async fn create(&self, note: PodcastNote) -> AppResult<PodcastNote>;
}

pub struct MongoPodcastNoteRepository {
    collection: Collection<PodcastNote>,
}

impl MongoPodcastNoteRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("podcast_notes");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for podcast_notes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
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
        self.collection.create_index(user_index).await?;

        log::info!("Successfully created indexes for podcast_notes collection");
        Ok(())
    }
}

#[async_trait]
impl PodcastNoteRepository for MongoPodcastNoteRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<PodcastNote>> {
        let note = self.collection.find_one(doc! { "id": id }).await?;
        Ok(note)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<PodcastNote>> {
        let notes = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(notes)
    }

    async fn create(&self, note: PodcastNote) -> AppResult<PodcastNote> {
        self.collection.insert_one(&note).await?;
        Ok(note)
    }
}
