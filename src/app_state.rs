use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        LearningMaterialRepository, MongoLearningMaterialRepository, MongoPodcastNoteRepository,
        MongoQuizAttemptRepository, MongoQuizRepository, PodcastNoteRepository,
        QuizAttemptRepository, QuizRepository,
    },
    services::{
        assistant_service::AssistantService,
        material_service::MaterialService,
        model_service::{DocumentModel, OpenAiDocumentModel},
        playnote_client::{PlayNoteClient, PodcastSynthesizer},
        podcast_service::PodcastService,
        quiz_service::QuizService,
        quiz_session_service::QuizSessionService,
    },
    storage::{GridFsMaterialStorage, MaterialStorage},
};

/// Everything the services talk to outside the process.
pub struct Backends {
    pub material_repository: Arc<dyn LearningMaterialRepository>,
    pub storage: Arc<dyn MaterialStorage>,
    pub quiz_repository: Arc<dyn QuizRepository>,
    pub attempt_repository: Arc<dyn QuizAttemptRepository>,
    pub podcast_repository: Arc<dyn PodcastNoteRepository>,
    pub synthesizer: Arc<dyn PodcastSynthesizer>,
    pub model: Arc<dyn DocumentModel>,
}

#[derive(Clone)]
pub struct AppState {
    pub material_service: Arc<MaterialService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_session_service: Arc<QuizSessionService>,
    pub podcast_service: Arc<PodcastService>,
    pub assistant_service: Arc<AssistantService>,
    pub model: Arc<dyn DocumentModel>,
    pub config: Arc<Config>,
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let material_repository = Arc::new(MongoLearningMaterialRepository::new(&db));
        material_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let podcast_repository = Arc::new(MongoPodcastNoteRepository::new(&db));
        podcast_repository.ensure_indexes().await?;

        let http = reqwest::Client::new();

        let backends = Backends {
            material_repository,
            storage: Arc::new(GridFsMaterialStorage::new(&db)),
            quiz_repository,
            attempt_repository,
            podcast_repository,
            synthesizer: Arc::new(PlayNoteClient::new(http, &config)),
            model: Arc::new(OpenAiDocumentModel::new(&config)),
        };

        Ok(Self::from_backends(config, backends, Some(db)))
    }

    pub fn from_backends(config: Config, backends: Backends, db: Option<Database>) -> Self {
        let material_service = Arc::new(MaterialService::new(
            backends.material_repository,
            backends.storage,
            config.max_upload_bytes,
            &config.public_base_url,
        ));
        let quiz_service = Arc::new(QuizService::new(
            backends.quiz_repository.clone(),
            backends.attempt_repository.clone(),
            backends.model.clone(),
        ));
        let quiz_session_service = Arc::new(QuizSessionService::new(
            backends.quiz_repository,
            backends.attempt_repository,
        ));
        let podcast_service = Arc::new(PodcastService::new(
            backends.podcast_repository,
            backends.synthesizer,
        ));
        let assistant_service = Arc::new(AssistantService::new(&config.web_embed_id));

        Self {
            material_service,
            quiz_service,
            quiz_session_service,
            podcast_service,
            assistant_service,
            model: backends.model,
            config: Arc::new(config),
            db,
        }
    }
}
