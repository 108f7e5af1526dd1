#[cfg(test)]
pub mod in_memory {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
    };

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::{AppError, AppResult},
        models::domain::{LearningMaterial, PodcastNote, Quiz, QuizAttempt},
        repositories::{
            LearningMaterialRepository, PodcastNoteRepository, QuizAttemptRepository,
            QuizRepository,
        },
        storage::MaterialStorage,
    };

    fn write_failure() -> AppError {
        AppError::DatabaseError("simulated write failure".to_string())
    }

    fn newest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
    where
        F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
    {
        items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
        items
    }

    #[derive(Default)]
    pub struct InMemoryMaterialRepository {
        materials: RwLock<HashMap<String, LearningMaterial>>,
        fail_writes: AtomicBool,
    }

    impl InMemoryMaterialRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(materials: Vec<LearningMaterial>) -> Self {
            Self {
                materials: RwLock::new(materials.into_iter().map(|m| (m.id.clone(), m)).collect()),
                fail_writes: AtomicBool::new(false),
            }
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl LearningMaterialRepository for InMemoryMaterialRepository {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<LearningMaterial>> {
            Ok(self.materials.read().await.get(id).cloned())
        }

        async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<LearningMaterial>> {
            let items = self
                .materials
                .read()
                .await
                .values()
                .filter(|m| m.user_id == user_id)
                .cloned()
                .collect();
            Ok(newest_first(items, |m| m.created_at))
        }

        async fn create(&self, material: LearningMaterial) -> AppResult<LearningMaterial> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure());
            }
            self.materials
                .write()
                .await
                .insert(material.id.clone(), material.clone());
            Ok(material)
        }

        async fn delete(&self, id: &str) -> AppResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure());
            }
            self.materials
                .write()
                .await
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| AppError::NotFound(format!("Learning material '{}' not found", id)))
        }
    }

    #[derive(Default)]
    pub struct InMemoryStorage {
        objects: RwLock<HashMap<String, Vec<u8>>>,
        fail_deletes: AtomicBool,
    }

    impl InMemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn insert(&self, path: &str, data: Vec<u8>) {
            self.objects.write().await.insert(path.to_string(), data);
        }

        pub async fn contains(&self, path: &str) -> bool {
            self.objects.read().await.contains_key(path)
        }

        pub async fn object_count(&self) -> usize {
            self.objects.read().await.len()
        }

        pub fn fail_deletes(&self, fail: bool) {
            self.fail_deletes.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl MaterialStorage for InMemoryStorage {
        async fn put_object(&self, path: &str, data: Vec<u8>) -> AppResult<()> {
            self.insert(path, data).await;
            Ok(())
        }

        async fn get_object(&self, path: &str) -> AppResult<Vec<u8>> {
            self.objects
                .read()
                .await
                .get(path)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("Stored file '{}' not found", path)))
        }

        async fn delete_object(&self, path: &str) -> AppResult<()> {
            if self.fail_deletes.load(Ordering::SeqCst) {
                return Err(write_failure());
            }
            self.objects
                .write()
                .await
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| AppError::NotFound(format!("Stored file '{}' not found", path)))
        }
    }

    #[derive(Default)]
    pub struct InMemoryQuizRepository {
        quizzes: RwLock<HashMap<String, Quiz>>,
        fail_writes: AtomicBool,
    }

    impl InMemoryQuizRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(quizzes: Vec<Quiz>) -> Self {
            Self {
                quizzes: RwLock::new(quizzes.into_iter().map(|q| (q.id.clone(), q)).collect()),
                fail_writes: AtomicBool::new(false),
            }
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl QuizRepository for InMemoryQuizRepository {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
            Ok(self.quizzes.read().await.get(id).cloned())
        }

        async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
            let items = self
                .quizzes
                .read()
                .await
                .values()
                .filter(|q| q.user_id == user_id)
                .cloned()
                .collect();
            Ok(newest_first(items, |q| q.created_at))
        }

        async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure());
            }
            self.quizzes
                .write()
                .await
                .insert(quiz.id.clone(), quiz.clone());
            Ok(quiz)
        }

        async fn update_score(&self, id: &str, score: i32) -> AppResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure());
            }
            let mut quizzes = self.quizzes.write().await;
            let quiz = quizzes
                .get_mut(id)
                .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;
            quiz.score = Some(score);
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct InMemoryQuizAttemptRepository {
        attempts: RwLock<Vec<QuizAttempt>>,
        fail_writes: AtomicBool,
    }

    impl InMemoryQuizAttemptRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub async fn all(&self) -> Vec<QuizAttempt> {
            self.attempts.read().await.clone()
        }
    }

    #[async_trait]
    impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
        async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure());
            }
            self.attempts.write().await.push(attempt.clone());
            Ok(attempt)
        }

        async fn find_by_user_and_quiz(
            &self,
            user_id: &str,
            quiz_id: &str,
        ) -> AppResult<Vec<QuizAttempt>> {
            let items = self
                .attempts
                .read()
                .await
                .iter()
                .filter(|a| a.user_id == user_id && a.quiz_id == quiz_id)
                .cloned()
                .collect();
            Ok(newest_first(items, |a| a.created_at))
        }
    }

    #[derive(Default)]
    pub struct InMemoryPodcastNoteRepository {
        notes: RwLock<HashMap<String, PodcastNote>>,
        fail_writes: AtomicBool,
    }

    impl InMemoryPodcastNoteRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl PodcastNoteRepository for InMemoryPodcastNoteRepository {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<PodcastNote>> {
            Ok(self.notes.read().await.get(id).cloned())
        }

        async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<PodcastNote>> {
            let items = self
                .notes
                .read()
                .await
                .values()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect();
            Ok(newest_first(items, |n| n.created_at))
        }

        async fn create(&self, note: PodcastNote) -> AppResult<PodcastNote> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(write_failure());
            }
            self.notes
                .write()
                .await
                .insert(note.id.clone(), note.clone());
            Ok(note)
        }
    }

    /// Shared handles to the fakes behind a test `AppState`.
    #[derive(Default, Clone)]
    pub struct Fakes {
        pub materials: Arc<InMemoryMaterialRepository>,
        pub storage: Arc<InMemoryStorage>,
        pub quizzes: Arc<InMemoryQuizRepository>,
        pub attempts: Arc<InMemoryQuizAttemptRepository>,
        pub podcasts: Arc<InMemoryPodcastNoteRepository>,
    }
}

#[cfg(test)]
pub mod fixtures {
    use serde_json::json;

    use crate::{
        models::domain::{LearningMaterial, Quiz, QuizQuestion},
        services::playnote_client::PlayNoteResponse,
    };

    /// Smallest byte string that passes the PDF checks.
    pub fn pdf_bytes() -> Vec<u8> {
        b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n%%EOF\n".to_vec()
    }

    pub fn test_material(user_id: &str) -> LearningMaterial {
        let path = format!("{}/1700000000000-notes.pdf", user_id);
        LearningMaterial::new_pdf(
            user_id,
            "notes.pdf",
            pdf_bytes().len() as i64,
            &path,
            &format!("http://localhost:8080/files/{}", path),
        )
    }

    /// A quiz whose every question has the correct answer "Right answer".
    pub fn test_quiz(user_id: &str, question_count: usize) -> Quiz {
        let questions = (0..question_count)
            .map(|i| {
                QuizQuestion::new(
                    &format!("Question {}?", i + 1),
                    &["Right answer", "Wrong answer"],
                    "Right answer",
                )
            })
            .collect();
        Quiz::new(user_id, "Test quiz", questions)
    }

    pub fn playnote_response(id: &str) -> PlayNoteResponse {
        PlayNoteResponse {
            id: id.to_string(),
            owner_id: "playnote-owner".to_string(),
            name: "Lecture notes".to_string(),
            source_file_urls: vec!["https://files.example.com/a.pdf".to_string()],
            synthesis_style: "podcast".to_string(),
            voice1: json!("Angelo"),
            voice2: json!("Deedee"),
            requested_at: Some("2024-05-01T10:00:00Z".to_string()),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use super::in_memory::Fakes;
    use crate::{
        app_state::{AppState, Backends},
        auth::JwtService,
        config::Config,
        services::{model_service::MockDocumentModel, playnote_client::MockPodcastSynthesizer},
    };

    pub fn jwt_service() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, &config.jwt_audience)
    }

    pub fn bearer(user_id: &str) -> (&'static str, String) {
        let token = jwt_service()
            .create_token(user_id, 1)
            .expect("test token should sign");
        ("Authorization", format!("Bearer {}", token))
    }

    pub fn test_state(
        fakes: &Fakes,
        synthesizer: MockPodcastSynthesizer,
        model: MockDocumentModel,
    ) -> AppState {
        let backends = Backends {
            material_repository: fakes.materials.clone(),
            storage: fakes.storage.clone(),
            quiz_repository: fakes.quizzes.clone(),
            attempt_repository: fakes.attempts.clone(),
            podcast_repository: fakes.podcasts.clone(),
            synthesizer: Arc::new(synthesizer),
            model: Arc::new(model),
        };
        AppState::from_backends(Config::test_config(), backends, None)
    }

    pub fn default_state(fakes: &Fakes) -> AppState {
        test_state(fakes, MockPodcastSynthesizer::new(), MockDocumentModel::new())
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{fixtures::*, in_memory::*};
    use crate::repositories::QuizRepository;

    #[test]
    fn test_fixture_quiz_has_requested_questions() {
        let quiz = test_quiz("user-1", 3);
        assert_eq!(quiz.question_count(), 3);
        assert_eq!(quiz.questions[0].correct_answer, "Right answer");
    }

    #[test]
    fn test_fixture_pdf_has_magic_bytes() {
        assert!(pdf_bytes().starts_with(b"%PDF-"));
    }

    #[actix_rt::test]
    async fn test_in_memory_quizzes_list_newest_first() {
        let older = test_quiz("user-1", 1);
        let mut newer = test_quiz("user-1", 1);
        newer.created_at = older.created_at + chrono::Duration::seconds(5);
        let repository = InMemoryQuizRepository::with(vec![older.clone(), newer.clone()]);

        let listed = repository.list_by_user("user-1").await.unwrap();

        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);
    }
}
