pub mod learning_material_repository;
pub mod podcast_note_repository;
pub mod quiz_attempt_repository;
pub mod quiz_repository;

pub use learning_material_repository::{
    LearningMaterialRepository, MongoLearningMaterialRepository,
};
pub use podcast_note_repository::{MongoPodcastNoteRepository, PodcastNoteRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
