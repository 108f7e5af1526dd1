pub mod learning_material;
pub mod podcast_note;
pub mod quiz;
pub mod quiz_attempt;
pub mod quiz_question;
pub mod quiz_session;
pub use learning_material::LearningMaterial;
pub use podcast_note::{PodcastNote, PodcastStatus};
pub use quiz::Quiz;
pub use quiz_attempt::{QuestionResponse, QuizAttempt};
pub use quiz_question::QuizQuestion;
pub use quiz_session::{QuizSession, QuizSessionState};
