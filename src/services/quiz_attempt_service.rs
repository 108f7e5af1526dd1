use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{QuestionResponse, QuizQuestion};

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.,/#!$%^&*;:{}=\-_`~()]").expect("PUNCTUATION is a valid regex pattern")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE is a valid regex pattern"));

static NEGATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(not|cannot|doesn'?t|don'?t|won'?t|isn'?t|aren'?t|can'?t|wasn'?t)\b")
        .expect("NEGATION is a valid regex pattern")
});

static FILLER_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(a|an|the|is|are|was|were|will|be)\b")
        .expect("FILLER_WORDS is a valid regex pattern")
});

pub struct QuizAttemptService;

impl QuizAttemptService {
    /// Lower-cases, strips punctuation and collapses whitespace.
    pub fn normalize_answer(answer: &str) -> String {
        let lowered = answer.to_lowercase();
        let stripped = PUNCTUATION.replace_all(&lowered, "");
        WHITESPACE.replace_all(&stripped, " ").trim().to_string()
    }

    /// Compares a submitted answer against the reference answer.
    ///
    /// Exact match after normalization wins. Otherwise answers that disagree
    /// on negation are never equal, and the remaining candidates are compared
    /// once more with articles and auxiliary verbs removed.
    pub fn answers_match(user_answer: &str, correct_answer: &str) -> bool {
        let normalized_user = Self::normalize_answer(user_answer);
        let normalized_correct = Self::normalize_answer(correct_answer);

        if normalized_user == normalized_correct {
            return true;
        }

        if NEGATION.is_match(&normalized_user) != NEGATION.is_match(&normalized_correct) {
            return false;
        }

        Self::strip_filler_words(&normalized_user) == Self::strip_filler_words(&normalized_correct)
    }

    /// Removes filler words in place. The spaces around a removed word are
    /// kept, so only fillers at either end can be dropped without effect.
    fn strip_filler_words(normalized: &str) -> String {
        FILLER_WORDS.replace_all(normalized, "").trim().to_string()
    }

    /// `round(100 * correct / total)` with halves rounded up.
    pub fn score_percentage(correct: usize, total: usize) -> i32 {
        if total == 0 {
            return 0;
        }
        ((200 * correct + total) / (2 * total)) as i32
    }

    /// Grades one answer for the question at `question_index`.
    pub fn grade_response(
        question_index: usize,
        question: &QuizQuestion,
        selected_answer: &str,
    ) -> QuestionResponse {
        QuestionResponse {
            question_index: question_index as i32,
            question: question.question.clone(),
            selected_answer: selected_answer.to_string(),
            correct_answer: question.correct_answer.clone(),
            is_correct: Self::answers_match(selected_answer, &question.correct_answer),
        }
    }

    pub fn score_responses(responses: &[QuestionResponse], total_questions: usize) -> i32 {
        let correct = responses.iter().filter(|r| r.is_correct).count();
        Self::score_percentage(correct, total_questions)
    }
}
