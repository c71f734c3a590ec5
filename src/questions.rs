use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::QuestionError;

/// A single answer option for a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub correct: bool,
}

/// A single quiz question with its answer options (order preserved)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub answers: Vec<Answer>,
}

impl Question {
    /// Index of the answer marked correct. Validation guarantees exactly one.
    pub fn correct_index(&self) -> Option<usize> {
        self.answers.iter().position(|a| a.correct)
    }
}

/// Immutable, ordered set of questions loaded once per process.
///
/// Loaded either from the embedded default data or from a JSON file on
/// disk. After construction the set is frozen for the rest of the process.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Load questions from a JSON file
    pub fn load(path: &Path) -> Result<Self, QuestionError> {
        let content = fs::read_to_string(path).map_err(|e| QuestionError::LoadFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        let bank = Self::from_json(&content, &path.display().to_string())?;
        tracing::info!(
            "Loaded {} questions from {}",
            bank.len(),
            path.display()
        );
        Ok(bank)
    }

    /// Load the compiled-in default question set
    pub fn load_embedded() -> Result<Self, QuestionError> {
        const EMBEDDED_QUESTIONS: &str = include_str!("../assets/questions.json");
        let bank = Self::from_json(EMBEDDED_QUESTIONS, "embedded questions")?;
        tracing::info!("Loaded {} embedded questions", bank.len());
        Ok(bank)
    }

    /// Decode and validate a JSON payload. Must be a non-empty array of
    /// well-formed questions.
    fn from_json(raw: &str, origin: &str) -> Result<Self, QuestionError> {
        let questions: Vec<Question> =
            serde_json::from_str(raw).map_err(|e| QuestionError::Malformed {
                origin: origin.to_string(),
                source: e,
            })?;

        if questions.is_empty() {
            return Err(QuestionError::Empty);
        }

        Self::from_questions(questions)
    }

    /// Build a bank from already-decoded questions, validating each one.
    ///
    /// Emptiness is only rejected on the load paths; an empty bank built
    /// here is caught again by the engine when a round is started.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, QuestionError> {
        for (index, question) in questions.iter().enumerate() {
            if question.prompt.trim().is_empty() {
                return Err(QuestionError::Invalid(format!(
                    "question {} has an empty prompt",
                    index + 1
                )));
            }

            if question.answers.is_empty() {
                return Err(QuestionError::Invalid(format!(
                    "question {} has no answers",
                    index + 1
                )));
            }

            let correct_count = question.answers.iter().filter(|a| a.correct).count();
            if correct_count != 1 {
                return Err(QuestionError::Invalid(format!(
                    "question {} has {} correct answers (expected exactly 1)",
                    index + 1,
                    correct_count
                )));
            }
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Highest score a round over this bank can reach
    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(prompt: &str, correct: usize, count: usize) -> Question {
        Question {
            prompt: prompt.to_string(),
            answers: (0..count)
                .map(|i| Answer {
                    text: format!("answer {}", i),
                    correct: i == correct,
                })
                .collect(),
        }
    }

    #[test]
    fn test_load_embedded() {
        let bank = QuestionBank::load_embedded().unwrap();
        assert!(!bank.is_empty());
        assert_eq!(bank.max_score() as usize, bank.len());

        // Every embedded question must pass the same validation as user data
        for q in bank.iter() {
            assert!(q.correct_index().is_some());
        }
    }

    #[test]
    fn test_from_json_valid() {
        let raw = r#"[
            {
                "question": "Which company manufactures the 911?",
                "answers": [
                    { "text": "Ferrari", "correct": false },
                    { "text": "Porsche", "correct": true }
                ]
            }
        ]"#;

        let bank = QuestionBank::from_json(raw, "test").unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.get(0).unwrap().prompt, "Which company manufactures the 911?");
        assert_eq!(bank.get(0).unwrap().correct_index(), Some(1));
    }

    #[test]
    fn test_from_json_rejects_empty_array() {
        let err = QuestionBank::from_json("[]", "test").unwrap_err();
        assert!(matches!(err, QuestionError::Empty));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let err = QuestionBank::from_json("{ not json", "test").unwrap_err();
        assert!(matches!(err, QuestionError::Malformed { .. }));
    }

    #[test]
    fn test_rejects_question_without_answers() {
        let questions = vec![Question {
            prompt: "orphan".to_string(),
            answers: Vec::new(),
        }];

        let err = QuestionBank::from_questions(questions).unwrap_err();
        assert!(matches!(err, QuestionError::Invalid(_)));
        assert!(err.to_string().contains("no answers"));
    }

    #[test]
    fn test_rejects_question_with_empty_prompt() {
        let questions = vec![question("   ", 0, 2)];
        let err = QuestionBank::from_questions(questions).unwrap_err();
        assert!(err.to_string().contains("empty prompt"));
    }

    #[test]
    fn test_rejects_multiple_correct_answers() {
        let mut q = question("too many", 0, 3);
        q.answers[2].correct = true;

        let err = QuestionBank::from_questions(vec![q]).unwrap_err();
        assert!(err.to_string().contains("2 correct answers"));
    }

    #[test]
    fn test_rejects_zero_correct_answers() {
        let mut q = question("none right", 0, 3);
        q.answers[0].correct = false;

        let err = QuestionBank::from_questions(vec![q]).unwrap_err();
        assert!(err.to_string().contains("0 correct answers"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = QuestionBank::load(Path::new("/nonexistent/questions.json")).unwrap_err();
        assert!(matches!(err, QuestionError::LoadFailed { .. }));
    }
}
