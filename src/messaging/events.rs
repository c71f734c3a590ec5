/// Event types published by the quiz engine
///
/// Events represent things that have happened (past tense).
/// They are broadcast to all subscribers.
use crate::engine::ResultTier;
use crate::stats::Stats;

/// Quiz engine events
#[derive(Debug, Clone)]
pub enum QuizEvent {
    /// The question bank finished loading
    QuestionsLoaded { total: usize },

    /// A new round began
    RoundStarted { total: usize },

    /// A question is awaiting an answer
    QuestionPresented { index: usize, total: usize },

    /// A submitted answer was judged; the engine is now locked for the
    /// reveal delay
    AnswerJudged {
        question_index: usize,
        answer_index: usize,
        correct: bool,
        score: u32,
    },

    /// The round finished and the final score is in
    RoundFinished {
        score: u32,
        max_score: u32,
        tier: ResultTier,
    },

    /// Lifetime stats were updated on disk
    StatsRecorded { stats: Stats },
}

impl QuizEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            QuizEvent::QuestionsLoaded { total } => {
                format!("{} questions loaded", total)
            }
            QuizEvent::RoundStarted { total } => {
                format!("Round started with {} questions", total)
            }
            QuizEvent::QuestionPresented { index, total } => {
                format!("Question {}/{}", index + 1, total)
            }
            QuizEvent::AnswerJudged { correct, score, .. } => {
                if *correct {
                    format!("Correct, score is now {}", score)
                } else {
                    format!("Incorrect, score stays at {}", score)
                }
            }
            QuizEvent::RoundFinished {
                score, max_score, ..
            } => {
                format!("Round finished {}/{}", score, max_score)
            }
            QuizEvent::StatsRecorded { stats } => {
                format!(
                    "Stats updated: best {} over {} attempts",
                    stats.best_score, stats.attempts
                )
            }
        }
    }
}
