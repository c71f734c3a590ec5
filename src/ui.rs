/// Terminal renderer for engine events.
///
/// Subscribes to the event bus and redraws on every state change. All
/// quiz logic lives in the engine; this module only prints.
use std::sync::Arc;

use crate::engine::ResultTier;
use crate::messaging::QuizEvent;
use crate::questions::QuestionBank;
use crate::stats::Stats;

const PROGRESS_CELLS: usize = 20;

pub struct ConsoleUi {
    bank: Arc<QuestionBank>,
    car: String,
}

impl ConsoleUi {
    pub fn new(bank: Arc<QuestionBank>, car: String) -> Self {
        Self { bank, car }
    }

    /// Render one engine event
    pub fn handle_event(&self, event: &QuizEvent) {
        match event {
            QuizEvent::QuestionsLoaded { .. } | QuizEvent::RoundStarted { .. } => {}
            QuizEvent::QuestionPresented { index, total } => {
                self.render_question(*index, *total);
            }
            QuizEvent::AnswerJudged {
                question_index,
                correct,
                score,
                ..
            } => {
                self.render_judgement(*question_index, *correct, *score);
            }
            QuizEvent::RoundFinished {
                score,
                max_score,
                tier,
            } => {
                self.render_results(*score, *max_score, *tier);
            }
            QuizEvent::StatsRecorded { stats } => {
                println!(
                    "  Best score: {}   Attempts: {}",
                    stats.best_score, stats.attempts
                );
            }
        }
    }

    /// The pre-round screen: lifetime stats and the start prompt
    pub fn render_start_screen(&self, stats: Stats) {
        println!("\n===========================================");
        println!("  {} Car Trivia", self.car);
        println!("===========================================");
        println!("  Questions: {}", self.bank.len());
        println!("  Max score: {}", self.bank.max_score());
        println!("  Best score: {}", stats.best_score);
        println!("  Attempts: {}", stats.attempts);
        println!("===========================================");
    }

    fn render_question(&self, index: usize, total: usize) {
        let Some(question) = self.bank.get(index) else {
            return;
        };

        let fraction = index as f64 / total as f64;
        println!("\n{}", self.progress_line(fraction, index, total));
        println!("\nQ{}: {}", index + 1, question.prompt);
        for (i, answer) in question.answers.iter().enumerate() {
            println!("  {}. {}", i + 1, answer.text);
        }
    }

    fn render_judgement(&self, question_index: usize, correct: bool, score: u32) {
        if correct {
            println!("\n  ✓ Correct!");
        } else {
            let right = self
                .bank
                .get(question_index)
                .and_then(|q| q.correct_index().and_then(|i| q.answers.get(i)))
                .map(|a| a.text.as_str())
                .unwrap_or("?");
            println!("\n  ✗ Wrong! The right answer was: {}", right);
        }

        let total = self.bank.len();
        let fraction = (question_index + 1) as f64 / total as f64;
        println!("  {} Score: {}", self.car, score);
        println!("  {}", self.progress_bar(fraction));
    }

    fn render_results(&self, score: u32, max_score: u32, tier: ResultTier) {
        println!("\n===========================================");
        println!("  Round over!");
        println!("  {} Final score: {}/{}", self.car, score, max_score);
        println!("  {}", tier.message());
        println!("===========================================");
    }

    fn progress_line(&self, fraction: f64, index: usize, total: usize) -> String {
        format!(
            "{}  question {}/{}",
            self.progress_bar(fraction),
            index + 1,
            total
        )
    }

    fn progress_bar(&self, fraction: f64) -> String {
        let filled = (fraction * PROGRESS_CELLS as f64).round() as usize;
        let filled = filled.min(PROGRESS_CELLS);
        format!(
            "[{}{}] {:3.0}%",
            "#".repeat(filled),
            "-".repeat(PROGRESS_CELLS - filled),
            fraction * 100.0
        )
    }
}
