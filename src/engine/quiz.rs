/// The quiz engine: session state machine plus its collaborators.
///
/// Wraps a [`QuizSession`] and wires it to the event bus, the stats store
/// and the deferred-advance scheduler. All transitions happen on the
/// caller's thread; the only deferred work is the advance tick after an
/// answer is judged.
use std::sync::Arc;
use std::time::Duration;

use crate::error::EngineError;
use crate::messaging::{EventBus, QuizEvent};
use crate::questions::{Question, QuestionBank};
use crate::scheduler::{AdvanceHandle, AdvanceScheduler};
use crate::stats::{Stats, StatsStore};

use super::results::ResultTier;
use super::session::{Advance, QuizSession, RoundState};

pub use super::session::SubmitOutcome;

pub struct QuizEngine {
    session: QuizSession,
    stats: StatsStore,
    bus: EventBus,
    scheduler: Box<dyn AdvanceScheduler>,
    reveal_delay: Duration,
    pending_advance: Option<AdvanceHandle>,
}

impl QuizEngine {
    pub fn new(
        bank: Arc<QuestionBank>,
        stats: StatsStore,
        bus: EventBus,
        scheduler: Box<dyn AdvanceScheduler>,
        reveal_delay: Duration,
    ) -> Self {
        bus.publish(QuizEvent::QuestionsLoaded { total: bank.len() });

        Self {
            session: QuizSession::new(bank),
            stats,
            bus,
            scheduler,
            reveal_delay,
            pending_advance: None,
        }
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        self.session.bank()
    }

    pub fn state(&self) -> RoundState {
        self.session.state()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.session.progress_fraction()
    }

    /// Current lifetime stats from the store
    pub fn stats(&self) -> Stats {
        self.stats.read()
    }

    /// Begin a round over the loaded bank
    pub fn start(&mut self) -> Result<(), EngineError> {
        self.session.begin()?;

        let total = self.session.bank().len();
        tracing::info!("Round started: {} questions", total);
        self.bus.publish(QuizEvent::RoundStarted { total });
        self.bus
            .publish(QuizEvent::QuestionPresented { index: 0, total });

        Ok(())
    }

    /// The question currently awaiting an answer
    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    /// Submit an answer for the current question.
    ///
    /// While locked or outside a round this is a silent no-op
    /// (`SubmitOutcome::Ignored`). A judged answer locks the session and
    /// schedules the deferred advance.
    pub fn submit_answer(&mut self, answer_index: usize) -> Result<SubmitOutcome, EngineError> {
        let question_index = self.session.current_index();

        match self.session.lock_in(answer_index)? {
            SubmitOutcome::Ignored => {
                tracing::debug!("Ignored submission while {}", self.state().description());
                Ok(SubmitOutcome::Ignored)
            }
            SubmitOutcome::Judged { correct } => {
                tracing::debug!(
                    "Question {} judged: answer {} is {}",
                    question_index + 1,
                    answer_index + 1,
                    if correct { "correct" } else { "incorrect" }
                );

                self.bus.publish(QuizEvent::AnswerJudged {
                    question_index,
                    answer_index,
                    correct,
                    score: self.session.score(),
                });

                self.pending_advance = Some(self.scheduler.schedule(self.reveal_delay));
                Ok(SubmitOutcome::Judged { correct })
            }
        }
    }

    /// Consume a scheduler tick and move the round forward.
    ///
    /// Ticks arriving in any state other than `Locked` are stale and
    /// ignored. Reaching the end of the bank finalizes the round: the
    /// score is recorded into the stats store exactly once, then the
    /// finish event goes out.
    pub fn advance(&mut self) {
        self.pending_advance = None;

        match self.session.advance() {
            Advance::Ignored => {
                tracing::debug!("Stale advance tick while {}", self.state().description());
            }
            Advance::Next(index) => {
                let total = self.session.bank().len();
                self.bus
                    .publish(QuizEvent::QuestionPresented { index, total });
            }
            Advance::Finished { score } => {
                let max_score = self.session.bank().max_score();
                let tier = ResultTier::for_score(score, max_score);
                tracing::info!("Round finished: {}/{}", score, max_score);

                match self.stats.record_round_result(score) {
                    Ok(stats) => self.bus.publish(QuizEvent::StatsRecorded { stats }),
                    Err(e) => {
                        // The round result still stands; only persistence failed
                        tracing::error!("Failed to persist stats: {:#}", e);
                    }
                }

                self.bus.publish(QuizEvent::RoundFinished {
                    score,
                    max_score,
                    tier,
                });
            }
        }
    }

    /// Return to `Idle` after a finished round, keeping the loaded bank
    pub fn restart(&mut self) -> Result<(), EngineError> {
        if !self.state().is_finished() {
            return Err(EngineError::NotFinished);
        }

        let bank = Arc::clone(self.session.bank());
        self.session = QuizSession::new(bank);
        tracing::debug!("Engine reset to idle");
        Ok(())
    }

    /// Cancel any pending advance timer (shutdown path)
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending_advance.take() {
            handle.cancel();
        }
    }
}
