/// Per-round quiz state machine
///
/// Owns the question cursor, the running score and the answer lock for a
/// single playthrough. A session is discarded on restart, never reused.
use std::sync::Arc;

use crate::error::EngineError;
use crate::questions::{Question, QuestionBank};

/// State of the current round
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoundState {
    /// No round in progress
    Idle,

    /// A question is on screen, waiting for a pick
    AwaitingAnswer,

    /// An answer was judged; further submissions are ignored until the
    /// deferred advance fires
    Locked,

    /// All questions answered, score finalized
    Finished,
}

impl RoundState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RoundState::Idle)
    }

    pub fn is_awaiting_answer(&self) -> bool {
        matches!(self, RoundState::AwaitingAnswer)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, RoundState::Locked)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, RoundState::Finished)
    }

    /// Get a human-readable description of the state
    pub fn description(&self) -> &'static str {
        match self {
            RoundState::Idle => "Idle",
            RoundState::AwaitingAnswer => "Awaiting answer",
            RoundState::Locked => "Grading...",
            RoundState::Finished => "Finished",
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        RoundState::Idle
    }
}

/// Outcome of submitting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The answer was judged
    Judged { correct: bool },

    /// The engine was not awaiting an answer; nothing happened.
    /// This is the double-click guard, not an error.
    Ignored,
}

/// Outcome of a deferred advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at this index
    Next(usize),

    /// That was the last question; the round is over
    Finished { score: u32 },

    /// Stale tick: the session was not locked
    Ignored,
}

/// One playthrough over a frozen question bank
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    current_index: usize,
    score: u32,
    state: RoundState,
}

impl QuizSession {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            current_index: 0,
            score: 0,
            state: RoundState::Idle,
        }
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question currently awaiting an answer
    pub fn current_question(&self) -> Option<&Question> {
        if self.state.is_awaiting_answer() {
            self.bank.get(self.current_index)
        } else {
            None
        }
    }

    /// Begin a round. Valid from `Idle` or `Finished`; resets score and
    /// cursor. Fails on an empty question bank.
    pub fn begin(&mut self) -> Result<(), EngineError> {
        match self.state {
            RoundState::Idle | RoundState::Finished => {
                if self.bank.is_empty() {
                    return Err(EngineError::EmptyQuestionSet);
                }
                self.current_index = 0;
                self.score = 0;
                self.state = RoundState::AwaitingAnswer;
                Ok(())
            }
            RoundState::AwaitingAnswer | RoundState::Locked => {
                Err(EngineError::RoundInProgress)
            }
        }
    }

    /// Judge an answer for the current question and lock the session.
    ///
    /// Submissions outside `AwaitingAnswer` are reported as `Ignored`;
    /// an out-of-range answer index is the only error case.
    pub fn lock_in(&mut self, answer_index: usize) -> Result<SubmitOutcome, EngineError> {
        if !self.state.is_awaiting_answer() {
            return Ok(SubmitOutcome::Ignored);
        }

        let question = self
            .bank
            .get(self.current_index)
            .ok_or(EngineError::UnknownAnswer(answer_index))?;
        let answer = question
            .answers
            .get(answer_index)
            .ok_or(EngineError::UnknownAnswer(answer_index))?;

        let correct = answer.correct;
        if correct {
            self.score += 1;
        }
        self.state = RoundState::Locked;

        Ok(SubmitOutcome::Judged { correct })
    }

    /// Move past the judged question. Only meaningful while `Locked`;
    /// anything else is a stale timer tick and is ignored.
    pub fn advance(&mut self) -> Advance {
        if !self.state.is_locked() {
            return Advance::Ignored;
        }

        self.current_index += 1;
        if self.current_index < self.bank.len() {
            self.state = RoundState::AwaitingAnswer;
            Advance::Next(self.current_index)
        } else {
            self.state = RoundState::Finished;
            Advance::Finished { score: self.score }
        }
    }

    /// Fraction of questions completed or currently being graded.
    ///
    /// Counts the in-grading question as done, so the progress display
    /// fills as soon as an answer is judged.
    pub fn progress_fraction(&self) -> f64 {
        let len = self.bank.len();
        if len == 0 {
            return 0.0;
        }

        match self.state {
            RoundState::Idle => 0.0,
            RoundState::AwaitingAnswer => self.current_index as f64 / len as f64,
            RoundState::Locked => (self.current_index + 1) as f64 / len as f64,
            RoundState::Finished => 1.0,
        }
    }
}
