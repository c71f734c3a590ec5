/// Car Trivia: a terminal multiple-choice quiz.
///
/// The library half of the crate holds everything the binary and the
/// integration tests share: the question bank, the round state machine,
/// the stats store, the event bus and the deferred-advance scheduler.

pub mod config;
pub mod engine;
pub mod error;
pub mod messaging;
pub mod questions;
pub mod scheduler;
pub mod stats;
pub mod ui;
