/// Quiz engine module
///
/// The state machine driving a round of questions.
///
/// ## Architecture
///
/// ```text
/// QuizEngine
///   ├── QuizSession (per-round state: index, score, lock)
///   ├── StatsStore  (round finalization)
///   ├── EventBus    (state-change notifications)
///   └── AdvanceScheduler (deferred advance after judging)
/// ```
///
/// A round moves `Idle -> AwaitingAnswer -> Locked -> ... -> Finished`.
/// Submissions while locked are silently ignored; that lock is the only
/// concurrency concern in the whole system.

pub mod quiz;
pub mod results;
pub mod session;

// Re-export commonly used types
pub use quiz::{QuizEngine, SubmitOutcome};
pub use results::ResultTier;
pub use session::{Advance, QuizSession, RoundState};
