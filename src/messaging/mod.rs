/// Messaging module: the seam between the quiz engine and any front-end.
///
/// The engine publishes [`QuizEvent`]s describing what happened (past
/// tense); presentation code subscribes and re-renders. Nothing in the
/// engine knows how the events are displayed.

pub mod bus;
pub mod events;

// Re-export commonly used types
pub use bus::{EventBus, SubscriberId};
pub use events::QuizEvent;
