mod host;
mod progress;
mod timer;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizServiceError;
pub use host::{HostEvent, QuizHost};
pub use progress::QuizProgress;
pub use timer::{TICK_PERIOD, TimerHandle};
pub use workflow::QuizLoopService;
