mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{GuessOutcome, SessionState, SessionStatus};
pub use view::{
    Feedback, MapHighlight, QuizView, VerdictView, ViewContext, WELCOME_MESSAGE, project,
};
pub use workflow::{QuizEvent, QuizLoop, Screen};
