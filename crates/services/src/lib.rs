#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod time_fmt;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::SessionError;
pub use sessions::{
    Feedback, GuessOutcome, MapHighlight, QuizEvent, QuizLoop, QuizView, Screen,
    SessionProgress, SessionState, SessionStatus, VerdictView,
};
pub use time_fmt::format_elapsed;
