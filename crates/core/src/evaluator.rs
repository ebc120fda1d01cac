use serde::{Deserialize, Serialize};

use crate::model::CountryId;

/// Outcome of comparing a guess with the active target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    /// Carries the id of the country that was actually highlighted.
    Incorrect { correct: CountryId },
}

impl Verdict {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Compares a guess against the current target.
#[must_use]
pub fn evaluate(current: CountryId, guess: CountryId) -> Verdict {
    if guess == current {
        Verdict::Correct
    } else {
        Verdict::Incorrect { correct: current }
    }
}
