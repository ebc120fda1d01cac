use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ContinentFilter;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("total guesses ({total}) does not match correct + wrong ({sum})")]
    CountMismatch { total: u32, sum: u32 },
}

/// Final score of a finished quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    filter: ContinentFilter,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total: u32,
    correct: u32,
    wrong: u32,
}

impl SessionSummary {
    /// Builds a summary, checking that the counts and timestamps agree.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before
    /// `started_at`, or `SessionSummaryError::CountMismatch` if
    /// `correct + wrong != total`.
    pub fn new(
        filter: ContinentFilter,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total: u32,
        correct: u32,
        wrong: u32,
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }
        let sum = correct.saturating_add(wrong);
        if sum != total {
            return Err(SessionSummaryError::CountMismatch { total, sum });
        }

        Ok(Self {
            filter,
            started_at,
            completed_at,
            total,
            correct,
            wrong,
        })
    }

    #[must_use]
    pub fn filter(&self) -> ContinentFilter {
        self.filter
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    /// Share of correct guesses, rounded down to whole percent.
    #[must_use]
    pub fn score_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        self.correct.saturating_mul(100) / self.total
    }
}
