use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use quiz_core::model::{ContinentFilter, Country, CountryId, SessionSummary};
use quiz_core::{Verdict, evaluate};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz session. Never moves back to `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    NotStarted,
    Running,
    Finished,
}

//
// ─── GUESS OUTCOME ─────────────────────────────────────────────────────────────
//

/// Result of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    /// The country that was highlighted when the guess came in.
    pub target: CountryId,
    pub guess: CountryId,
    pub verdict: Verdict,
    /// The newly drawn target, or `None` when the session just finished.
    pub next: Option<CountryId>,
}

impl GuessOutcome {
    #[must_use]
    pub fn finished(&self) -> bool {
        self.next.is_none()
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz run over a resolved set of countries.
///
/// Ids are partitioned into `pool` (not yet presented), `current` (the active
/// target, held out of `pool`) and `done` (presented, in presentation order).
/// Every id is presented exactly once, so a session over N countries finishes
/// after exactly N accepted guesses.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    status: SessionStatus,
    pool: Vec<CountryId>,
    done: Vec<CountryId>,
    current: Option<CountryId>,
    correct: u32,
    wrong: u32,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionState {
    /// A session that has not been started; every guess is rejected.
    #[must_use]
    pub fn not_started() -> Self {
        Self::default()
    }

    /// Starts a fresh session and draws the first target uniformly at random.
    ///
    /// `started_at` should come from the services layer clock to keep time deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no countries are provided.
    pub fn start<R: Rng>(
        countries: &[Country],
        started_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let mut seen = HashSet::new();
        let mut pool: Vec<CountryId> = countries
            .iter()
            .map(Country::id)
            .filter(|id| seen.insert(*id))
            .collect();

        if pool.is_empty() {
            return Err(SessionError::Empty);
        }

        let current = draw(&mut pool, rng);
        let done = Vec::with_capacity(pool.len() + 1);

        Ok(Self {
            status: SessionStatus::Running,
            pool,
            done,
            current,
            correct: 0,
            wrong: 0,
            started_at: Some(started_at),
            completed_at: None,
        })
    }

    /// Scores a guess against the active target and advances to the next one.
    ///
    /// The target moves to `done` whether or not the guess was right. When no
    /// candidates remain the session becomes `Finished` at `answered_at`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` if the session is not running.
    /// Returns `SessionError::MissingGuess` if `guess` is `None`.
    /// The session is unchanged in both cases.
    pub fn submit_guess<R: Rng>(
        &mut self,
        guess: Option<CountryId>,
        answered_at: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<GuessOutcome, SessionError> {
        let Some(target) = self.active_target() else {
            return Err(SessionError::InvalidState);
        };
        let Some(guess) = guess else {
            return Err(SessionError::MissingGuess);
        };

        let verdict = evaluate(target, guess);
        match verdict {
            Verdict::Correct => self.correct = self.correct.saturating_add(1),
            Verdict::Incorrect { .. } => self.wrong = self.wrong.saturating_add(1),
        }

        if !self.done.contains(&target) {
            self.done.push(target);
        }
        self.pool.retain(|id| *id != target);

        self.current = draw(&mut self.pool, rng);
        if self.current.is_none() {
            self.status = SessionStatus::Finished;
            self.completed_at = Some(answered_at);
        }

        Ok(GuessOutcome {
            target,
            guess,
            verdict,
            next: self.current,
        })
    }

    fn active_target(&self) -> Option<CountryId> {
        match self.status {
            SessionStatus::Running => self.current,
            SessionStatus::NotStarted | SessionStatus::Finished => None,
        }
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    /// Ids not yet presented, excluding the active target.
    #[must_use]
    pub fn pool(&self) -> &[CountryId] {
        &self.pool
    }

    /// Ids already presented, in presentation order.
    #[must_use]
    pub fn done(&self) -> &[CountryId] {
        &self.done
    }

    #[must_use]
    pub fn current(&self) -> Option<CountryId> {
        self.current
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong_count(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns true if `id` can still be presented (active target or pool).
    #[must_use]
    pub fn is_undone(&self, id: CountryId) -> bool {
        self.current == Some(id) || self.pool.contains(&id)
    }

    /// Number of countries in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.pool.len() + self.done.len() + usize::from(self.current.is_some())
    }

    /// Number of countries not yet presented, including the active target.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.len() + usize::from(self.current.is_some())
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.done.len(),
            remaining: self.remaining(),
            is_complete: self.is_finished(),
        }
    }

    /// Final score, once the session has finished.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Summary` if the recorded counts are inconsistent.
    pub fn summary(&self, filter: ContinentFilter) -> Result<Option<SessionSummary>, SessionError> {
        let (Some(started_at), Some(completed_at)) = (self.started_at, self.completed_at) else {
            return Ok(None);
        };
        let total = u32::try_from(self.done.len()).unwrap_or(u32::MAX);
        let summary = SessionSummary::new(
            filter,
            started_at,
            completed_at,
            total,
            self.correct,
            self.wrong,
        )?;
        Ok(Some(summary))
    }
}

/// Removes and returns a uniformly random id from `pool`.
fn draw<R: Rng>(pool: &mut Vec<CountryId>, rng: &mut R) -> Option<CountryId> {
    if pool.is_empty() {
        return None;
    }
    let index = rng.random_range(0..pool.len());
    Some(pool.swap_remove(index))
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("status", &self.status)
            .field("pool_len", &self.pool.len())
            .field("done_len", &self.done.len())
            .field("current", &self.current)
            .field("correct", &self.correct)
            .field("wrong", &self.wrong)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{Continent, CountryEntry};
    use quiz_core::time::fixed_now;
    use quiz_core::{Catalog, resolve};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn abc_catalog() -> Catalog {
        Catalog::from_entries(vec![
            CountryEntry::new(Continent::Europe, "A", "a"),
            CountryEntry::new(Continent::Europe, "B", "b"),
            CountryEntry::new(Continent::Asia, "C", "c"),
        ])
        .unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn wrong_guess(session: &SessionState, countries: &[Country]) -> CountryId {
        countries
            .iter()
            .map(Country::id)
            .find(|id| Some(*id) != session.current())
            .unwrap()
    }

    #[test]
    fn empty_session_returns_error() {
        let err = SessionState::start(&[], fixed_now(), &mut rng()).unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn start_holds_target_out_of_pool() {
        let catalog = abc_catalog();
        let session = SessionState::start(catalog.countries(), fixed_now(), &mut rng()).unwrap();

        let current = session.current().unwrap();
        assert_eq!(session.status(), SessionStatus::Running);
        assert!(!session.pool().contains(&current));
        assert_eq!(session.pool().len(), 2);
        assert!(session.done().is_empty());
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(session.started_at(), Some(fixed_now()));
        assert_eq!(session.total(), 3);
    }

    #[test]
    fn duplicate_ids_are_presented_once() {
        let catalog = abc_catalog();
        let mut countries = catalog.countries().to_vec();
        countries.push(countries[0].clone());
        let session = SessionState::start(&countries, fixed_now(), &mut rng()).unwrap();
        assert_eq!(session.total(), 3);
    }

    #[test]
    fn guess_before_start_is_invalid_state() {
        let mut session = SessionState::not_started();
        let before = session.clone();

        let err = session
            .submit_guess(None, fixed_now(), &mut rng())
            .unwrap_err();
        assert_eq!(err, SessionError::InvalidState);
        let err = session
            .submit_guess(Some(CountryId::new(1)), fixed_now(), &mut rng())
            .unwrap_err();
        assert_eq!(err, SessionError::InvalidState);
        assert_eq!(session, before);
    }

    #[test]
    fn missing_guess_leaves_state_unchanged() {
        let catalog = abc_catalog();
        let mut session = SessionState::start(catalog.countries(), fixed_now(), &mut rng()).unwrap();
        let before = session.clone();

        let err = session
            .submit_guess(None, fixed_now(), &mut rng())
            .unwrap_err();
        assert_eq!(err, SessionError::MissingGuess);
        assert_eq!(session, before);
    }

    #[test]
    fn correct_guess_increments_only_correct_count() {
        let catalog = abc_catalog();
        let mut rng = rng();
        let mut session = SessionState::start(catalog.countries(), fixed_now(), &mut rng).unwrap();
        let target = session.current().unwrap();

        let outcome = session
            .submit_guess(Some(target), fixed_now(), &mut rng)
            .unwrap();
        assert_eq!(outcome.verdict, Verdict::Correct);
        assert_eq!(outcome.target, target);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(session.done(), &[target]);
        assert_ne!(session.current(), Some(target));
    }

    #[test]
    fn wrong_first_guess_over_all_countries() {
        let catalog = abc_catalog();
        let resolved = resolve(&catalog, ContinentFilter::All);
        let mut rng = rng();
        let mut session = SessionState::start(&resolved.countries, fixed_now(), &mut rng).unwrap();
        let target = session.current().unwrap();
        let remaining_before: Vec<_> = session.pool().to_vec();

        let guess = wrong_guess(&session, &resolved.countries);
        let outcome = session
            .submit_guess(Some(guess), fixed_now(), &mut rng)
            .unwrap();

        assert_eq!(outcome.verdict, Verdict::Incorrect { correct: target });
        assert_eq!(session.wrong_count(), 1);
        assert_eq!(session.correct_count(), 0);
        let next = session.current().unwrap();
        assert!(remaining_before.contains(&next));
        assert_eq!(session.pool().len(), 1);
    }

    #[test]
    fn europe_session_finishes_after_two_correct_guesses() {
        let catalog = abc_catalog();
        let resolved = resolve(&catalog, Continent::Europe.into());
        let mut rng = rng();
        let mut session = SessionState::start(&resolved.countries, fixed_now(), &mut rng).unwrap();
        assert_eq!(session.remaining(), 2);

        let first = session.current().unwrap();
        let outcome = session.submit_guess(Some(first), fixed_now(), &mut rng).unwrap();
        assert!(!outcome.finished());

        let second = session.current().unwrap();
        let done_at = fixed_now() + Duration::seconds(30);
        let outcome = session.submit_guess(Some(second), done_at, &mut rng).unwrap();
        assert!(outcome.finished());

        assert_eq!(session.status(), SessionStatus::Finished);
        assert_eq!(session.current(), None);
        assert_eq!(session.correct_count(), 2);
        assert_eq!(session.wrong_count(), 0);
        assert_eq!(session.done(), &[first, second]);
        let mut done = session.done().to_vec();
        done.sort();
        assert_eq!(done, vec![CountryId::new(1), CountryId::new(2)]);
        assert_eq!(session.completed_at(), Some(done_at));
    }

    #[test]
    fn finished_session_rejects_guesses() {
        let catalog = abc_catalog();
        let resolved = resolve(&catalog, Continent::Asia.into());
        let mut rng = rng();
        let mut session = SessionState::start(&resolved.countries, fixed_now(), &mut rng).unwrap();
        let only = session.current().unwrap();
        session.submit_guess(Some(only), fixed_now(), &mut rng).unwrap();
        assert!(session.is_finished());

        let before = session.clone();
        let err = session
            .submit_guess(Some(only), fixed_now(), &mut rng)
            .unwrap_err();
        assert_eq!(err, SessionError::InvalidState);
        assert_eq!(session, before);
    }

    #[test]
    fn summary_is_available_once_finished() {
        let catalog = abc_catalog();
        let mut rng = rng();
        let mut session = SessionState::start(catalog.countries(), fixed_now(), &mut rng).unwrap();
        assert_eq!(session.summary(ContinentFilter::All).unwrap(), None);

        while let Some(target) = session.current() {
            session.submit_guess(Some(target), fixed_now(), &mut rng).unwrap();
        }

        let summary = session.summary(ContinentFilter::All).unwrap().unwrap();
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.correct(), 3);
        assert_eq!(summary.score_percent(), 100);
    }

    #[test]
    fn progress_tracks_answers() {
        let catalog = abc_catalog();
        let mut rng = rng();
        let mut session = SessionState::start(catalog.countries(), fixed_now(), &mut rng).unwrap();
        let target = session.current().unwrap();
        session.submit_guess(Some(target), fixed_now(), &mut rng).unwrap();

        assert_eq!(
            session.progress(),
            SessionProgress {
                total: 3,
                answered: 1,
                remaining: 2,
                is_complete: false,
            }
        );
    }
}
