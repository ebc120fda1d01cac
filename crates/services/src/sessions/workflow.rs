use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use quiz_core::model::{ContinentFilter, Country, CountryId};
use quiz_core::{Catalog, Clock, Resolution, resolve};

use super::service::{GuessOutcome, SessionState};
use super::view::{Feedback, QuizView, ViewContext, project};
use crate::error::SessionError;

/// Screen the hosting UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Welcome,
    ContinentSelect,
    Quiz,
}

/// Inputs from the hosting UI, handled one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// Leave the welcome screen.
    Continue,
    /// Record the continent for the next start. Never touches a running session.
    SelectContinent(ContinentFilter),
    /// Discard any session and start a fresh one with the selected continent.
    StartSession,
    SubmitGuess(Option<CountryId>),
    /// Guess by dropdown label; an unknown label counts as no selection.
    SubmitGuessByName(Option<String>),
    /// Back to the continent menu. The session is kept until the next start.
    BackToSelection,
}

/// Owns the catalog, the current session and everything needed to render it.
///
/// Every event is one atomic transition: either it is applied in full or it is
/// rejected and only the feedback message changes.
pub struct QuizLoop {
    catalog: Catalog,
    clock: Clock,
    rng: StdRng,
    screen: Screen,
    selected: ContinentFilter,
    active: Option<Resolution>,
    session: SessionState,
    feedback: Option<Feedback>,
}

impl QuizLoop {
    #[must_use]
    pub fn new(catalog: Catalog, clock: Clock) -> Self {
        Self {
            catalog,
            clock,
            rng: StdRng::from_os_rng(),
            screen: Screen::Welcome,
            selected: ContinentFilter::All,
            active: None,
            session: SessionState::not_started(),
            feedback: None,
        }
    }

    /// Makes target draws reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: ContinentFilter) -> Self {
        self.selected = filter;
        self
    }

    /// Handles one event and returns the resulting view.
    pub fn dispatch(&mut self, event: QuizEvent) -> QuizView {
        // rejections are already recorded as feedback
        let _ = self.apply(event);
        self.view()
    }

    /// Handles one event.
    ///
    /// A rejected event leaves the session untouched and is kept as feedback
    /// so the next view shows the matching message.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` for a guess without an active
    /// target and `SessionError::MissingGuess` for a guess without a choice.
    pub fn apply(&mut self, event: QuizEvent) -> Result<Option<GuessOutcome>, SessionError> {
        let result = self.transition(event);
        if let Err(err) = &result {
            warn!(error = %err, screen = ?self.screen, "quiz event rejected");
            self.feedback = Some(Feedback::Rejected(err.clone()));
        }
        result
    }

    fn transition(&mut self, event: QuizEvent) -> Result<Option<GuessOutcome>, SessionError> {
        match event {
            QuizEvent::Continue => {
                if self.screen == Screen::Welcome {
                    self.screen = Screen::ContinentSelect;
                }
                Ok(None)
            }
            QuizEvent::SelectContinent(filter) => {
                debug!(filter = %filter, "continent selected");
                self.selected = filter;
                Ok(None)
            }
            QuizEvent::StartSession => {
                self.start()?;
                Ok(None)
            }
            QuizEvent::SubmitGuess(guess) => self.guess(guess).map(Some),
            QuizEvent::SubmitGuessByName(name) => {
                let guess = name
                    .as_deref()
                    .and_then(|name| self.catalog.by_display_name(name))
                    .map(Country::id);
                self.guess(guess).map(Some)
            }
            QuizEvent::BackToSelection => {
                if self.screen == Screen::Quiz {
                    self.screen = Screen::ContinentSelect;
                }
                Ok(None)
            }
        }
    }

    fn start(&mut self) -> Result<(), SessionError> {
        let resolution = resolve(&self.catalog, self.selected);
        if resolution.fell_back {
            warn!(
                filter = %resolution.filter,
                "continent has no countries; using the full catalog"
            );
        }

        let session = SessionState::start(&resolution.countries, self.clock.now(), &mut self.rng)?;
        info!(
            filter = %resolution.filter,
            countries = resolution.len(),
            "quiz session started"
        );

        self.session = session;
        self.active = Some(resolution);
        self.screen = Screen::Quiz;
        self.feedback = None;
        Ok(())
    }

    fn guess(&mut self, guess: Option<CountryId>) -> Result<GuessOutcome, SessionError> {
        if self.screen != Screen::Quiz {
            return Err(SessionError::InvalidState);
        }

        let outcome = self
            .session
            .submit_guess(guess, self.clock.now(), &mut self.rng)?;
        debug!(
            target = %outcome.target,
            guess = %outcome.guess,
            correct = outcome.verdict.is_correct(),
            "guess scored"
        );
        if outcome.finished() {
            info!(
                correct = self.session.correct_count(),
                wrong = self.session.wrong_count(),
                "quiz session finished"
            );
        }

        self.feedback = Some(Feedback::Verdict(outcome.verdict));
        Ok(outcome)
    }

    /// Projects the current state for rendering.
    #[must_use]
    pub fn view(&self) -> QuizView {
        project(&ViewContext {
            screen: self.screen,
            selected_filter: self.selected,
            session_filter: self.session_filter(),
            session: &self.session,
            countries: self.session_countries(),
            feedback: self.feedback.as_ref(),
            now: self.clock.now(),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Continent chosen in the menu; applies from the next start on.
    #[must_use]
    pub fn selected_filter(&self) -> ContinentFilter {
        self.selected
    }

    /// Continent the current session was started with.
    #[must_use]
    pub fn session_filter(&self) -> ContinentFilter {
        self.active.as_ref().map_or(self.selected, |r| r.filter)
    }

    /// Countries the current session was started over.
    #[must_use]
    pub fn session_countries(&self) -> &[Country] {
        match &self.active {
            Some(resolution) => &resolution.countries,
            None => &[],
        }
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }
}

impl std::fmt::Debug for QuizLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizLoop")
            .field("catalog_len", &self.catalog.len())
            .field("screen", &self.screen)
            .field("selected", &self.selected)
            .field("session", &self.session)
            .field("feedback", &self.feedback)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
