use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;

use quiz_core::Verdict;
use quiz_core::model::{ContinentFilter, Country, CountryId, MapScope, SessionSummary};

use super::service::{SessionState, SessionStatus};
use super::workflow::Screen;
use crate::error::SessionError;
use crate::time_fmt::format_elapsed;

/// Shown before the first session starts.
pub const WELCOME_MESSAGE: &str = "Choose a continent and start the game.";

/// What the last handled event produced, kept for the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Verdict(Verdict),
    Rejected(SessionError),
}

/// Verdict with the correct answer resolved to its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum VerdictView {
    Correct,
    Incorrect { correct_name: String },
}

/// What the external map renderer needs to highlight the target.
///
/// Zoom and framing beyond `scope` stay with the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapHighlight {
    pub country_id: CountryId,
    pub match_name: String,
    pub scope: MapScope,
}

/// Read-only snapshot of everything the UI renders after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub screen: Screen,
    pub status: SessionStatus,
    pub selected_filter: ContinentFilter,
    pub continent_options: Vec<ContinentFilter>,
    pub current_country: Option<Country>,
    /// Every country not yet presented, current target included.
    pub dropdown_options: Vec<Country>,
    /// Pool order; the current target is not listed here.
    pub remaining: Vec<Country>,
    /// Presentation order.
    pub done: Vec<Country>,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub elapsed_display: String,
    pub last_verdict: Option<VerdictView>,
    pub message: String,
    pub map_highlight: Option<MapHighlight>,
    pub summary: Option<SessionSummary>,
}

impl QuizView {
    #[must_use]
    pub fn remaining_display(&self) -> String {
        join_names(&self.remaining)
    }

    #[must_use]
    pub fn done_display(&self) -> String {
        join_names(&self.done)
    }

    #[must_use]
    pub fn dropdown_labels(&self) -> Vec<&str> {
        self.dropdown_options.iter().map(Country::display_name).collect()
    }
}

fn join_names(countries: &[Country]) -> String {
    countries
        .iter()
        .map(Country::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Inputs of a projection. Nothing here is mutated.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub screen: Screen,
    pub selected_filter: ContinentFilter,
    /// Filter the running session was started with.
    pub session_filter: ContinentFilter,
    pub session: &'a SessionState,
    /// Countries the session was started over.
    pub countries: &'a [Country],
    pub feedback: Option<&'a Feedback>,
    pub now: DateTime<Utc>,
}

/// Derives the UI snapshot from session state.
#[must_use]
pub fn project(ctx: &ViewContext<'_>) -> QuizView {
    let session = ctx.session;
    let by_id: HashMap<CountryId, &Country> = ctx.countries.iter().map(|c| (c.id(), c)).collect();
    let lookup = |ids: &[CountryId]| -> Vec<Country> {
        ids.iter()
            .filter_map(|id| by_id.get(id).map(|c| (*c).clone()))
            .collect()
    };

    let current_country = session
        .current()
        .and_then(|id| by_id.get(&id))
        .map(|c| (*c).clone());

    let dropdown_options = ctx
        .countries
        .iter()
        .filter(|c| session.is_undone(c.id()))
        .cloned()
        .collect();

    let map_highlight = current_country.as_ref().map(|country| MapHighlight {
        country_id: country.id(),
        match_name: country.match_name().to_string(),
        scope: ctx.session_filter.map_scope(),
    });

    let last_verdict = match ctx.feedback {
        Some(Feedback::Verdict(Verdict::Correct)) => Some(VerdictView::Correct),
        Some(Feedback::Verdict(Verdict::Incorrect { correct })) => {
            Some(VerdictView::Incorrect {
                correct_name: by_id
                    .get(correct)
                    .map_or_else(|| correct.to_string(), |c| c.display_name().to_string()),
            })
        }
        Some(Feedback::Rejected(_)) | None => None,
    };

    QuizView {
        screen: ctx.screen,
        status: session.status(),
        selected_filter: ctx.selected_filter,
        continent_options: ContinentFilter::options(),
        current_country,
        dropdown_options,
        remaining: lookup(session.pool()),
        done: lookup(session.done()),
        correct_count: session.correct_count(),
        wrong_count: session.wrong_count(),
        elapsed_display: format_elapsed(elapsed(session, ctx.now)),
        message: message(session, ctx.feedback, last_verdict.as_ref()),
        last_verdict,
        map_highlight,
        summary: session.summary(ctx.session_filter).ok().flatten(),
    }
}

/// Time on the session timer; frozen once the session finishes.
fn elapsed(session: &SessionState, now: DateTime<Utc>) -> Duration {
    let Some(started_at) = session.started_at() else {
        return Duration::zero();
    };
    let until = session.completed_at().unwrap_or(now);
    (until - started_at).max(Duration::zero())
}

fn message(
    session: &SessionState,
    feedback: Option<&Feedback>,
    verdict: Option<&VerdictView>,
) -> String {
    if let Some(Feedback::Rejected(err)) = feedback {
        return err.user_message().to_string();
    }

    let head = match verdict {
        Some(VerdictView::Correct) if session.is_running() => {
            "Correct! Next country loaded.".to_string()
        }
        Some(VerdictView::Correct) => "Correct!".to_string(),
        Some(VerdictView::Incorrect { correct_name }) => {
            format!("Wrong! The answer was: {correct_name}")
        }
        None if session.status() == SessionStatus::NotStarted => WELCOME_MESSAGE.to_string(),
        None => String::new(),
    };

    if session.is_finished() {
        let tail = format!(
            "Quiz finished: {} of {} correct.",
            session.correct_count(),
            session.total()
        );
        if head.is_empty() {
            return tail;
        }
        return format!("{head} {tail}");
    }
    head
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Continent, CountryEntry};
    use quiz_core::time::fixed_now;
    use quiz_core::{Catalog, resolve};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> Catalog {
        Catalog::from_entries(vec![
            CountryEntry::new(Continent::Europe, "Frankreich", "France"),
            CountryEntry::new(Continent::Europe, "Spanien", "Spain"),
            CountryEntry::new(Continent::Asia, "Japan", "Japan"),
        ])
        .unwrap()
    }

    fn ctx<'a>(
        session: &'a SessionState,
        countries: &'a [Country],
        filter: ContinentFilter,
        feedback: Option<&'a Feedback>,
        now: DateTime<Utc>,
    ) -> ViewContext<'a> {
        ViewContext {
            screen: Screen::Quiz,
            selected_filter: filter,
            session_filter: filter,
            session,
            countries,
            feedback,
            now,
        }
    }

    #[test]
    fn not_started_view_is_empty() {
        let session = SessionState::not_started();
        let view = project(&ctx(&session, &[], ContinentFilter::All, None, fixed_now()));

        assert_eq!(view.status, SessionStatus::NotStarted);
        assert_eq!(view.elapsed_display, "0s");
        assert!(view.current_country.is_none());
        assert!(view.map_highlight.is_none());
        assert!(view.dropdown_options.is_empty());
        assert_eq!(view.message, WELCOME_MESSAGE);
    }

    #[test]
    fn dropdown_excludes_done_countries() {
        let catalog = catalog();
        let resolved = resolve(&catalog, ContinentFilter::All);
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = SessionState::start(&resolved.countries, fixed_now(), &mut rng).unwrap();
        let first = session.current().unwrap();
        session.submit_guess(Some(first), fixed_now(), &mut rng).unwrap();

        let view = project(&ctx(
            &session,
            &resolved.countries,
            ContinentFilter::All,
            None,
            fixed_now(),
        ));

        assert_eq!(view.dropdown_options.len(), 2);
        assert!(view.dropdown_options.iter().all(|c| c.id() != first));
        let current = view.current_country.clone().unwrap();
        assert!(view.dropdown_options.contains(&current));
        assert_eq!(view.done.len(), 1);
        assert_eq!(view.done[0].id(), first);
        assert_eq!(view.remaining.len(), 1);
        assert_eq!(view.done_display(), view.done[0].display_name());
    }

    #[test]
    fn map_highlight_uses_match_name_and_scope() {
        let catalog = catalog();
        let filter = ContinentFilter::Only(Continent::Europe);
        let resolved = resolve(&catalog, filter);
        let mut rng = StdRng::seed_from_u64(3);
        let session = SessionState::start(&resolved.countries, fixed_now(), &mut rng).unwrap();

        let view = project(&ctx(&session, &resolved.countries, filter, None, fixed_now()));
        let highlight = view.map_highlight.unwrap();
        let current = view.current_country.unwrap();
        assert_eq!(highlight.country_id, current.id());
        assert_eq!(highlight.match_name, current.match_name());
        assert_eq!(highlight.scope, MapScope::Europe);
    }

    #[test]
    fn elapsed_switches_to_minutes() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(3);
        let session = SessionState::start(catalog.countries(), fixed_now(), &mut rng).unwrap();

        let at = |secs| {
            project(&ctx(
                &session,
                catalog.countries(),
                ContinentFilter::All,
                None,
                fixed_now() + Duration::seconds(secs),
            ))
            .elapsed_display
        };
        assert_eq!(at(45), "45s");
        assert_eq!(at(130), "2m 10s");
    }

    #[test]
    fn incorrect_verdict_names_the_answer() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(5);
        let session = SessionState::start(catalog.countries(), fixed_now(), &mut rng).unwrap();
        let japan = catalog.by_display_name("Japan").unwrap().id();
        let feedback = Feedback::Verdict(Verdict::Incorrect { correct: japan });

        let view = project(&ctx(
            &session,
            catalog.countries(),
            ContinentFilter::All,
            Some(&feedback),
            fixed_now(),
        ));
        assert_eq!(
            view.last_verdict,
            Some(VerdictView::Incorrect {
                correct_name: "Japan".into()
            })
        );
        assert_eq!(view.message, "Wrong! The answer was: Japan");
    }

    #[test]
    fn rejected_event_shows_user_message() {
        let session = SessionState::not_started();
        let feedback = Feedback::Rejected(SessionError::InvalidState);
        let view = project(&ctx(
            &session,
            &[],
            ContinentFilter::All,
            Some(&feedback),
            fixed_now(),
        ));
        assert_eq!(view.message, "Start the quiz first.");
        assert!(view.last_verdict.is_none());
    }

    #[test]
    fn finished_view_freezes_timer_and_reports_summary() {
        let catalog = catalog();
        let filter = ContinentFilter::Only(Continent::Asia);
        let resolved = resolve(&catalog, filter);
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = SessionState::start(&resolved.countries, fixed_now(), &mut rng).unwrap();
        let target = session.current().unwrap();
        session
            .submit_guess(Some(target), fixed_now() + Duration::seconds(10), &mut rng)
            .unwrap();
        let feedback = Feedback::Verdict(Verdict::Correct);

        let view = project(&ctx(
            &session,
            &resolved.countries,
            filter,
            Some(&feedback),
            fixed_now() + Duration::seconds(500),
        ));
        assert_eq!(view.status, SessionStatus::Finished);
        assert_eq!(view.elapsed_display, "10s");
        assert!(view.dropdown_options.is_empty());
        assert_eq!(view.message, "Correct! Quiz finished: 1 of 1 correct.");
        assert_eq!(view.summary.unwrap().correct(), 1);
    }
}
