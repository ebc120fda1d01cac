use std::io::{self, BufRead, Write};

use quiz_core::model::ContinentFilter;
use services::{QuizEvent, QuizLoop, QuizView, Screen, SessionStatus};

/// Line-based host: prints each view and turns typed lines into quiz events.
pub struct Terminal<R, W> {
    input: R,
    output: W,
    json: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    #[must_use]
    pub fn new(input: R, output: W, json: bool) -> Self {
        Self {
            input,
            output,
            json,
        }
    }

    /// Runs until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from reading input or writing output.
    pub fn run(&mut self, quiz: &mut QuizLoop) -> io::Result<()> {
        let mut view = quiz.view();
        self.render(&view)?;

        loop {
            self.prompt(&view)?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if matches!(line, "quit" | "q") {
                break;
            }

            let events = match events_for(&view, line) {
                Ok(events) => events,
                Err(hint) => {
                    writeln!(self.output, "{hint}")?;
                    continue;
                }
            };
            for event in events {
                view = quiz.dispatch(event);
            }
            self.render(&view)?;
        }

        self.output.flush()
    }

    fn prompt(&mut self, view: &QuizView) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        let prompt = match view.screen {
            Screen::Welcome => "[Enter] ",
            Screen::ContinentSelect => "Continent> ",
            Screen::Quiz if view.status == SessionStatus::Finished => "> ",
            Screen::Quiz => "Guess> ",
        };
        write!(self.output, "{prompt}")?;
        self.output.flush()
    }

    fn render(&mut self, view: &QuizView) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(view).map_err(io::Error::other)?;
            return writeln!(self.output, "{line}");
        }

        match view.screen {
            Screen::Welcome => {
                writeln!(self.output, "Geography quiz: name the highlighted country.")?;
                writeln!(self.output, "{}", view.message)?;
            }
            Screen::ContinentSelect => {
                writeln!(self.output, "Choose a continent:")?;
                for (index, option) in view.continent_options.iter().enumerate() {
                    writeln!(self.output, "  {index}) {option}")?;
                }
            }
            Screen::Quiz => self.render_quiz(view)?,
        }
        Ok(())
    }

    fn render_quiz(&mut self, view: &QuizView) -> io::Result<()> {
        if !view.message.is_empty() {
            writeln!(self.output, "{}", view.message)?;
        }

        if let Some(summary) = &view.summary {
            writeln!(
                self.output,
                "{}: {} of {} correct ({}%) in {}",
                summary.filter(),
                summary.correct(),
                summary.total(),
                summary.score_percent(),
                view.elapsed_display
            )?;
            writeln!(self.output, "Done: {}", view.done_display())?;
            return writeln!(self.output, "Type 'again', 'back' or 'quit'.");
        }

        if let Some(highlight) = &view.map_highlight {
            writeln!(
                self.output,
                "Map [{}] highlights: {}",
                highlight.scope, highlight.match_name
            )?;
        }
        writeln!(
            self.output,
            "Correct: {}  Wrong: {}  Time: {}  Left: {}",
            view.correct_count,
            view.wrong_count,
            view.elapsed_display,
            view.dropdown_options.len()
        )?;
        for (index, country) in view.dropdown_options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, country.display_name())?;
        }
        Ok(())
    }
}

/// Maps a typed line to events for the current screen, or a hint to print.
fn events_for(view: &QuizView, line: &str) -> Result<Vec<QuizEvent>, &'static str> {
    match view.screen {
        Screen::Welcome => Ok(vec![QuizEvent::Continue]),
        Screen::ContinentSelect => {
            let filter = pick_continent(view, line).ok_or("Unknown continent.")?;
            Ok(vec![
                QuizEvent::SelectContinent(filter),
                QuizEvent::StartSession,
            ])
        }
        Screen::Quiz => Ok(vec![match line {
            "back" => QuizEvent::BackToSelection,
            "again" | "restart" => QuizEvent::StartSession,
            "" => QuizEvent::SubmitGuess(None),
            _ => match line.parse::<usize>() {
                Ok(number) => QuizEvent::SubmitGuess(
                    number
                        .checked_sub(1)
                        .and_then(|index| view.dropdown_options.get(index))
                        .map(|country| country.id()),
                ),
                Err(_) => QuizEvent::SubmitGuessByName(Some(line.to_string())),
            },
        }]),
    }
}

fn pick_continent(view: &QuizView, line: &str) -> Option<ContinentFilter> {
    match line.parse::<usize>() {
        Ok(index) => view.continent_options.get(index).copied(),
        Err(_) => line.parse().ok(),
    }
}
