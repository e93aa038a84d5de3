//! # course-quiz
//!
//! Self-check quizzes for course content: validated multiple-choice
//! questions, the inline-check and quiz state machines, mock-exam draws,
//! and a terminal front end.
//!
//! ## Usage
//!
//! ```rust
//! use course_quiz::{Question, Quiz};
//!
//! let question = Question::new(
//!     "rcd",
//!     "What does RCD stand for?",
//!     vec!["Residual current device".into(), "Rated circuit disconnector".into()],
//!     0,
//!     "An RCD detects earth leakage current.",
//! )?;
//!
//! let mut quiz = Quiz::new("Section 1 Knowledge Check", vec![question])?;
//! quiz.select_answer(&"rcd".into(), 0)?;
//! assert_eq!(quiz.final_score(), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod app;
pub mod config;
mod data;
pub mod exam;
mod models;
pub mod quiz;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;

pub use app::App;
pub use config::Config;
pub use data::{load_bank, BankError, LoadError, QuestionBank};
pub use models::{AppState, Difficulty, Question, QuestionId, RawQuestion, ValidationError};
pub use quiz::{CheckState, Feedback, InlineCheck, Quiz, Selection, SelectionError};

/// How often the event loop wakes to refresh the exam clock.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Error type for running a quiz.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("invalid quiz: {0}")]
    Invalid(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A question bank ready to be run in the terminal.
pub struct Runner {
    app: App,
}

impl Runner {
    pub fn new(bank: QuestionBank, rng: StdRng) -> Result<Self, QuizError> {
        Ok(Self {
            app: App::new(bank, rng)?,
        })
    }

    /// Load a bank from a JSON file with the default exam settings.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let config = Config {
            bank_path: path.as_ref().to_path_buf(),
            ..Config::default()
        };
        Self::from_config(&config)
    }

    /// Load the configured bank and apply the command-line overrides.
    pub fn from_config(config: &Config) -> Result<Self, QuizError> {
        let mut bank = load_bank(&config.bank_path)?;
        config.apply_to(&mut bank.exam);
        bank.exam.validate()?;
        Self::new(bank, config.rng())
    }

    /// Take over the terminal until the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        run_event_loop(guard.terminal(), &mut self.app)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_input(app, key.code) {
                    break;
                }
            }
        }

        app.tick(Instant::now());
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz(Instant::now());
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.previous_question();
            false
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.next_question();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.confirm();
            false
        }
        KeyCode::Char('f') => {
            app.toggle_flag();
            false
        }
        KeyCode::Char('n') => {
            app.next_flagged();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Tab | KeyCode::Char('v') => {
            app.cycle_review_filter();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.retake();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn app() -> App {
        let json = r#"[
            {"id": 1, "question": "One?", "options": ["a", "b"], "correctAnswer": 1},
            {"id": 2, "question": "Two?", "options": ["a", "b"], "correctAnswer": 0}
        ]"#;
        let bank = QuestionBank::from_json_str(json, "keys").unwrap();
        App::new(bank, StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn test_key_flow() {
        let mut app = app();
        assert!(!handle_input(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Quiz);

        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Enter);
        handle_input(&mut app, KeyCode::Enter);
        handle_input(&mut app, KeyCode::Char(' '));
        handle_input(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.quiz().final_score(), Some(2));

        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::Welcome);
        assert!(handle_input(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_flag_and_filter_keys() {
        let mut app = app();
        handle_input(&mut app, KeyCode::Enter);

        handle_input(&mut app, KeyCode::Char('f'));
        handle_input(&mut app, KeyCode::Char('l'));
        assert_eq!(app.current_question_number(), 2);
        handle_input(&mut app, KeyCode::Char('n'));
        assert_eq!(app.current_question_number(), 1);
        assert!(app.is_flagged(0));

        handle_input(&mut app, KeyCode::Enter);
        handle_input(&mut app, KeyCode::Enter);
        handle_input(&mut app, KeyCode::Enter);
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Result);

        handle_input(&mut app, KeyCode::Char('v'));
        assert_eq!(app.review_filter(), exam::ReviewFilter::Correct);
        handle_input(&mut app, KeyCode::Tab);
        assert_eq!(app.review_filter(), exam::ReviewFilter::Incorrect);
        assert_eq!(app.reviewed_positions(), vec![0]);
    }
}
