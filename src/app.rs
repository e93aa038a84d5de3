use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::data::QuestionBank;
use crate::exam::{ExamConfig, ExamResult, ReviewFilter};
use crate::models::{AppState, ValidationError};
use crate::quiz::{InlineCheck, Quiz};

/// Front-end state around one quiz session: which screen is up, which
/// question is on it, where the option cursor sits and which questions
/// are flagged for review.
pub struct App {
    pub state: AppState,
    bank: QuestionBank,
    rng: StdRng,
    quiz: Quiz,
    current: usize,
    cursor: usize,
    flagged: HashSet<usize>,
    started_at: Option<Instant>,
    result: Option<ExamResult>,
    review_filter: ReviewFilter,
    result_scroll: usize,
}

impl App {
    pub fn new(bank: QuestionBank, mut rng: StdRng) -> Result<Self, ValidationError> {
        let quiz = bank.start_quiz(&mut rng)?;

        Ok(Self {
            state: AppState::Welcome,
            bank,
            rng,
            quiz,
            current: 0,
            cursor: 0,
            flagged: HashSet::new(),
            started_at: None,
            result: None,
            review_filter: ReviewFilter::default(),
            result_scroll: 0,
        })
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn exam(&self) -> &ExamConfig {
        &self.bank.exam
    }

    pub fn current_item(&self) -> &InlineCheck {
        &self.quiz.items()[self.current]
    }

    pub fn current_question_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn result(&self) -> Option<&ExamResult> {
        self.result.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn review_filter(&self) -> ReviewFilter {
        self.review_filter
    }

    pub fn is_flagged(&self, position: usize) -> bool {
        self.flagged.contains(&position)
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    /// Positions the result review lists under the current filter.
    pub fn reviewed_positions(&self) -> Vec<usize> {
        self.quiz
            .items()
            .iter()
            .enumerate()
            .filter(|(position, item)| self.review_filter.matches(item, self.is_flagged(*position)))
            .map(|(position, _)| position)
            .collect()
    }

    pub fn start_quiz(&mut self, now: Instant) {
        self.state = AppState::Quiz;
        self.started_at = Some(now);
        info!(
            session_id = %self.quiz.session_id(),
            title = %self.quiz.title(),
            questions = self.quiz.len(),
            "quiz started"
        );
    }

    /// Time left on a timed exam.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let limit = self.bank.exam.time_limit().filter(|_| self.bank.exam.is_timed())?;
        let elapsed = self
            .started_at
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default();
        Some(limit.saturating_sub(elapsed))
    }

    /// Ends a timed exam once its clock has run out.
    pub fn tick(&mut self, now: Instant) {
        if self.state == AppState::Quiz && self.remaining(now) == Some(Duration::ZERO) {
            self.finish(true);
        }
    }

    pub fn select_next_option(&mut self) {
        if self.current_item().is_answered() {
            return;
        }
        let len = self.current_item().question().options().len();
        self.cursor = (self.cursor + 1) % len;
    }

    pub fn select_previous_option(&mut self) {
        if self.current_item().is_answered() {
            return;
        }
        let len = self.current_item().question().options().len();
        self.cursor = (self.cursor + len - 1) % len;
    }

    /// Answer with the option under the cursor, or move on once answered.
    pub fn confirm(&mut self) {
        if self.current_item().is_answered() {
            self.advance();
            return;
        }

        let id = self.current_item().question().id().clone();
        if let Err(err) = self.quiz.select_answer(&id, self.cursor) {
            warn!(session_id = %self.quiz.session_id(), error = %err, "selection rejected");
        }
    }

    /// Next unanswered question after the current one, wrapping round;
    /// the result screen when none is left.
    pub fn advance(&mut self) {
        let len = self.quiz.len();
        let next = (1..=len)
            .map(|offset| (self.current + offset) % len)
            .find(|&position| !self.quiz.items()[position].is_answered());

        match next {
            Some(position) => self.show_question(position),
            None => self.finish(false),
        }
    }

    /// Flag or unflag the current question. Answered questions can be flagged too.
    pub fn toggle_flag(&mut self) {
        if !self.flagged.remove(&self.current) {
            self.flagged.insert(self.current);
        }
    }

    /// Jump to the next flagged question after the current one, wrapping round.
    pub fn next_flagged(&mut self) {
        let len = self.quiz.len();
        let next = (1..=len)
            .map(|offset| (self.current + offset) % len)
            .find(|position| self.flagged.contains(position));

        if let Some(position) = next {
            self.show_question(position);
        }
    }

    pub fn next_question(&mut self) {
        if self.current + 1 < self.quiz.len() {
            self.show_question(self.current + 1);
        }
    }

    pub fn previous_question(&mut self) {
        if self.current > 0 {
            self.show_question(self.current - 1);
        }
    }

    fn show_question(&mut self, position: usize) {
        self.current = position;
        self.cursor = self.quiz.items()[position].selected_index().unwrap_or(0);
    }

    fn finish(&mut self, timed_out: bool) {
        let result = ExamResult::from_quiz(&self.quiz, self.bank.exam.pass_threshold, timed_out);
        info!(
            session_id = %self.quiz.session_id(),
            score = result.score,
            total = result.total,
            passed = ?result.passed(),
            timed_out,
            flagged = self.flagged.len(),
            "quiz finished"
        );

        self.result = Some(result);
        self.review_filter = ReviewFilter::default();
        self.result_scroll = 0;
        self.state = AppState::Result;
    }

    pub fn cycle_review_filter(&mut self) {
        self.review_filter = self.review_filter.next();
        self.result_scroll = 0;
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.reviewed_positions().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Start over with a fresh session; shuffled exams get a new draw.
    pub fn retake(&mut self) {
        self.quiz = if self.bank.exam.shuffle {
            match self.bank.start_quiz(&mut self.rng) {
                Ok(quiz) => quiz,
                Err(err) => {
                    warn!(error = %err, "redraw failed, retaking the same questions");
                    self.quiz.retake()
                }
            }
        } else {
            self.quiz.retake()
        };

        self.state = AppState::Welcome;
        self.current = 0;
        self.cursor = 0;
        self.flagged.clear();
        self.started_at = None;
        self.result = None;
        self.review_filter = ReviewFilter::default();
        self.result_scroll = 0;
    }
}
