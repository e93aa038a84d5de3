use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::exam::{select_balanced, select_in_order, select_random, ExamConfig};
use crate::models::{Question, RawQuestion, ValidationError};
use crate::quiz::Quiz;

/// Problems with the contents of a bank, independent of where it came from.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Bank { path: PathBuf, source: BankError },
}

#[derive(Deserialize)]
struct BankFile {
    #[serde(default)]
    exam: Option<ExamConfig>,
    questions: Vec<RawQuestion>,
}

/// Validated questions plus the settings for drawing an attempt from them.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    pub exam: ExamConfig,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Parse a bank; a bare array of questions is titled `default_title`.
    pub fn from_json_str(json: &str, default_title: &str) -> Result<Self, BankError> {
        let value: Value = serde_json::from_str(json)?;

        let (exam, raw) = if value.is_array() {
            let raw: Vec<RawQuestion> = serde_json::from_value(value)?;
            (ExamConfig::plain(default_title), raw)
        } else {
            let file: BankFile = serde_json::from_value(value)?;
            let exam = file
                .exam
                .unwrap_or_else(|| ExamConfig::plain(default_title));
            (exam, file.questions)
        };

        let questions = validate(&exam, raw)?;
        Ok(Self { exam, questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a loaded bank.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions for one attempt.
    ///
    /// Authored order unless the exam asks for shuffling, in which case the
    /// draw is balanced across the configured categories.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        let count = self
            .exam
            .total_questions
            .unwrap_or(self.questions.len())
            .min(self.questions.len());

        if !self.exam.shuffle {
            select_in_order(&self.questions, count)
        } else if self.exam.categories.is_empty() {
            select_random(&self.questions, count, rng)
        } else {
            select_balanced(&self.questions, count, &self.exam.categories, rng)
        }
    }

    /// A fresh quiz session over a new draw.
    pub fn start_quiz<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Quiz, ValidationError> {
        Quiz::new(self.exam.exam_title.clone(), self.draw(rng))
    }
}

fn validate(exam: &ExamConfig, raw: Vec<RawQuestion>) -> Result<Vec<Question>, ValidationError> {
    exam.validate()?;

    if raw.is_empty() {
        return Err(ValidationError::EmptyQuiz {
            title: exam.exam_title.clone(),
        });
    }

    let mut seen = HashSet::with_capacity(raw.len());
    let mut questions = Vec::with_capacity(raw.len());

    for raw_question in raw {
        let question = Question::try_from(raw_question)?;

        if !seen.insert(question.id().clone()) {
            return Err(ValidationError::DuplicateId {
                id: question.id().clone(),
            });
        }

        if let Some(category) = question.category() {
            if !exam.categories.is_empty() && !exam.categories.iter().any(|c| c == category) {
                return Err(ValidationError::UnknownCategory {
                    id: question.id().clone(),
                    category: category.to_string(),
                });
            }
        }

        questions.push(question);
    }

    Ok(questions)
}

/// Load and validate a question bank from a JSON file.
pub fn load_bank<P: AsRef<Path>>(path: P) -> Result<QuestionBank, LoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading question bank");

    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let default_title = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Quiz".to_string());

    let bank = QuestionBank::from_json_str(&json, &default_title).map_err(|source| {
        LoadError::Bank {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        path = %path.display(),
        title = %bank.exam.exam_title,
        questions = bank.len(),
        "question bank loaded"
    );
    Ok(bank)
}
