use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;

use crate::models::ValidationError;

/// Mock-exam settings carried in a question bank's `exam` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamConfig {
    #[serde(default)]
    pub exam_id: Option<String>,
    #[serde(alias = "title")]
    pub exam_title: String,
    /// Questions drawn per attempt; the whole bank when absent.
    #[serde(default)]
    pub total_questions: Option<usize>,
    /// Seconds.
    #[serde(default)]
    pub time_limit: Option<u64>,
    /// Percentage needed to pass.
    #[serde(default)]
    pub pass_threshold: Option<u8>,
    /// Categories to balance the draw across.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Draw questions in random order instead of authored order.
    #[serde(default)]
    pub shuffle: bool,
}

impl ExamConfig {
    /// Settings for a plain quiz: every question, authored order, no limits.
    pub fn plain(title: impl Into<String>) -> Self {
        Self {
            exam_title: title.into(),
            ..Self::default()
        }
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit.map(Duration::from_secs)
    }

    pub fn is_timed(&self) -> bool {
        self.time_limit.is_some_and(|secs| secs > 0)
    }

    /// Settings that would stop an attempt from starting or being passed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_questions == Some(0) {
            return Err(ValidationError::ZeroQuestionCount);
        }

        if let Some(threshold) = self.pass_threshold.filter(|t| *t > 100) {
            return Err(ValidationError::PassThresholdOutOfRange { threshold });
        }

        let mut seen = HashSet::with_capacity(self.categories.len());
        for category in &self.categories {
            if !seen.insert(category.as_str()) {
                return Err(ValidationError::DuplicateCategory {
                    category: category.clone(),
                });
            }
        }

        Ok(())
    }
}
