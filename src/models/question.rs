use std::fmt;

use serde::{Deserialize, Serialize};

/// Smallest number of options a question may offer.
pub const MIN_OPTIONS: usize = 2;

/// Stable identifier of a question, unique within one quiz.
///
/// Authored banks use either integers or slugs; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => QuestionId::from(n),
            RawId::Text(s) => QuestionId::from(s),
        })
    }
}

/// How demanding a question is, as tagged by the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

/// Authoring defects found while building questions or quizzes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("question {id}: prompt is empty")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id}: needs at least 2 options, found {found}")]
    TooFewOptions { id: QuestionId, found: usize },

    #[error("question {id}: correct index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("quiz {title:?} has no questions")]
    EmptyQuiz { title: String },

    #[error("question id {id} appears more than once")]
    DuplicateId { id: QuestionId },

    #[error("question {id}: category {category:?} is not one of the exam categories")]
    UnknownCategory { id: QuestionId, category: String },

    #[error("exam category {category:?} is listed more than once")]
    DuplicateCategory { category: String },

    #[error("exam draws zero questions")]
    ZeroQuestionCount,

    #[error("pass threshold {threshold}% is above 100%")]
    PassThresholdOutOfRange { threshold: u8 },
}

/// A validated multiple-choice question.
///
/// Fields are private so the option/correct-index invariant can only be
/// established through [`Question::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "question")]
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
}

impl Question {
    pub fn new(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let prompt = prompt.into();

        if prompt.trim().is_empty() {
            return Err(ValidationError::EmptyPrompt { id });
        }

        if options.len() < MIN_OPTIONS {
            return Err(ValidationError::TooFewOptions {
                id,
                found: options.len(),
            });
        }

        if correct_index >= options.len() {
            return Err(ValidationError::CorrectIndexOutOfRange {
                id,
                index: correct_index,
                len: options.len(),
            });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
            explanation: explanation.into(),
            category: None,
            section: None,
            topic: None,
            difficulty: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Question as it appears in an authored bank, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: QuestionId,
    #[serde(alias = "prompt")]
    pub question: String,
    pub options: Vec<String>,
    #[serde(alias = "correctAnswer")]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

impl TryFrom<RawQuestion> for Question {
    type Error = ValidationError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let mut question = Question::new(
            raw.id,
            raw.question,
            raw.options,
            raw.correct_index,
            raw.explanation.unwrap_or_default(),
        )?;
        question.category = raw.category;
        question.section = raw.section;
        question.topic = raw.topic;
        question.difficulty = raw.difficulty;
        Ok(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_question() {
        let q = Question::new("q1", "Pick B", options(&["A", "B"]), 1, "B it is").unwrap();
        assert_eq!(q.id().as_str(), "q1");
        assert_eq!(q.options(), &["A".to_string(), "B".to_string()]);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_too_few_options() {
        let err = Question::new("q1", "Only one", options(&["A"]), 0, "").unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooFewOptions {
                id: "q1".into(),
                found: 1
            }
        );
    }

    #[test]
    fn test_correct_index_out_of_range() {
        let err = Question::new(7u64, "Pick", options(&["A", "B", "C"]), 3, "").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::CorrectIndexOutOfRange { index: 3, len: 3, .. }
        ));
        assert!(err.to_string().contains("question 7"));
    }

    #[test]
    fn test_empty_prompt() {
        let err = Question::new("q1", "   ", options(&["A", "B"]), 0, "").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyPrompt { .. }));
    }

    #[test]
    fn test_raw_question_accepts_both_index_keys() {
        let json = r#"[
            {"id": 1, "question": "One?", "options": ["a", "b"], "correctAnswer": 1},
            {"id": "slug", "prompt": "Two?", "options": ["a", "b"], "correctIndex": 0,
             "explanation": "because", "difficulty": "advanced", "category": "Safety"}
        ]"#;
        let raw: Vec<RawQuestion> = serde_json::from_str(json).unwrap();
        let questions: Vec<Question> = raw
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(questions[0].id().as_str(), "1");
        assert_eq!(questions[0].correct_index(), 1);
        assert_eq!(questions[0].explanation(), "");
        assert_eq!(questions[1].id().as_str(), "slug");
        assert_eq!(questions[1].difficulty(), Some(Difficulty::Advanced));
        assert_eq!(questions[1].category(), Some("Safety"));
    }
}
