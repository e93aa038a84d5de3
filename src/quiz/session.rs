use std::collections::HashMap;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Question, QuestionId, ValidationError};

use super::{InlineCheck, Selection, SelectionError};

/// An ordered set of self-check items answered as one assessment.
///
/// Questions keep the order they were given in. A session is never reset;
/// [`Quiz::retake`] builds a fresh one over the same questions.
#[derive(Debug, Clone)]
pub struct Quiz {
    session_id: Uuid,
    title: String,
    items: Vec<InlineCheck>,
    positions: HashMap<QuestionId, usize>,
}

impl Quiz {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, ValidationError> {
        let title = title.into();
        if questions.is_empty() {
            return Err(ValidationError::EmptyQuiz { title });
        }

        let mut positions = HashMap::with_capacity(questions.len());
        for (position, question) in questions.iter().enumerate() {
            if positions.insert(question.id().clone(), position).is_some() {
                return Err(ValidationError::DuplicateId {
                    id: question.id().clone(),
                });
            }
        }

        let session_id = Uuid::new_v4();
        debug!(%session_id, %title, questions = questions.len(), "quiz session created");

        Ok(Self {
            session_id,
            title,
            items: questions.into_iter().map(InlineCheck::new).collect(),
            positions,
        })
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; a quiz holds at least one question.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[InlineCheck] {
        &self.items
    }

    pub fn item(&self, position: usize) -> Option<&InlineCheck> {
        self.items.get(position)
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.items.iter().map(InlineCheck::question)
    }

    pub fn position_of(&self, id: &QuestionId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Answer the question `id`; later answers to the same question are ignored.
    pub fn select_answer(
        &mut self,
        id: &QuestionId,
        index: usize,
    ) -> Result<Selection, SelectionError> {
        let position = self
            .position_of(id)
            .ok_or_else(|| SelectionError::UnknownQuestion(id.clone()))?;

        let outcome = self.items[position].select_option(index)?;
        match outcome {
            Selection::Recorded => debug!(
                session_id = %self.session_id,
                question = %id,
                index,
                correct = self.items[position].is_correct().unwrap_or(false),
                "answer recorded"
            ),
            Selection::AlreadyAnswered => warn!(
                session_id = %self.session_id,
                question = %id,
                index,
                "question already answered, selection ignored"
            ),
        }

        Ok(outcome)
    }

    pub fn selected(&self, id: &QuestionId) -> Option<usize> {
        self.position_of(id)
            .and_then(|position| self.items[position].selected_index())
    }

    pub fn answered_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_answered()).count()
    }

    /// Running count of correct answers.
    pub fn score(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.is_correct() == Some(true))
            .count()
    }

    pub fn completed(&self) -> bool {
        self.items.iter().all(InlineCheck::is_answered)
    }

    /// The score, once every question has been answered.
    pub fn final_score(&self) -> Option<usize> {
        self.completed().then(|| self.score())
    }

    pub fn first_unanswered(&self) -> Option<usize> {
        self.items.iter().position(|item| !item.is_answered())
    }

    /// A fresh, unanswered session over the same questions.
    pub fn retake(&self) -> Quiz {
        let session_id = Uuid::new_v4();
        debug!(previous = %self.session_id, %session_id, "quiz retaken");

        Quiz {
            session_id,
            title: self.title.clone(),
            items: self
                .items
                .iter()
                .map(|item| InlineCheck::new(item.question().clone()))
                .collect(),
            positions: self.positions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: usize) -> Question {
        let options = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        Question::new(id, format!("Question {}", id), options, correct, "Explained.").unwrap()
    }

    fn quiz(correct: &[usize]) -> Quiz {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| question(&format!("q{}", i + 1), *c))
            .collect();
        Quiz::new("Section 4 Knowledge Check", questions).unwrap()
    }

    #[test]
    fn test_three_question_scenario() {
        let mut quiz = quiz(&[1, 0, 2]);
        quiz.select_answer(&"q1".into(), 1).unwrap();
        quiz.select_answer(&"q2".into(), 1).unwrap();
        quiz.select_answer(&"q3".into(), 2).unwrap();

        assert!(quiz.completed());
        assert_eq!(quiz.score(), 2);
        assert_eq!(quiz.final_score(), Some(2));

        let correctness: Vec<_> = quiz.items().iter().map(|i| i.is_correct()).collect();
        assert_eq!(correctness, vec![Some(true), Some(false), Some(true)]);
    }

    #[test]
    fn test_completed_only_when_all_answered() {
        let mut quiz = quiz(&[0, 0, 0]);
        assert!(!quiz.completed());

        quiz.select_answer(&"q1".into(), 0).unwrap();
        quiz.select_answer(&"q3".into(), 0).unwrap();
        assert!(!quiz.completed());
        assert_eq!(quiz.final_score(), None);
        assert_eq!(quiz.score(), 2);
        assert_eq!(quiz.first_unanswered(), Some(1));

        quiz.select_answer(&"q2".into(), 3).unwrap();
        assert!(quiz.completed());
        assert_eq!(quiz.first_unanswered(), None);
        assert_eq!(quiz.final_score(), Some(2));
    }

    #[test]
    fn test_answer_is_locked_in() {
        let mut quiz = quiz(&[1]);
        assert_eq!(quiz.select_answer(&"q1".into(), 1), Ok(Selection::Recorded));
        assert_eq!(
            quiz.select_answer(&"q1".into(), 3),
            Ok(Selection::AlreadyAnswered)
        );
        assert_eq!(quiz.selected(&"q1".into()), Some(1));
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn test_unknown_question() {
        let mut quiz = quiz(&[1, 2]);
        let err = quiz.select_answer(&"missing".into(), 0).unwrap_err();
        assert_eq!(err, SelectionError::UnknownQuestion("missing".into()));
        assert_eq!(quiz.answered_count(), 0);
    }

    #[test]
    fn test_invalid_index_leaves_quiz_untouched() {
        let mut quiz = quiz(&[1, 2]);
        assert!(quiz.select_answer(&"q2".into(), 4).is_err());
        assert_eq!(quiz.selected(&"q2".into()), None);
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(matches!(
            Quiz::new("Empty", Vec::new()),
            Err(ValidationError::EmptyQuiz { .. })
        ));

        let err = Quiz::new("Dupes", vec![question("a", 0), question("a", 1)]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { id: "a".into() });
    }

    #[test]
    fn test_order_is_preserved() {
        let quiz = Quiz::new(
            "Ordered",
            vec![question("z", 0), question("a", 0), question("m", 0)],
        )
        .unwrap();
        let ids: Vec<_> = quiz.questions().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_retake_is_a_fresh_session() {
        let mut quiz = quiz(&[0, 1]);
        quiz.select_answer(&"q1".into(), 0).unwrap();

        let retake = quiz.retake();
        assert_ne!(retake.session_id(), quiz.session_id());
        assert_eq!(retake.answered_count(), 0);
        assert_eq!(retake.len(), 2);
        assert_eq!(quiz.selected(&"q1".into()), Some(0));
    }
}
