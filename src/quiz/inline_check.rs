use crate::models::Question;

use super::SelectionError;

/// Answer state of a single self-check item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unanswered,
    /// Terminal; the first selection sticks.
    Answered { selected: usize },
}

/// What a call to [`InlineCheck::select_option`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The selection was recorded and feedback is now revealed.
    Recorded,
    /// An earlier answer was already recorded; nothing changed.
    AlreadyAnswered,
}

/// Feedback revealed once an item has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub selected: usize,
    pub correct: bool,
    pub explanation: &'a str,
}

/// A single inline multiple-choice check with immediate feedback.
#[derive(Debug, Clone)]
pub struct InlineCheck {
    question: Question,
    state: CheckState,
}

impl InlineCheck {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            state: CheckState::Unanswered,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn state(&self) -> CheckState {
        self.state
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self.state {
            CheckState::Unanswered => None,
            CheckState::Answered { selected } => Some(selected),
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.state, CheckState::Answered { .. })
    }

    /// `None` until answered.
    pub fn is_correct(&self) -> Option<bool> {
        self.selected_index()
            .map(|selected| self.question.is_correct(selected))
    }

    /// Record `index` as the answer.
    ///
    /// The index is checked against the options even when the item is
    /// already answered, so a miswired caller is reported either way.
    pub fn select_option(&mut self, index: usize) -> Result<Selection, SelectionError> {
        let len = self.question.options().len();
        if index >= len {
            return Err(SelectionError::InvalidSelection {
                question: self.question.id().clone(),
                index,
                len,
            });
        }

        match self.state {
            CheckState::Answered { .. } => Ok(Selection::AlreadyAnswered),
            CheckState::Unanswered => {
                self.state = CheckState::Answered { selected: index };
                Ok(Selection::Recorded)
            }
        }
    }

    /// Correctness and explanation, shown for right and wrong answers alike.
    pub fn feedback(&self) -> Option<Feedback<'_>> {
        self.selected_index().map(|selected| Feedback {
            selected,
            correct: self.question.is_correct(selected),
            explanation: self.question.explanation(),
        })
    }
}
