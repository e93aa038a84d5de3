//! Self-check state machines.
//!
//! [`InlineCheck`] is a single question with immediate feedback; [`Quiz`]
//! sequences several of them and reports an aggregate score.

mod inline_check;
mod session;

pub use inline_check::{CheckState, Feedback, InlineCheck, Selection};
pub use session::Quiz;

use crate::models::QuestionId;

/// A selection that a correctly wired front end never makes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("option {index} is out of range for question {question} ({len} options)")]
    InvalidSelection {
        question: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("question {0} is not part of this quiz")]
    UnknownQuestion(QuestionId),
}
