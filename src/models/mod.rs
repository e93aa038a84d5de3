mod question;
mod state;

pub use question::{Difficulty, Question, QuestionId, RawQuestion, ValidationError};
pub use state::AppState;
