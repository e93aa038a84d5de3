mod loader;

pub use loader::{load_bank, BankError, LoadError, QuestionBank};
