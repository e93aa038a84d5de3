use crate::quiz::Quiz;

/// Correct answers within one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: String,
    pub correct: usize,
    pub total: usize,
}

/// Outcome of a finished (or timed-out) attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamResult {
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub timed_out: bool,
    pub pass_threshold: Option<u8>,
    /// In order of first appearance; uncategorised questions are left out.
    pub categories: Vec<CategoryScore>,
}

impl ExamResult {
    /// Unanswered questions count as wrong.
    pub fn from_quiz(quiz: &Quiz, pass_threshold: Option<u8>, timed_out: bool) -> Self {
        let mut categories: Vec<CategoryScore> = Vec::new();
        for item in quiz.items() {
            let Some(category) = item.question().category() else {
                continue;
            };

            let index = match categories.iter().position(|c| c.category == category) {
                Some(i) => i,
                None => {
                    categories.push(CategoryScore {
                        category: category.to_string(),
                        correct: 0,
                        total: 0,
                    });
                    categories.len() - 1
                }
            };
            let entry = &mut categories[index];
            entry.total += 1;
            if item.is_correct() == Some(true) {
                entry.correct += 1;
            }
        }

        Self {
            score: quiz.score(),
            total: quiz.len(),
            answered: quiz.answered_count(),
            timed_out,
            pass_threshold,
            categories,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.score as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// `None` when no pass mark is configured.
    pub fn passed(&self) -> Option<bool> {
        self.pass_threshold
            .map(|threshold| self.score * 100 >= usize::from(threshold) * self.total)
    }
}
