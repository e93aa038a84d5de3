use std::fmt;

use crate::quiz::InlineCheck;

/// Which questions the result review lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReviewFilter {
    #[default]
    All,
    Correct,
    Incorrect,
    Unanswered,
    Flagged,
}

impl ReviewFilter {
    /// The filter after this one, wrapping back to `All`.
    pub fn next(self) -> Self {
        match self {
            ReviewFilter::All => ReviewFilter::Correct,
            ReviewFilter::Correct => ReviewFilter::Incorrect,
            ReviewFilter::Incorrect => ReviewFilter::Unanswered,
            ReviewFilter::Unanswered => ReviewFilter::Flagged,
            ReviewFilter::Flagged => ReviewFilter::All,
        }
    }

    pub fn matches(self, item: &InlineCheck, flagged: bool) -> bool {
        match self {
            ReviewFilter::All => true,
            ReviewFilter::Correct => item.is_correct() == Some(true),
            ReviewFilter::Incorrect => item.is_correct() == Some(false),
            ReviewFilter::Unanswered => !item.is_answered(),
            ReviewFilter::Flagged => flagged,
        }
    }
}

impl fmt::Display for ReviewFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReviewFilter::All => "all",
            ReviewFilter::Correct => "correct",
            ReviewFilter::Incorrect => "incorrect",
            ReviewFilter::Unanswered => "unanswered",
            ReviewFilter::Flagged => "flagged",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    fn item(correct: usize) -> InlineCheck {
        let question = Question::new("q", "Pick", vec!["a".into(), "b".into()], correct, "").unwrap();
        InlineCheck::new(question)
    }

    #[test]
    fn test_cycle_returns_to_all() {
        let mut filter = ReviewFilter::default();
        let mut seen = vec![filter];
        for _ in 0..5 {
            filter = filter.next();
            seen.push(filter);
        }
        assert_eq!(
            seen,
            vec![
                ReviewFilter::All,
                ReviewFilter::Correct,
                ReviewFilter::Incorrect,
                ReviewFilter::Unanswered,
                ReviewFilter::Flagged,
                ReviewFilter::All,
            ]
        );
    }

    #[test]
    fn test_matches() {
        let mut right = item(0);
        right.select_option(0).unwrap();
        let mut wrong = item(0);
        wrong.select_option(1).unwrap();
        let open = item(0);

        assert!(ReviewFilter::Correct.matches(&right, false));
        assert!(!ReviewFilter::Correct.matches(&wrong, false));
        assert!(ReviewFilter::Incorrect.matches(&wrong, false));
        assert!(!ReviewFilter::Incorrect.matches(&open, false));
        assert!(ReviewFilter::Unanswered.matches(&open, false));
        assert!(ReviewFilter::Flagged.matches(&right, true));
        assert!(!ReviewFilter::Flagged.matches(&open, false));
        assert!(ReviewFilter::All.matches(&open, false));
    }
}
