//! Drawing an attempt's questions from a bank.
//!
//! These are the only places question order changes; a [`crate::Quiz`]
//! always keeps the order it is given.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Question;

/// The first `count` questions, in authored order.
pub fn select_in_order(bank: &[Question], count: usize) -> Vec<Question> {
    bank.iter().take(count).cloned().collect()
}

/// `count` distinct questions picked uniformly, in random order.
pub fn select_random<R: Rng + ?Sized>(
    bank: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    bank.choose_multiple(rng, count.min(bank.len()))
        .cloned()
        .collect()
}

/// `count` distinct questions spread evenly over `categories`.
///
/// Each category gets `count / categories.len()` questions, the first
/// `count % categories.len()` categories one more. A category that runs
/// short is topped up from everything not yet drawn. Repeated category
/// names count once. The result is shuffled.
pub fn select_balanced<R: Rng + ?Sized>(
    bank: &[Question],
    count: usize,
    categories: &[String],
    rng: &mut R,
) -> Vec<Question> {
    let mut categories: Vec<&str> = categories.iter().map(String::as_str).collect();
    let mut seen = HashSet::with_capacity(categories.len());
    categories.retain(|category| seen.insert(*category));

    if categories.is_empty() {
        return select_random(bank, count, rng);
    }

    let count = count.min(bank.len());
    let per_category = count / categories.len();
    let remainder = count % categories.len();

    let mut picked: Vec<&Question> = Vec::with_capacity(count);
    let mut leftovers: Vec<&Question> = bank
        .iter()
        .filter(|q| !q.category().is_some_and(|c| categories.contains(&c)))
        .collect();

    for (i, category) in categories.iter().enumerate() {
        let quota = per_category + usize::from(i < remainder);
        let mut pool: Vec<&Question> = bank
            .iter()
            .filter(|q| q.category() == Some(*category))
            .collect();
        pool.shuffle(rng);

        let take = quota.min(pool.len());
        leftovers.extend(pool.drain(take..));
        picked.extend(pool);
    }

    let shortfall = count - picked.len();
    if shortfall > 0 {
        leftovers.shuffle(rng);
        picked.extend(leftovers.into_iter().take(shortfall));
    }

    picked.shuffle(rng);
    picked.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn bank(layout: &[(&str, usize)]) -> Vec<Question> {
        let mut questions = Vec::new();
        for (category, n) in layout {
            for i in 0..*n {
                let id = format!("{}-{}", category, i);
                let q = Question::new(
                    id,
                    "Prompt",
                    vec!["a".to_string(), "b".to_string()],
                    0,
                    "",
                )
                .unwrap()
                .with_category(*category);
                questions.push(q);
            }
        }
        questions
    }

    fn categories(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn per_category(questions: &[Question]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for q in questions {
            *counts.entry(q.category().unwrap_or("").to_string()).or_insert(0) += 1;
        }
        counts
    }

    fn distinct(questions: &[Question]) -> bool {
        let ids: HashSet<_> = questions.iter().map(|q| q.id().clone()).collect();
        ids.len() == questions.len()
    }

    #[test]
    fn test_in_order_takes_prefix() {
        let bank = bank(&[("A", 5)]);
        let picked = select_in_order(&bank, 3);
        let ids: Vec<_> = picked.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, vec!["A-0", "A-1", "A-2"]);
    }

    #[test]
    fn test_random_is_distinct_and_capped() {
        let bank = bank(&[("A", 5)]);
        let mut rng = StdRng::seed_from_u64(7);
        let picked = select_random(&bank, 10, &mut rng);
        assert_eq!(picked.len(), 5);
        assert!(distinct(&picked));
    }

    #[test]
    fn test_balanced_even_split() {
        let bank = bank(&[("A", 40), ("B", 40), ("C", 40), ("D", 40), ("E", 40)]);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = select_balanced(&bank, 20, &categories(&["A", "B", "C", "D", "E"]), &mut rng);

        assert_eq!(picked.len(), 20);
        assert!(distinct(&picked));
        for n in per_category(&picked).values() {
            assert_eq!(*n, 4);
        }
    }

    #[test]
    fn test_balanced_remainder_goes_to_first_categories() {
        let bank = bank(&[("A", 10), ("B", 10), ("C", 10)]);
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_balanced(&bank, 8, &categories(&["A", "B", "C"]), &mut rng);

        let counts = per_category(&picked);
        assert_eq!(counts["A"], 3);
        assert_eq!(counts["B"], 3);
        assert_eq!(counts["C"], 2);
    }

    #[test]
    fn test_balanced_fills_shortfall() {
        let bank = bank(&[("A", 1), ("B", 10)]);
        let mut rng = StdRng::seed_from_u64(3);
        let picked = select_balanced(&bank, 6, &categories(&["A", "B"]), &mut rng);

        assert_eq!(picked.len(), 6);
        assert!(distinct(&picked));
        let counts = per_category(&picked);
        assert_eq!(counts["A"], 1);
        assert_eq!(counts["B"], 5);
    }

    #[test]
    fn test_balanced_repeated_category_draws_each_question_once() {
        let bank = bank(&[("A", 4)]);
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_balanced(&bank, 4, &categories(&["A", "A"]), &mut rng);

        assert_eq!(picked.len(), 4);
        assert!(distinct(&picked));
    }

    #[test]
    fn test_balanced_is_deterministic_for_seed() {
        let bank = bank(&[("A", 10), ("B", 10)]);
        let cats = categories(&["A", "B"]);
        let first = select_balanced(&bank, 6, &cats, &mut StdRng::seed_from_u64(9));
        let second = select_balanced(&bank, 6, &cats, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }
}
