use crate::battery::NO_ANSWER_FOUND;

/// Black-box scorer over a predicted/reference answer pair. Kept behind a
/// trait so the metric can be swapped without touching the harness loop.
pub trait Scorer {
    fn name(&self) -> &'static str;
    fn score(&self, predicted: &str, reference: &str) -> f64;
}

/// Applies the no-answer override: the fixed "no answer found" string scores
/// exactly 0 no matter what the underlying scorer would compute.
pub fn score_with_override(scorer: &dyn Scorer, predicted: &str, reference: &str) -> f64 {
    if predicted == NO_ANSWER_FOUND {
        return 0.0;
    }
    scorer.score(predicted, reference)
}

/// Unigram-overlap F1 over lowercased alphanumeric tokens.
pub struct UnigramF1;

impl Scorer for UnigramF1 {
    fn name(&self) -> &'static str {
        "unigram-f1"
    }

    fn score(&self, predicted: &str, reference: &str) -> f64 {
        let predicted_tokens = tokenize(predicted);
        let reference_tokens = tokenize(reference);
        if predicted_tokens.is_empty() || reference_tokens.is_empty() {
            return 0.0;
        }
        let mut reference_counts = std::collections::HashMap::new();
        for token in &reference_tokens {
            *reference_counts.entry(token.as_str()).or_insert(0usize) += 1;
        }
        let mut overlap = 0usize;
        for token in &predicted_tokens {
            if let Some(remaining) = reference_counts.get_mut(token.as_str()) {
                if *remaining > 0 {
                    *remaining -= 1;
                    overlap += 1;
                }
            }
        }
        if overlap == 0 {
            return 0.0;
        }
        let precision = overlap as f64 / predicted_tokens.len() as f64;
        let recall = overlap as f64 / reference_tokens.len() as f64;
        2.0 * precision * recall / (precision + recall)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    struct AlwaysOne;

    impl Scorer for AlwaysOne {
        fn name(&self) -> &'static str {
            "always-one"
        }

        fn score(&self, _predicted: &str, _reference: &str) -> f64 {
            1.0
        }
    }

    #[test]
    fn no_answer_found_scores_exactly_zero() {
        let score = score_with_override(&AlwaysOne, NO_ANSWER_FOUND, "2 errors");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn real_answers_fall_through_to_the_scorer() {
        let score = score_with_override(&AlwaysOne, "2 errors", "2 errors");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn identical_answers_score_one() {
        let score = UnigramF1.score("2 errors", "2 errors");
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_answers_score_zero() {
        assert_eq!(UnigramF1.score("ten drivers", "redis timeout"), 0.0);
    }

    #[test]
    fn partial_overlap_lands_between() {
        let score = UnigramF1.score("the redis timeout error", "redis timeout");
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn empty_strings_do_not_divide_by_zero() {
        assert_eq!(UnigramF1.score("", "2 errors"), 0.0);
        assert_eq!(UnigramF1.score("2 errors", ""), 0.0);
    }
}
