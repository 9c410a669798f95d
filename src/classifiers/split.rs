use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::classifiers::class_tokens::ClassTokens;

/// Default share of every class held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.1;

#[derive(Error, Debug, PartialEq)]
pub enum SplitError {
    #[error("Test fraction must be within [0, 1], got {0}")]
    InvalidFraction(f64),
}

/// Partitions every class's tokens into training and held-out subsets.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    test_fraction: f64,
}

impl Splitter {
    pub fn new(test_fraction: f64) -> Result<Self, SplitError> {
        if !(0.0..=1.0).contains(&test_fraction) {
            return Err(SplitError::InvalidFraction(test_fraction));
        }
        Ok(Splitter { test_fraction })
    }

    pub fn test_fraction(&self) -> f64 {
        self.test_fraction
    }

    /// Number of leading tokens held out from a class of `n` tokens.
    ///
    /// Halves round to the even neighbour.
    pub fn test_len(&self, n: usize) -> usize {
        ((self.test_fraction * n as f64).round_ties_even() as usize).min(n)
    }

    /// Split into `(train, test)`.
    ///
    /// The first `test_len(n)` tokens of each class are held out. Training
    /// keeps the remaining tokens except those whose value was held out, so
    /// no evaluation word is known to the trained vocabulary.
    pub fn split(&self, corpus: &ClassTokens) -> (ClassTokens, ClassTokens) {
        let mut train = ClassTokens::new(corpus.labels().clone());
        let mut test = ClassTokens::new(corpus.labels().clone());

        for (label, tokens) in corpus.iter() {
            let (held_out, rest) = tokens.split_at(self.test_len(tokens.len()));
            let excluded: HashSet<&str> = held_out.iter().map(String::as_str).collect();
            let kept: Vec<String> = rest
                .iter()
                .filter(|token| !excluded.contains(token.as_str()))
                .cloned()
                .collect();

            debug!(
                "{}: {} tokens -> {} train, {} test",
                label,
                tokens.len(),
                kept.len(),
                held_out.len()
            );
            train.set_tokens(label, kept);
            test.set_tokens(label, held_out.to_vec());
        }

        (train, test)
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Splitter {
            test_fraction: DEFAULT_TEST_FRACTION,
        }
    }
}
