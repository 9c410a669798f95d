use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::classifiers::{ClassLabels, ClassTokens, NaiveBayes};

#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Failed to save the confusion matrix: {0}")]
    SaveError(io::Error),

    #[error("Failed to serialize the confusion matrix: {0}")]
    SerializationError(serde_json::Error),
}

/// Counts of (true label, predicted label) pairs.
///
/// Rows are true labels, columns predicted labels, both in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    pub fn new(labels: &ClassLabels) -> Self {
        let n = labels.len();
        ConfusionMatrix {
            labels: labels.as_slice().to_vec(),
            counts: vec![vec![0; n]; n],
        }
    }

    fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Count one sample. Returns `false` if either label is unknown.
    pub fn record(&mut self, truth: &str, predicted: &str) -> bool {
        match (self.index_of(truth), self.index_of(predicted)) {
            (Some(row), Some(col)) => {
                self.counts[row][col] += 1;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, truth: &str, predicted: &str) -> u64 {
        match (self.index_of(truth), self.index_of(predicted)) {
            (Some(row), Some(col)) => self.counts[row][col],
            _ => 0,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The raw count matrix, rows = true labels.
    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    fn correct(&self) -> u64 {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// Share of samples on the diagonal; `None` for an empty matrix.
    pub fn accuracy(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.correct() as f64 / total as f64),
        }
    }

    /// Share of `label`'s samples predicted as `label`.
    pub fn recall(&self, label: &str) -> Option<f64> {
        let idx = self.index_of(label)?;
        let row = &self.counts[idx];
        let support: u64 = row.iter().sum();
        (support > 0).then(|| row[idx] as f64 / support as f64)
    }

    /// Save the matrix as JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvaluationError> {
        let serialized =
            serde_json::to_string_pretty(self).map_err(EvaluationError::SerializationError)?;
        std::fs::write(path, serialized).map_err(EvaluationError::SaveError)?;
        Ok(())
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(String::len)
            .chain(self.counts.iter().flatten().map(|c| c.to_string().len()))
            .max()
            .unwrap_or(0)
            .max("true \\ pred".len());

        write!(f, "{:>width$}", "true \\ pred", width = width)?;
        for label in &self.labels {
            write!(f, " {:>width$}", label, width = width)?;
        }
        writeln!(f)?;
        for (label, row) in self.labels.iter().zip(&self.counts) {
            write!(f, "{:>width$}", label, width = width)?;
            for count in row {
                write!(f, " {:>width$}", count, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Classify every distinct held-out token once and tabulate the outcome.
///
/// Tokens are keyed in first-seen order (class order, then corpus order).
/// A token held out by several classes is scored under the last of them.
pub fn evaluate(test: &ClassTokens, model: &NaiveBayes) -> ConfusionMatrix {
    let mut samples: Vec<(&str, &str)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for (truth, tokens) in test.iter() {
        if model.labels().index_of(truth).is_none() {
            warn!("Skipping {} held-out tokens of unknown class {}", tokens.len(), truth);
            continue;
        }
        for token in tokens {
            let token = token.as_str();
            match positions.get(token) {
                Some(&pos) => samples[pos].1 = truth,
                None => {
                    positions.insert(token, samples.len());
                    samples.push((token, truth));
                }
            }
        }
    }
    debug!("Evaluating {} distinct held-out tokens", samples.len());

    let mut matrix = ConfusionMatrix::new(model.labels());
    for (token, truth) in samples {
        matrix.record(truth, model.predict(token));
    }
    matrix
}
