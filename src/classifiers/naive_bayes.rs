use thiserror::Error;
use tracing::{debug, info};

use crate::classifiers::class_tokens::ClassTokens;
use crate::classifiers::labels::ClassLabels;
use crate::classifiers::normalizer::normalize;
use crate::classifiers::vocabulary::VocabularyIndex;


#[derive(Error, Debug, PartialEq, Eq)]
pub enum NaiveBayesError {
    #[error("Total vocabulary size is zero; no class prior can be computed")]
    EmptyVocabulary,

    #[error("Got {indexes} vocabulary indexes for {labels} class labels")]
    LabelMismatch { labels: usize, indexes: usize },

    #[error("Vocabulary capacity must be non-zero")]
    ZeroCapacity,
}

/// Per-class parameters fixed at priming time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassParams {
    pub size: usize,
    pub prior: f64,
}

/// Outcome of one prediction: the winning label and every class's posterior,
/// in declared label order.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<'a> {
    pub label: &'a str,
    pub posteriors: Vec<(&'a str, f64)>,
}

/// A model holding its vocabularies but no priors yet.
///
/// It cannot predict; `prime` turns it into a [`NaiveBayes`].
#[derive(Debug, Clone)]
pub struct UnprimedNaiveBayes {
    labels: ClassLabels,
    indexes: Vec<VocabularyIndex>,
}

impl UnprimedNaiveBayes {
    /// Wrap one index per label, in label order.
    pub fn new(labels: ClassLabels, indexes: Vec<VocabularyIndex>) -> Result<Self, NaiveBayesError> {
        if labels.len() != indexes.len() {
            return Err(NaiveBayesError::LabelMismatch {
                labels: labels.len(),
                indexes: indexes.len(),
            });
        }
        Ok(UnprimedNaiveBayes { labels, indexes })
    }

    /// Build every class's index from its training tokens, all with the same capacity.
    pub fn build(train: &ClassTokens, capacity: usize) -> Result<Self, NaiveBayesError> {
        if capacity == 0 {
            return Err(NaiveBayesError::ZeroCapacity);
        }

        let indexes = train
            .iter()
            .map(|(label, tokens)| {
                let index = VocabularyIndex::build(tokens, capacity);
                let stats = index.bucket_stats();
                debug!(
                    "{}: {} words, {} buckets used, longest chain {}",
                    label,
                    index.len(),
                    stats.occupied,
                    stats.longest_chain
                );
                index
            })
            .collect();

        Self::new(train.labels().clone(), indexes)
    }

    /// Compute vocabulary sizes and priors. Consumes the unprimed model, so
    /// priming happens exactly once.
    pub fn prime(self) -> Result<NaiveBayes, NaiveBayesError> {
        let total: usize = self.indexes.iter().map(VocabularyIndex::len).sum();
        if total == 0 {
            return Err(NaiveBayesError::EmptyVocabulary);
        }

        let params: Vec<ClassParams> = self
            .indexes
            .iter()
            .map(|index| ClassParams {
                size: index.len(),
                prior: index.len() as f64 / total as f64,
            })
            .collect();

        for (label, p) in self.labels.iter().zip(&params) {
            info!("{}: vocabulary {} words, prior {:.4}", label, p.size, p.prior);
        }

        Ok(NaiveBayes {
            labels: self.labels,
            indexes: self.indexes,
            params,
            total_size: total,
        })
    }
}

/// Word-presence Naive Bayes classifier with Laplace smoothing.
///
/// Read-only once primed; `predict` only allocates per-call state, so a
/// shared reference can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    labels: ClassLabels,
    indexes: Vec<VocabularyIndex>,
    params: Vec<ClassParams>,
    total_size: usize,
}

impl NaiveBayes {
    /// Build the indexes from `train` and prime the model.
    pub fn train(train: &ClassTokens, capacity: usize) -> Result<Self, NaiveBayesError> {
        UnprimedNaiveBayes::build(train, capacity)?.prime()
    }

    /// Classify a text
    pub fn predict(&self, text: &str) -> &str {
        self.posteriors(text).label
    }

    /// Posterior of every class for `text`, and the winning label.
    ///
    /// Each token multiplies class k's likelihood by
    /// `(present + 1) / (N + size_k)`; the posterior is
    /// `likelihood_k * prior_k / sum_j(likelihood_j * prior_j)`. The products
    /// are accumulated as sums of logarithms so long texts do not underflow.
    pub fn posteriors(&self, text: &str) -> Prediction<'_> {
        let words = normalize(text);
        let n = self.total_size as f64;

        let mut log_likelihoods = vec![0.0_f64; self.indexes.len()];
        for word in &words {
            for (k, index) in self.indexes.iter().enumerate() {
                let present = if index.contains(word) { 1.0 } else { 0.0 };
                let denominator = n + self.params[k].size as f64;
                log_likelihoods[k] += ((present + 1.0) / denominator).ln();
            }
        }

        // ln(likelihood * prior); an empty class has prior 0 and stays at -inf.
        let log_joint: Vec<f64> = log_likelihoods
            .iter()
            .zip(&self.params)
            .map(|(ll, p)| ll + p.prior.ln())
            .collect();
        let max = log_joint.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let scaled: Vec<f64> = log_joint.iter().map(|lj| (lj - max).exp()).collect();
        let marginal: f64 = scaled.iter().sum();

        let posteriors: Vec<(&str, f64)> = self
            .labels
            .iter()
            .zip(scaled.iter().map(|s| s / marginal))
            .collect();

        // Strictly greater wins, so ties keep the earlier class.
        let mut best = 0;
        for (k, &(_, posterior)) in posteriors.iter().enumerate().skip(1) {
            if posterior > posteriors[best].1 {
                best = k;
            }
        }

        Prediction {
            label: posteriors[best].0,
            posteriors,
        }
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// Parameters of `label`, if it is one of the classes.
    pub fn class_params(&self, label: &str) -> Option<ClassParams> {
        self.labels.index_of(label).map(|idx| self.params[idx])
    }

    /// Combined vocabulary size N over all classes.
    pub fn total_size(&self) -> usize {
        self.total_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::vocabulary::DEFAULT_CAPACITY;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    fn train_set() -> ClassTokens {
        ClassTokens::from_pairs(vec![
            ("English", words("the cat sat")),
            ("French", words("le chat")),
            ("Spanish", words("el gato")),
        ])
        .unwrap()
    }

    fn model() -> NaiveBayes {
        NaiveBayes::train(&train_set(), DEFAULT_CAPACITY).unwrap()
    }

    #[test]
    fn test_priors_follow_vocabulary_sizes() {
        let nb = model();
        assert_eq!(nb.total_size(), 7);
        assert_eq!(nb.class_params("English").unwrap().prior, 3.0 / 7.0);
        assert_eq!(nb.class_params("French").unwrap().prior, 2.0 / 7.0);
        assert_eq!(nb.class_params("Spanish").unwrap().prior, 2.0 / 7.0);
        assert_eq!(nb.class_params("French").unwrap().size, 2);
        assert!(nb.class_params("German").is_none());
    }

    #[test]
    fn test_known_words_pick_their_class() {
        let nb = model();
        assert_eq!(nb.predict("the cat"), "English");
        assert_eq!(nb.predict("Le chat!"), "French");
        assert_eq!(nb.predict("el gato"), "Spanish");
    }

    #[test]
    fn test_empty_text_falls_back_to_priors() {
        let nb = model();
        let prediction = nb.posteriors("");
        assert_eq!(prediction.label, "English");
        for (label, posterior) in &prediction.posteriors {
            let prior = nb.class_params(label).unwrap().prior;
            assert!((posterior - prior).abs() < 1e-12);
        }
        assert_eq!(nb.predict("?? 123 !!"), "English");
    }

    #[test]
    fn test_posteriors_are_a_distribution() {
        let nb = model();
        let long_text = "the cat sat ".repeat(500);
        for text in ["the cat", "le gato", "unknown words only", "", long_text.as_str()] {
            let prediction = nb.posteriors(text);
            let sum: f64 = prediction.posteriors.iter().map(|(_, p)| p).sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum {} for {:?}", sum, text);
            assert!(prediction
                .posteriors
                .iter()
                .all(|(_, p)| (0.0..=1.0).contains(p)));
        }
        assert_eq!(nb.predict(&long_text), "English");
    }

    #[test]
    fn test_ties_go_to_the_first_declared_class() {
        let train = ClassTokens::from_pairs(vec![
            ("Spanish", words("el gato")),
            ("French", words("le chat")),
        ])
        .unwrap();
        let nb = NaiveBayes::train(&train, DEFAULT_CAPACITY).unwrap();

        assert_eq!(nb.predict(""), "Spanish");
        assert_eq!(nb.predict("hola"), "Spanish");

        let swapped = ClassTokens::from_pairs(vec![
            ("French", words("le chat")),
            ("Spanish", words("el gato")),
        ])
        .unwrap();
        let nb = NaiveBayes::train(&swapped, DEFAULT_CAPACITY).unwrap();
        assert_eq!(nb.predict("hola"), "French");
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let nb = model();
        for text in ["the gato", "chat sat", "el cat le"] {
            assert_eq!(nb.predict(text), nb.predict(text));
            assert_eq!(nb.posteriors(text), nb.posteriors(text));
        }
    }

    #[test]
    fn test_empty_class_gets_zero_posterior() {
        let train = ClassTokens::from_pairs(vec![
            ("English", Vec::new()),
            ("French", words("le chat")),
        ])
        .unwrap();
        let nb = NaiveBayes::train(&train, DEFAULT_CAPACITY).unwrap();

        assert_eq!(nb.class_params("English").unwrap().prior, 0.0);
        let prediction = nb.posteriors("the");
        assert_eq!(prediction.label, "French");
        assert_eq!(prediction.posteriors[0], ("English", 0.0));
    }

    #[test]
    fn test_all_empty_vocabularies_are_rejected() {
        let train = ClassTokens::from_pairs(vec![
            ("English", Vec::new()),
            ("French", words("straße")),
        ])
        .unwrap();
        assert_eq!(
            NaiveBayes::train(&train, DEFAULT_CAPACITY).unwrap_err(),
            NaiveBayesError::EmptyVocabulary
        );
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            UnprimedNaiveBayes::build(&train_set(), 0).unwrap_err(),
            NaiveBayesError::ZeroCapacity
        );
        assert_eq!(
            UnprimedNaiveBayes::new(ClassLabels::default(), Vec::new()).unwrap_err(),
            NaiveBayesError::LabelMismatch { labels: 3, indexes: 0 }
        );
    }

    #[test]
    fn test_model_is_shareable_across_threads() {
        let nb = std::sync::Arc::new(model());
        let handles: Vec<_> = ["the cat", "le chat", "el gato"]
            .into_iter()
            .map(|text| {
                let nb = nb.clone();
                std::thread::spawn(move || nb.predict(text).to_string())
            })
            .collect();
        let labels: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(labels, ["English", "French", "Spanish"]);
    }
}
