use crate::classifiers::labels::{ClassLabels, LabelError};
use crate::classifiers::normalizer::normalize;

/// Token lists keyed by class, stored in the declared label order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTokens {
    labels: ClassLabels,
    tokens: Vec<Vec<String>>,
}

impl ClassTokens {
    /// One empty token list per label.
    pub fn new(labels: ClassLabels) -> Self {
        let tokens = vec![Vec::new(); labels.len()];
        ClassTokens { labels, tokens }
    }

    /// Build from `(label, tokens)` pairs; the label order is the pair order.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let (labels, tokens): (Vec<String>, Vec<Vec<String>>) =
            pairs.into_iter().map(|(l, t)| (l.into(), t)).unzip();
        let labels = ClassLabels::new_from_iter(labels)?;
        Ok(ClassTokens { labels, tokens })
    }

    /// Normalize `text` and append its tokens to `label`.
    ///
    /// Returns `false`, leaving everything untouched, when `label` is not one
    /// of the configured classes.
    pub fn push_text(&mut self, label: &str, text: &str) -> bool {
        match self.labels.index_of(label) {
            Some(idx) => {
                self.tokens[idx].extend(normalize(text));
                true
            }
            None => false,
        }
    }

    /// Replace the token list of `label`. Unknown labels are ignored.
    pub fn set_tokens(&mut self, label: &str, tokens: Vec<String>) -> bool {
        match self.labels.index_of(label) {
            Some(idx) => {
                self.tokens[idx] = tokens;
                true
            }
            None => false,
        }
    }

    pub fn tokens_for(&self, label: &str) -> Option<&[String]> {
        self.labels
            .index_of(label)
            .map(|idx| self.tokens[idx].as_slice())
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    /// `(label, tokens)` pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.labels
            .iter()
            .zip(self.tokens.iter().map(Vec::as_slice))
    }

    /// Total number of tokens over all classes.
    pub fn total_tokens(&self) -> usize {
        self.tokens.iter().map(Vec::len).sum()
    }
}
