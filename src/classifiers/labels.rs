use std::fmt;

use thiserror::Error;

/// Languages recognised out of the box, in their declared order.
pub const DEFAULT_LABELS: [&str; 3] = ["French", "English", "Spanish"];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    #[error("At least one class label is required")]
    Empty,

    #[error("Duplicate class label: {0}")]
    Duplicate(String),
}

/// Closed, ordered set of class labels.
///
/// The order is the iteration order of every per-class structure, and
/// therefore the tie-break order of predictions and the row/column order
/// of confusion matrices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabels {
    vec: Vec<String>,
}

impl ClassLabels {
    pub fn new_from_iter<I, S>(iter: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vec: Vec<String> = Vec::new();
        for label in iter {
            let label = label.into();
            if vec.contains(&label) {
                return Err(LabelError::Duplicate(label));
            }
            vec.push(label);
        }
        if vec.is_empty() {
            return Err(LabelError::Empty);
        }
        Ok(ClassLabels { vec })
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.vec.iter().position(|l| l == label)
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.vec.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.vec.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.vec
    }
}

impl Default for ClassLabels {
    fn default() -> Self {
        ClassLabels {
            vec: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl fmt::Display for ClassLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.vec.join(", "))
    }
}
