pub mod classifiers;
pub mod config;
pub mod corpus;
pub mod evaluation;
pub mod generic_types;
pub mod logging;
pub mod options;
pub mod pipeline;
pub mod server;

pub use crate::classifiers::{ClassLabels, ClassTokens, NaiveBayes, Splitter};
pub use crate::evaluation::{evaluate, ConfusionMatrix};
