pub mod class_tokens;
pub mod labels;
pub mod naive_bayes;
pub mod normalizer;
pub mod split;
pub mod vocabulary;

pub use class_tokens::ClassTokens;
pub use labels::ClassLabels;
pub use naive_bayes::{NaiveBayes, NaiveBayesError, UnprimedNaiveBayes};
pub use split::Splitter;
