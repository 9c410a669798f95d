use anyhow::{Context, Result};
use tracing::info;

use crate::classifiers::{ClassTokens, NaiveBayes, Splitter};
use crate::config::Config;
use crate::corpus::load_corpus;
use crate::logging::Logger;

/// Phrases of each supported language used as a quick sanity check.
pub const SAMPLE_PHRASES: [&str; 9] = [
    "The sun sets in the west.",
    "Friendship is a treasure.",
    "Dreams can come true.",
    "El sol se pone en el oeste.",
    "La amistad es un tesoro.",
    "Los sueños pueden hacerse realidad.",
    "Le soleil se couche à l'ouest.",
    "L'amitié est un trésor.",
    "Les rêves peuvent devenir réalité.",
];

/// A primed model together with the split it was trained on.
pub struct Pipeline {
    pub model: NaiveBayes,
    pub train: ClassTokens,
    pub test: ClassTokens,
}

impl Pipeline {
    /// Split `corpus` and train on the training share.
    pub fn from_corpus(corpus: &ClassTokens, splitter: Splitter, capacity: usize) -> Result<Self> {
        let (train, test) = splitter.split(corpus);
        info!(
            "Split {} tokens: {} train, {} held out (fraction {})",
            corpus.total_tokens(),
            train.total_tokens(),
            test.total_tokens(),
            splitter.test_fraction()
        );
        let model = NaiveBayes::train(&train, capacity).context("training failed")?;
        Ok(Pipeline { model, train, test })
    }

    /// Load the configured corpus, split it and train, inside the training span.
    pub fn from_config(config: &Config) -> Result<Self> {
        Logger::with_span(|| -> Result<Self> {
            let labels = config.class_labels()?;
            let corpus = load_corpus(&config.corpus.path, &labels)?;
            let splitter = Splitter::new(config.model.test_fraction)?;
            Self::from_corpus(&corpus, splitter, config.model.capacity)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::ClassLabels;
    use crate::evaluation::evaluate;

    #[test]
    fn test_corpus_to_confusion_matrix() {
        let mut corpus = ClassTokens::new(ClassLabels::default());
        for (label, text) in [
            ("English", "hello world the sun the moon friendship dreams"),
            ("Spanish", "hola mundo el sol la luna amistad sueños"),
            ("French", "bonjour monde le soleil la lune amitié rêves"),
        ] {
            corpus.push_text(label, text);
        }

        let pipeline =
            Pipeline::from_corpus(&corpus, Splitter::new(0.25).unwrap(), 5000).unwrap();

        // round(0.25 * 8) = 2 held out per class.
        assert_eq!(pipeline.test.total_tokens(), 6);
        let matrix = evaluate(&pipeline.test, &pipeline.model);
        assert_eq!(matrix.total(), 6);
        assert_eq!(pipeline.model.predict("the moon"), "English");
        assert_eq!(pipeline.model.predict("la luna"), "Spanish");
    }

    #[test]
    fn test_from_config_with_sample_corpus() {
        let mut config = Config::from_file("no-such-config-file").unwrap();
        config.corpus.path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/languageDetection.csv").to_string();

        let pipeline = Pipeline::from_config(&config).unwrap();

        assert!(pipeline.test.total_tokens() > 0);
        assert!(pipeline.model.total_size() > 0);
        let matrix = evaluate(&pipeline.test, &pipeline.model);
        assert!(matrix.total() > 0);
        assert!(matrix.total() as usize <= pipeline.test.total_tokens());
        for phrase in SAMPLE_PHRASES {
            let label = pipeline.model.predict(phrase);
            assert!(pipeline.model.labels().index_of(label).is_some());
        }
    }

    #[test]
    fn test_empty_corpus_is_a_configuration_error() {
        let corpus = ClassTokens::new(ClassLabels::default());
        assert!(Pipeline::from_corpus(&corpus, Splitter::default(), 5000).is_err());
    }
}
