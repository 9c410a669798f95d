use std::fmt;

use serde::Deserialize;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};

use crate::classifiers::labels::{ClassLabels, DEFAULT_LABELS};
use crate::classifiers::split::DEFAULT_TEST_FRACTION;
use crate::classifiers::vocabulary::DEFAULT_CAPACITY;

pub const DEFAULT_CONFIG_NAME: &str = "config";


#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    pub path: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub capacity: usize,
    pub test_fraction: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub model: ModelConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}
impl Config {
    /// Layer defaults, the named file (optional) and `LANGID__*` environment variables.
    pub fn from_file(name: &str) -> Result<Self, ConfigError> {
        let labels: Vec<String> = DEFAULT_LABELS.iter().map(|l| l.to_string()).collect();

        let mut builder: ConfigBuilder<DefaultState> = ConfigBuilder::default();
        builder = builder
            .set_default("corpus.path", "data/languageDetection.csv")?
            .set_default("corpus.labels", labels)?
            .set_default("model.capacity", DEFAULT_CAPACITY as i64)?
            .set_default("model.test_fraction", DEFAULT_TEST_FRACTION)?
            .set_default("server.addr", "0.0.0.0:8000")?
            .set_default("logging.level", "info")?;

        builder = builder
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("LANGID").separator("__"));

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.capacity == 0 {
            return Err(ConfigError::Message("model.capacity must be non-zero".into()));
        }
        if !(0.0..=1.0).contains(&self.model.test_fraction) {
            return Err(ConfigError::Message(format!(
                "model.test_fraction must be within [0, 1], got {}",
                self.model.test_fraction
            )));
        }
        self.class_labels()?;
        Ok(())
    }

    pub fn class_labels(&self) -> Result<ClassLabels, ConfigError> {
        ClassLabels::new_from_iter(self.corpus.labels.iter().cloned())
            .map_err(|e| ConfigError::Message(format!("corpus.labels: {}", e)))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "corpus={} labels=[{}] capacity={} test_fraction={}",
            self.corpus.path,
            self.corpus.labels.join(", "),
            self.model.capacity,
            self.model.test_fraction
        )
    }
}
