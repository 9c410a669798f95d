use std::fs::File;
use std::io::Read;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{debug, info};

use crate::classifiers::{ClassLabels, ClassTokens};
use crate::generic_types::CorpusRecord;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to open the corpus {path}: {source}")]
    OpenError { path: String, source: std::io::Error },

    #[error("Failed to read corpus record: {0}")]
    RecordError(#[from] csv::Error),
}

/// Load a `Text,Language` CSV file into per-class token lists.
pub fn load_corpus<P: AsRef<Path>>(path: P, labels: &ClassLabels) -> Result<ClassTokens, CorpusError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CorpusError::OpenError {
        path: path.display().to_string(),
        source,
    })?;
    info!("Loading corpus from {}", path.display());
    read_corpus(file, labels)
}

/// Read CSV records and aggregate each row's tokens into its class.
///
/// Rows whose language is not one of `labels` are skipped.
pub fn read_corpus<R: Read>(reader: R, labels: &ClassLabels) -> Result<ClassTokens, CorpusError> {
    let mut corpus = ClassTokens::new(labels.clone());
    let mut reader = csv::Reader::from_reader(reader);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Reading corpus...");

    let mut rows = 0usize;
    let mut skipped = 0usize;
    for result in reader.deserialize() {
        let record: CorpusRecord = result?;
        rows += 1;
        if !corpus.push_text(&record.language, &record.text) {
            skipped += 1;
        }
        pb.inc(1);
    }

    pb.finish_with_message("Corpus loaded");

    info!(
        "Read {} rows ({} with unconfigured languages), {} tokens",
        rows,
        skipped,
        corpus.total_tokens()
    );
    for (label, tokens) in corpus.iter() {
        debug!("{}: {} tokens", label, tokens.len());
    }

    Ok(corpus)
}
