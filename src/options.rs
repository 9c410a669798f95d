use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_NAME;

/// Identify the language of short texts with a word-presence Naive Bayes model.
#[derive(Parser, Debug)]
#[command(name = "langid", version)]
pub struct Options {
    /// Configuration file name, with or without extension
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
    pub config: String,

    /// Overrides `logging.level` (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Train on the corpus and report the confusion matrix of the held-out split
    Evaluate {
        /// Write the confusion matrix as JSON to this path
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Classify the given texts, or the built-in sample phrases when none are given
    Predict {
        texts: Vec<String>,
    },
    /// Serve `POST /identificar`
    Serve {
        /// Overrides `server.addr`
        #[arg(short, long)]
        addr: Option<String>,
    },
}
