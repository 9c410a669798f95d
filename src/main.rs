use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use langid::config::Config;
use langid::evaluation::evaluate;
use langid::logging::setup_logger;
use langid::options::{Command, Options};
use langid::pipeline::{Pipeline, SAMPLE_PHRASES};
use langid::server::IdentifyServer;

#[tokio::main]
async fn main() -> Result<()> {
    let options = Options::parse();
    let config = Config::from_file(&options.config).context("invalid configuration")?;
    setup_logger(options.log_level.as_deref().unwrap_or(&config.logging.level));
    info!("{}", config);

    // Training is blocking; keep it off the async workers.
    let training_config = config.clone();
    let pipeline = tokio::task::spawn_blocking(move || Pipeline::from_config(&training_config))
        .await
        .context("training task panicked")??;

    match options.command {
        Command::Evaluate { output } => {
            let matrix = evaluate(&pipeline.test, &pipeline.model);
            println!("{}", matrix);
            match matrix.accuracy() {
                Some(accuracy) => info!("Accuracy {:.2}% over {} distinct tokens", accuracy * 100.0, matrix.total()),
                None => info!("No held-out tokens to evaluate"),
            }
            for label in pipeline.model.labels().iter() {
                if let Some(recall) = matrix.recall(label) {
                    info!("{}: recall {:.2}%", label, recall * 100.0);
                }
            }
            if let Some(path) = output {
                matrix.save_to_file(&path)?;
                info!("Confusion matrix saved to {}", path);
            }
        }
        Command::Predict { texts } => {
            let texts: Vec<String> = if texts.is_empty() {
                SAMPLE_PHRASES.iter().map(|s| s.to_string()).collect()
            } else {
                texts
            };
            for text in &texts {
                println!("{}\t{}", text, pipeline.model.predict(text));
            }
        }
        Command::Serve { addr } => {
            let addr = addr.unwrap_or(config.server.addr);
            let server = IdentifyServer::new(&addr, Arc::new(pipeline.model));
            server.run().await?;
        }
    }

    Ok(())
}
