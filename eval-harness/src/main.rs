use crate::client::HttpQaClient;
use crate::report::error_chain;
use crate::scoring::{Scorer, UnigramF1};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

mod battery;
mod client;
mod harness;
mod persist;
mod report;
mod scoring;

#[tokio::main]
async fn main() {
    println!("Loading env vars");
    dotenv::dotenv().ok();
    let config = LaunchConfig::parse();
    setup_console_tracing();
    info!("Using config: {:#?}", config);
    let client =
        HttpQaClient::new(config.endpoint.clone()).expect("failed to build the QA http client");
    let scorer = UnigramF1;
    let scorer: Option<&dyn Scorer> = config.score.then_some(&scorer as &dyn Scorer);
    let records = harness::run_battery(
        &client,
        battery::battery(),
        config.hop,
        &config.method,
        scorer,
    )
    .await;
    info!("Collected {} answered questions", records.len());
    match persist::append_run_log(&config.output_dir, config.hop, &config.method, &records) {
        Ok(path) => info!("Appended run log to {}", path.display()),
        Err(e) => error!("Failed to persist the run log. {}", error_chain(&e)),
    }
}

#[derive(Debug, clap::Parser)]
pub struct LaunchConfig {
    /// Hop value forwarded with every question
    #[clap(long)]
    pub hop: i64,
    /// Retrieval method forwarded with every question, e.g. graph-rag or naive-rag
    #[clap(long)]
    pub method: String,
    #[clap(long, env, default_value = "http://localhost:54320/api/ask")]
    pub endpoint: String,
    /// Directory the run log is appended into
    #[clap(long, env, default_value = ".")]
    pub output_dir: PathBuf,
    /// Score predicted answers against the references
    #[clap(long, default_value_t = false)]
    pub score: bool,
}

/// Uses RUST_LOG, defaulting to plain "info" when missing or invalid.
fn setup_console_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .compact()
        .with_filter(filter);
    let subscriber = tracing_subscriber::Registry::default().with(fmt);
    tracing::subscriber::set_global_default(subscriber)
        .expect("tracing to not be initialized twice");
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn hop_and_method_are_required() {
        assert!(LaunchConfig::try_parse_from(["eval-harness"]).is_err());
        assert!(LaunchConfig::try_parse_from(["eval-harness", "--hop", "2"]).is_err());
        let config =
            LaunchConfig::try_parse_from(["eval-harness", "--hop", "2", "--method", "graph-rag"])
                .unwrap();
        assert_eq!(config.hop, 2);
        assert_eq!(config.method, "graph-rag");
        assert!(!config.score);
    }
}
