use crate::batch::BatchConfig;
use crate::openai::{OpenAiClient, OpenAiConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

mod batch;
mod openai;
mod prompt;
mod report;
mod summarize;

#[tokio::main]
async fn main() {
    // load env vars so clap can use it when parsing the config
    println!("Loading env vars");
    dotenv::dotenv().ok();
    let config = LaunchConfig::parse();
    setup_console_tracing();
    info!("Using config: {:#?}", config);
    let client = OpenAiClient::new(config.openai.clone()).expect("failed to build the model client");
    let paths = trace_file_paths(&config);
    batch::run(
        &client,
        &paths,
        BatchConfig {
            chunk_size: config.chunk_size,
            max_concurrent_chunks: config.max_concurrent_chunks,
        },
    )
    .await;
}

#[derive(Debug, clap::Parser)]
pub struct LaunchConfig {
    #[clap(flatten)]
    pub openai: OpenAiConfig,
    /// Directory holding the exported trace files
    #[clap(long, env, default_value = "./SampleData")]
    pub data_dir: PathBuf,
    /// First numeric suffix of the `hotrod{i}.json` files to analyze, inclusive
    #[clap(long, env, default_value_t = 1)]
    pub file_start: u32,
    /// Last numeric suffix, inclusive
    #[clap(long, env, default_value_t = 19)]
    pub file_end: u32,
    #[clap(long, env, default_value_t = trace_structs::chunking::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
    #[clap(long, env, default_value_t = summarize::DEFAULT_MAX_CONCURRENT_CHUNKS)]
    pub max_concurrent_chunks: usize,
}

fn trace_file_paths(config: &LaunchConfig) -> Vec<PathBuf> {
    (config.file_start..=config.file_end)
        .map(|i| config.data_dir.join(format!("hotrod{i}.json")))
        .collect()
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
