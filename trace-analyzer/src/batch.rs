use crate::openai::{BackendError, ModelClient};
use crate::prompt::{build_prompt, TaskKind, SYSTEM_ROLE};
use crate::report::error_chain;
use crate::summarize::{ChunkedSummarizer, SummarizeError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, instrument, warn};
use trace_structs::TraceDocument;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("trace file not found: {path}")]
    FileNotFound { path: String },
    #[error("failed to parse trace file {path}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read trace file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct BatchConfig {
    pub chunk_size: usize,
    pub max_concurrent_chunks: usize,
}

/// Runs all three analysis tasks over every file in order. Per-file and
/// per-task failures are reported and skipped, one bad file or task never
/// stops the rest of the batch.
#[instrument(skip_all)]
pub async fn run(client: &dyn ModelClient, paths: &[PathBuf], config: BatchConfig) {
    for path in paths {
        info!("Processing file: {}", path.display());
        let doc = match load_trace_document(path).await {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping file. {}", error_chain(&e));
                continue;
            }
        };
        run_all_tasks(client, &doc, config).await;
    }
}

async fn run_all_tasks(client: &dyn ModelClient, doc: &TraceDocument, config: BatchConfig) {
    for (task_number, task) in TaskKind::ALL.into_iter().enumerate() {
        info!("Task {}: {}", task_number + 1, task.label());
        let outcome: Result<String, SummarizeError> = match task {
            TaskKind::ListErrors | TaskKind::FindHttpErrors => {
                per_entry_analysis(client, doc, task).await.map_err(|e| e.into())
            }
            TaskKind::SummarizeTrace => {
                let summarizer = ChunkedSummarizer::new(client)
                    .with_chunk_size(config.chunk_size)
                    .with_max_concurrent_chunks(config.max_concurrent_chunks);
                summarizer.summarize(doc).await
            }
        };
        match outcome {
            Ok(output) => println!("{output}"),
            Err(e) => error!("Error during analysis. {}", error_chain(&e)),
        }
    }
}

/// One model call per trace entry of the document, outputs joined by newline.
/// Keeps each call's payload bounded by a single trace instead of the whole
/// file.
async fn per_entry_analysis(
    client: &dyn ModelClient,
    doc: &TraceDocument,
    task: TaskKind,
) -> Result<String, BackendError> {
    let mut results = Vec::with_capacity(doc.data.len());
    for entry in &doc.data {
        let single = TraceDocument {
            data: vec![entry.clone()],
        };
        let prompt = build_prompt(task, &single);
        results.push(client.complete(SYSTEM_ROLE, &prompt).await?);
    }
    Ok(results.join("\n"))
}

async fn load_trace_document(path: &Path) -> Result<TraceDocument, LoadError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::FileNotFound {
                path: path.display().to_string(),
            })
        }
        Err(e) => {
            return Err(LoadError::Io {
                path: path.display().to_string(),
                source: e,
            })
        }
    };
    serde_json::from_str(&raw).map_err(|e| LoadError::ParseError {
        path: path.display().to_string(),
        source: e,
    })
}
