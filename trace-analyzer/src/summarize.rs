use crate::openai::{BackendError, ModelClient};
use crate::prompt::{build_prompt, TaskKind, SYSTEM_ROLE};
use futures::StreamExt;
use thiserror::Error;
use trace_structs::chunking::{chunk_spans, DEFAULT_CHUNK_SIZE};
use trace_structs::TraceDocument;
use tracing::{info, instrument};

/// How many chunk summaries may be in flight at once. Partial summaries are
/// still collected in chunk order.
pub const DEFAULT_MAX_CONCURRENT_CHUNKS: usize = 4;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("trace document holds no trace entries")]
    InvalidInput,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Summarizes traces too large for a single model call: the span list is split
/// into bounded chunks, each chunk is summarized on its own, and one final call
/// merges the partial summaries.
pub struct ChunkedSummarizer<'a> {
    client: &'a dyn ModelClient,
    chunk_size: usize,
    max_concurrent_chunks: usize,
}

impl<'a> ChunkedSummarizer<'a> {
    pub fn new(client: &'a dyn ModelClient) -> Self {
        Self {
            client,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_chunks: DEFAULT_MAX_CONCURRENT_CHUNKS,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_max_concurrent_chunks(mut self, max_concurrent_chunks: usize) -> Self {
        self.max_concurrent_chunks = max_concurrent_chunks;
        self
    }

    /// Summarizes the first trace entry of the document. Documents holding more
    /// than one trace only get their first one summarized, this is a known
    /// limitation of the current pipeline.
    #[instrument(skip_all)]
    pub async fn summarize(&self, doc: &TraceDocument) -> Result<String, SummarizeError> {
        let trace = doc.data.first().ok_or(SummarizeError::InvalidInput)?;
        let trace_id = trace.trace_id.clone();
        let chunks = chunk_spans(&trace.spans, self.chunk_size);
        info!(
            "Summarizing {} spans in {} chunk(s)",
            trace.spans.len(),
            chunks.len()
        );
        // An empty span list still flows through as one empty chunk so the
        // combination step below runs unconditionally.
        let chunk_docs: Vec<TraceDocument> = chunks
            .into_iter()
            .map(|chunk| TraceDocument::single(trace_id.clone(), chunk.to_vec()))
            .collect();
        let partial_results: Vec<Result<String, BackendError>> =
            futures::stream::iter(chunk_docs.iter().map(|chunk_doc| async move {
                let prompt = build_prompt(TaskKind::SummarizeTrace, chunk_doc);
                self.client.complete(SYSTEM_ROLE, &prompt).await
            }))
            .buffered(self.max_concurrent_chunks.max(1))
            .collect()
            .await;
        let partials: Vec<String> = partial_results.into_iter().collect::<Result<_, _>>()?;
        let combination = combination_prompt(trace_id.as_deref().unwrap_or("unknown"), &partials);
        let final_summary = self.client.complete(SYSTEM_ROLE, &combination).await?;
        Ok(final_summary)
    }
}

/// Merge instruction followed by the partial summaries, one per line, in chunk
/// order. Chunk order is what keeps the combined prompt deterministic.
fn combination_prompt(trace_id: &str, partials: &[String]) -> String {
    format!(
        "The following are partial summaries of consecutive chunks of the trace with Trace ID '{}'. \
Merge them into one concise overview of the trace's spans and errors, without repeating or contradicting statements:\n{}",
        trace_id,
        partials.join("\n")
    )
}
