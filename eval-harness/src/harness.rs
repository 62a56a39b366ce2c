use crate::battery::{QaItem, EVAL_TRACE_ID};
use crate::client::{AskRequest, QaClient};
use crate::persist::EvalRecord;
use crate::report::error_chain;
use crate::scoring::{score_with_override, Scorer};
use tracing::{error, info, instrument};

/// Sends every battery question to the QA service and collects the answered
/// ones in battery order. A failed or timed-out item is reported and skipped,
/// it never aborts the run, and it leaves no record behind.
#[instrument(skip_all)]
pub async fn run_battery(
    client: &dyn QaClient,
    battery: &[QaItem],
    hop: i64,
    method: &str,
    scorer: Option<&dyn Scorer>,
) -> Vec<EvalRecord> {
    let mut records = Vec::with_capacity(battery.len());
    for (index, item) in battery.iter().enumerate() {
        let request = AskRequest {
            hop,
            question: item.question,
            trace_id: EVAL_TRACE_ID,
            method,
        };
        let response = match client.ask(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    "Question {} of {} failed, skipping it. {}",
                    index + 1,
                    battery.len(),
                    error_chain(&e)
                );
                continue;
            }
        };
        info!(question = item.question, answer = %response.answer);
        if let Some(scorer) = scorer {
            let score = score_with_override(scorer, &response.answer, item.reference);
            info!("metric: {}, score: {}", scorer.name(), score);
        }
        records.push(EvalRecord {
            q: item.question.to_string(),
            r: response.answer,
        });
    }
    records
}
