use std::str::FromStr;
use trace_structs::{Span, Tag, TraceDocument};

/// Role the model is given for every analysis call.
pub const SYSTEM_ROLE: &str = "You are a JSON trace data analyst.";

/// Returned by [`build_prompt_for_name`] for task names outside [`TaskKind`].
/// Callers must check for it, it is a sentinel and not a valid prompt.
pub const UNSUPPORTED_TASK_SENTINEL: &str = "Unsupported task.";

/// The closed set of analysis tasks. Adding a task here makes every match on it
/// fail to compile until the new handler exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    ListErrors,
    SummarizeTrace,
    FindHttpErrors,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [
        TaskKind::ListErrors,
        TaskKind::SummarizeTrace,
        TaskKind::FindHttpErrors,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::ListErrors => "List Errors",
            TaskKind::SummarizeTrace => "Summarize a Trace",
            TaskKind::FindHttpErrors => "Find HTTP Errors",
        }
    }
}

impl FromStr for TaskKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list_errors" => Ok(Self::ListErrors),
            "summarize_trace" => Ok(Self::SummarizeTrace),
            "find_http_errors" => Ok(Self::FindHttpErrors),
            _ => Err(()),
        }
    }
}

/// Renders the instruction text plus the filtered span data for one task.
/// Pure function: identical input produces a byte-identical prompt.
pub fn build_prompt(task: TaskKind, doc: &TraceDocument) -> String {
    match task {
        TaskKind::ListErrors => {
            let listing: Vec<SpanErrorListing> = all_spans(doc)
                .map(|span| SpanErrorListing {
                    span_id: &span.span_id,
                    warnings: &span.warnings,
                    logs: &span.logs,
                })
                .collect();
            format!(
                "Analyze the following JSON trace data and list all errors:\n{}",
                pretty(&listing)
            )
        }
        TaskKind::SummarizeTrace => {
            format!(
                "Summarize the trace with Trace ID '{}'. Provide an overview of spans and errors:\n{}",
                doc.trace_id_or_unknown(),
                pretty(doc)
            )
        }
        TaskKind::FindHttpErrors => {
            let listing: Vec<SpanStatusListing> = all_spans(doc)
                .map(|span| SpanStatusListing {
                    span_id: &span.span_id,
                    tags: span.http_status_tags(),
                })
                .collect();
            format!(
                "Find spans with HTTP status codes other than 200:\n{}",
                pretty(&listing)
            )
        }
    }
}

/// String-boundary entry point: unknown task names yield
/// [`UNSUPPORTED_TASK_SENTINEL`] instead of an error.
pub fn build_prompt_for_name(task_name: &str, doc: &TraceDocument) -> String {
    match task_name.parse::<TaskKind>() {
        Ok(task) => build_prompt(task, doc),
        Err(()) => UNSUPPORTED_TASK_SENTINEL.to_string(),
    }
}

fn all_spans(doc: &TraceDocument) -> impl Iterator<Item = &Span> {
    doc.data.iter().flat_map(|trace| trace.spans.iter())
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).expect("prompt listings are plain JSON trees")
}

#[derive(serde::Serialize)]
struct SpanErrorListing<'a> {
    #[serde(rename = "spanID")]
    span_id: &'a str,
    warnings: &'a Option<Vec<String>>,
    logs: &'a [serde_json::Value],
}

#[derive(serde::Serialize)]
struct SpanStatusListing<'a> {
    #[serde(rename = "spanID")]
    span_id: &'a str,
    tags: Vec<&'a Tag>,
}

#[cfg(test)]
mod test {
    use super::*;
    use trace_structs::TraceDocument;

    fn doc(raw: &str) -> TraceDocument {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn list_errors_on_empty_document_renders_empty_listing() {
        let doc = doc(r#"{"data": []}"#);
        let prompt = build_prompt(TaskKind::ListErrors, &doc);
        assert!(prompt.starts_with("Analyze the following JSON trace data and list all errors:"));
        assert!(prompt.ends_with("[]"));
    }

    #[test]
    fn find_http_errors_keeps_only_status_code_tags() {
        let doc = doc(
            r#"{"data": [{"traceID": "t1", "spans": [
                {"spanID": "s1", "tags": [
                    {"key": "http.status_code", "value": 500},
                    {"key": "other", "value": 1}
                ]},
                {"spanID": "s2", "tags": [{"key": "component", "value": "net/http"}]}
            ]}]}"#,
        );
        let prompt = build_prompt(TaskKind::FindHttpErrors, &doc);
        assert!(prompt.starts_with("Find spans with HTTP status codes other than 200:"));
        assert!(prompt.contains("http.status_code"));
        assert!(prompt.contains("500"));
        // the non matching tag is dropped, the span without a match stays with []
        assert!(!prompt.contains("\"other\""));
        assert!(prompt.contains("\"s2\""));
        assert!(!prompt.contains("component"));
    }

    #[test]
    fn summarize_trace_embeds_trace_id_and_document() {
        let doc = doc(r#"{"data": [{"traceID": "t42", "spans": [{"spanID": "s1"}]}]}"#);
        let prompt = build_prompt(TaskKind::SummarizeTrace, &doc);
        assert!(prompt.starts_with("Summarize the trace with Trace ID 't42'."));
        assert!(prompt.contains("\"spanID\": \"s1\""));
    }

    #[test]
    fn summarize_trace_without_trace_id_uses_unknown() {
        let doc = doc(r#"{"data": [{"spans": []}]}"#);
        let prompt = build_prompt(TaskKind::SummarizeTrace, &doc);
        assert!(prompt.starts_with("Summarize the trace with Trace ID 'unknown'."));
    }

    #[test]
    fn prompts_are_deterministic() {
        let doc = doc(
            r#"{"data": [{"traceID": "t1", "spans": [
                {"spanID": "s1", "warnings": ["w"], "logs": [{"msg": "boom"}]}
            ]}]}"#,
        );
        for task in TaskKind::ALL {
            assert_eq!(build_prompt(task, &doc), build_prompt(task, &doc));
        }
    }

    #[test]
    fn unknown_task_name_yields_the_sentinel() {
        let doc = doc(r#"{"data": []}"#);
        assert_eq!(
            build_prompt_for_name("rank_spans", &doc),
            UNSUPPORTED_TASK_SENTINEL
        );
        assert_ne!(
            build_prompt_for_name("list_errors", &doc),
            UNSUPPORTED_TASK_SENTINEL
        );
    }
}
