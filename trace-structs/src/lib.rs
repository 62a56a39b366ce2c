pub mod chunking;

pub type TraceId = String;

/// Tag key Jaeger instrumentation uses for the HTTP response status of a span.
pub const HTTP_STATUS_CODE_TAG: &str = "http.status_code";

/// Top level shape of a Jaeger trace export file: `{"data": [ ...traces... ]}`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TraceDocument {
    #[serde(default)]
    pub data: Vec<TraceEntry>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TraceEntry {
    /// Some exports carry the trace id only inside the spans, so this can be missing
    #[serde(rename = "traceID", default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<TraceId>,
    #[serde(default)]
    pub spans: Vec<Span>,
    /// Fields we don't model (processes, dependencies, ...) kept so re-serializing
    /// a parsed document reproduces them
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Span {
    #[serde(rename = "spanID", default)]
    pub span_id: String,
    /// Only present when the collector flagged something for this span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    #[serde(default)]
    pub logs: Vec<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Tag keys are not unique within a span
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: serde_json::Value,
}

impl TraceDocument {
    /// Document holding exactly one trace entry, used to feed a span subset back
    /// through the prompt builder.
    pub fn single(trace_id: Option<TraceId>, spans: Vec<Span>) -> Self {
        Self {
            data: vec![TraceEntry {
                trace_id,
                spans,
                extra: serde_json::Map::new(),
            }],
        }
    }

    /// Trace id of the first entry, or "unknown" when there is none.
    pub fn trace_id_or_unknown(&self) -> &str {
        self.data
            .first()
            .and_then(|trace| trace.trace_id.as_deref())
            .unwrap_or("unknown")
    }
}

impl Span {
    pub fn http_status_tags(&self) -> Vec<&Tag> {
        self.tags
            .iter()
            .filter(|tag| tag.key == HTTP_STATUS_CODE_TAG)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_jaeger_export_shape() {
        let raw = r#"{
            "data": [
                {
                    "traceID": "abc123",
                    "spans": [
                        {
                            "spanID": "s1",
                            "tags": [{"key": "http.status_code", "value": 200}],
                            "logs": [],
                            "operationName": "GET /dispatch"
                        },
                        {
                            "spanID": "s2",
                            "warnings": ["clock skew adjustment disabled"]
                        }
                    ],
                    "processes": {"p1": {"serviceName": "frontend"}}
                }
            ]
        }"#;
        let doc: TraceDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.trace_id_or_unknown(), "abc123");
        let spans = &doc.data[0].spans;
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].span_id, "s1");
        assert_eq!(spans[0].http_status_tags().len(), 1);
        assert_eq!(
            spans[1].warnings.as_deref(),
            Some(&["clock skew adjustment disabled".to_string()][..])
        );
        // unknown span fields survive the round trip
        assert_eq!(
            spans[0].extra.get("operationName").unwrap(),
            "GET /dispatch"
        );
        assert!(doc.data[0].extra.contains_key("processes"));
    }

    #[test]
    fn missing_trace_id_reads_as_unknown() {
        let doc: TraceDocument = serde_json::from_str(r#"{"data": [{"spans": []}]}"#).unwrap();
        assert_eq!(doc.trace_id_or_unknown(), "unknown");
        let empty: TraceDocument = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(empty.trace_id_or_unknown(), "unknown");
    }

    #[test]
    fn status_tag_filter_keeps_only_matching_tags() {
        let span = Span {
            span_id: "s1".to_string(),
            warnings: None,
            logs: vec![],
            tags: vec![
                Tag {
                    key: "http.status_code".to_string(),
                    value: serde_json::json!(500),
                },
                Tag {
                    key: "other".to_string(),
                    value: serde_json::json!(1),
                },
            ],
            extra: serde_json::Map::new(),
        };
        let filtered = span.http_status_tags();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].value, serde_json::json!(500));
    }
}
