use crate::Span;

/// Upper bound on spans per model call. Hotrod traces go way past what a single
/// completion request can take, so summarization works on slices of this size.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Splits a span sequence into contiguous chunks of at most `chunk_size` spans,
/// preserving order. Concatenating the returned chunks reproduces the input
/// exactly. An empty sequence still yields one (empty) chunk so downstream
/// processing stays uniform.
pub fn chunk_spans(spans: &[Span], chunk_size: usize) -> Vec<&[Span]> {
    if spans.is_empty() {
        return vec![spans];
    }
    spans.chunks(chunk_size.max(1)).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn spans(count: usize) -> Vec<Span> {
        (0..count)
            .map(|i| Span {
                span_id: format!("span-{i}"),
                warnings: None,
                logs: vec![],
                tags: vec![],
                extra: serde_json::Map::new(),
            })
            .collect()
    }

    #[test]
    fn concatenating_chunks_reproduces_the_input() {
        for (len, chunk_size) in [(1, 1), (5, 2), (10, 3), (1000, 1000), (1001, 1000)] {
            let spans = spans(len);
            let chunks = chunk_spans(&spans, chunk_size);
            let expected_chunk_count = (len + chunk_size - 1) / chunk_size;
            assert_eq!(chunks.len(), expected_chunk_count, "len={len} chunk_size={chunk_size}");
            let rebuilt: Vec<&Span> = chunks.iter().flat_map(|chunk| chunk.iter()).collect();
            assert_eq!(rebuilt.len(), len);
            for (original, rebuilt) in spans.iter().zip(rebuilt) {
                assert_eq!(original.span_id, rebuilt.span_id);
            }
        }
    }

    #[test]
    fn empty_sequence_yields_one_empty_chunk() {
        let chunks = chunk_spans(&[], DEFAULT_CHUNK_SIZE);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
    }

    #[test]
    fn last_chunk_may_be_shorter() {
        let spans = spans(7);
        let chunks = chunk_spans(&spans, 3);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 3);
        assert_eq!(chunks[1].len(), 3);
        assert_eq!(chunks[2].len(), 1);
    }
}
