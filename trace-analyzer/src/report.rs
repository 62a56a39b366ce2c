/// Formats an error together with its source chain, one cause per line, so a
/// recovered failure still surfaces its root cause in the log.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut formatted = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        formatted.push_str(&format!("\nCaused by: {}", inner));
        source = inner.source();
    }
    formatted
}
