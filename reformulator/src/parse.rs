//! Line-oriented parser for raw model output.

/// Parses the model's free-text reply into an ordered list of queries.
///
/// Splits on line boundaries, trims each line (which also drops the `\r` of
/// CRLF output), discards lines that are empty after trimming, and preserves
/// the remaining top-to-bottom order.
///
/// Purely structural: no deduplication, no count enforcement, no semantic
/// checks. Zero non-empty lines yields an empty vector; more than five lines
/// pass through untouched — the caller owns both policies.
pub fn parse(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
