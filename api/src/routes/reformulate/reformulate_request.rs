use serde::Serialize;

// The request body is deliberately taken as raw `serde_json::Value` in the
// route: the validator owns the shape check so that a missing, non-string, or
// empty `query` all produce the same fixed 400 body.

/// Response payload for /reformulate.
#[derive(Debug, Serialize)]
pub struct ReformulateResponse {
    /// Ordered, model-ranked search queries. The upstream instruction asks
    /// for 1–5; the count is not enforced here.
    #[serde(rename = "reformulatedQueries")]
    pub reformulated_queries: Vec<String>,
}
