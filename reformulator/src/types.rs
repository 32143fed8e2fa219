/// A validated reformulation request.
///
/// `query` preserves the caller's original casing and whitespace; trimming is
/// only applied as the emptiness test during validation. The value lives for
/// one request/response cycle and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReformulationRequest {
    /// Raw natural-language question or request.
    pub query: String,
}
