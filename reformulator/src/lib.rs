//! Query reformulation pipeline with a single public entry point.
//!
//! Public API: [`validate`] + [`reformulate`]. A request flows through three
//! stages in strict sequence — validation, one completion call, line parsing —
//! and nothing is retained between requests. The completion capability is
//! abstracted behind [`completion_service::CompletionApi`], so any provider
//! (or a test fake) can sit behind the pipeline.

mod error;
mod parse;
mod prompt;
mod types;
mod validate;

pub use error::ReformulateError;
pub use parse::parse;
pub use prompt::{PromptPair, SYSTEM_PROMPT};
pub use types::ReformulationRequest;
pub use validate::validate;

use completion_service::CompletionApi;
use tracing::{debug, warn};

/// Reformulates one validated request into an ordered list of search queries.
///
/// Builds the prompt pair, makes exactly one completion call, and parses the
/// reply line by line. An empty reply is a valid empty result, not an error;
/// a reply with more than five lines is passed through unfiltered. Both cases
/// are logged so prompt regressions stay visible.
///
/// # Errors
/// - [`ReformulateError::UpstreamTimeout`] when the call exceeds its budget
/// - [`ReformulateError::Upstream`] for any other completion failure
///
/// Neither is retried here; the caller decides.
pub async fn reformulate<C>(
    completion: &C,
    request: &ReformulationRequest,
) -> Result<Vec<String>, ReformulateError>
where
    C: CompletionApi + ?Sized,
{
    let pair = PromptPair::new(&request.query);

    debug!(query_len = request.query.len(), "requesting reformulation");
    let raw = completion.complete(pair.system, &pair.user).await?;

    let queries = parse(&raw);
    if queries.is_empty() {
        warn!(
            raw_len = raw.len(),
            "model produced no usable query lines"
        );
    } else if queries.len() > 5 {
        warn!(
            count = queries.len(),
            "model exceeded the requested query count; passing through"
        );
    }

    debug!(count = queries.len(), "reformulation complete");
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use completion_service::{CompletionError, ConfigError};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Fake capability that records the prompt it was handed and replies with
    /// a canned result.
    struct FakeCompletion {
        reply: Result<String, CompletionError>,
        seen: Mutex<Option<(String, String)>>,
    }

    impl FakeCompletion {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(None),
            }
        }

        fn failing(err: CompletionError) -> Self {
            Self {
                reply: Err(err),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionApi for FakeCompletion {
        async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
            *self.seen.lock().unwrap() = Some((system.to_string(), user.to_string()));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(CompletionError::Timeout(d)) => Err(CompletionError::Timeout(*d)),
                Err(other) => Err(CompletionError::Decode(other.to_string())),
            }
        }
    }

    fn request(query: &str) -> ReformulationRequest {
        ReformulationRequest {
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn breaks_a_complex_question_into_ranked_queries() {
        let fake =
            FakeCompletion::replying("44th Miss World competition winner\nwinner birth year");
        let question =
            "In what year was the winner of the 44th edition of the Miss World competition born?";

        let queries = reformulate(&fake, &request(question)).await.unwrap();

        assert_eq!(
            queries,
            vec![
                "44th Miss World competition winner".to_string(),
                "winner birth year".to_string(),
            ]
        );

        let (system, user) = take_seen(&fake);
        assert_eq!(system, SYSTEM_PROMPT);
        assert_eq!(user, question);
    }

    #[tokio::test]
    async fn empty_reply_is_a_valid_empty_result() {
        let fake = FakeCompletion::replying("");
        let queries = reformulate(&fake, &request("anything")).await.unwrap();
        assert!(queries.is_empty());
    }

    #[tokio::test]
    async fn timeout_surfaces_as_upstream_timeout() {
        let fake = FakeCompletion::failing(CompletionError::Timeout(Duration::from_secs(5)));
        let err = reformulate(&fake, &request("anything")).await.unwrap_err();
        assert!(matches!(
            err,
            ReformulateError::UpstreamTimeout(d) if d == Duration::from_secs(5)
        ));
    }

    #[tokio::test]
    async fn other_failures_surface_as_upstream() {
        let fake =
            FakeCompletion::failing(CompletionError::Config(ConfigError::MissingApiKey));
        let err = reformulate(&fake, &request("anything")).await.unwrap_err();
        assert!(matches!(err, ReformulateError::Upstream(_)));
    }

    #[tokio::test]
    async fn validation_failure_makes_no_completion_call() {
        let fake = FakeCompletion::replying("should never be used");
        let body = serde_json::json!({ "query": "   " });

        assert!(validate(&body).is_err());
        assert!(fake.seen.lock().unwrap().is_none());
    }

    fn take_seen(fake: &FakeCompletion) -> (String, String) {
        fake.seen
            .lock()
            .unwrap()
            .take()
            .expect("completion was not called")
    }
}
