//! Translate-and-run off the async executor

use crate::services::state::AppState;
use crate::{Result, WebError};
use sqlforge_sandbox::{CancelToken, QueryOutcome};
use std::time::Duration;
use tracing::{debug, warn};

/// How long a cancelled execution gets to unwind before the response is sent
const CANCEL_GRACE: Duration = Duration::from_secs(5);

/// Translate `schema`, build it and run `query`, bounded by the request timeout.
///
/// The work runs on the blocking pool. On timeout the execution is cancelled
/// and awaited, so its instance is gone by the time the caller sees
/// [`WebError::Timeout`].
pub async fn translate_and_run(state: &AppState, schema: String, query: String) -> Result<QueryOutcome> {
    let translator = state.translator.clone();
    let sandbox = state.sandbox.clone();
    let timeout_secs = state.config.server.request_timeout_secs;
    let cancel = CancelToken::new();

    let token = cancel.clone();
    let mut task = tokio::task::spawn_blocking(move || {
        let canonical = translator.translate(&schema);
        debug!(translator = translator.name(), chars = canonical.len(), "Schema translated");
        sandbox.execute_cancellable(&canonical, &query, &token)
    });

    match tokio::time::timeout(Duration::from_secs(timeout_secs), &mut task).await {
        Ok(Ok(result)) => result.map_err(WebError::from),
        Ok(Err(join)) => Err(WebError::Internal(format!("Execution task failed: {join}"))),
        Err(_) => {
            warn!(timeout_secs, "Query timed out, cancelling execution");
            cancel.cancel();
            if tokio::time::timeout(CANCEL_GRACE, task).await.is_err() {
                warn!("Execution still running after cancellation");
            }
            Err(WebError::Timeout(timeout_secs))
        }
    }
}
