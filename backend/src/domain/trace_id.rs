//! Correlation identifier threaded through a request's logs and error bodies.
//!
//! Every inbound request gets a `TraceId` minted by the tracing middleware and
//! stashed in task-local storage, so handlers and error constructors can pick
//! it up with [`TraceId::current`] instead of passing it down every call.
//!
//! Task-local values do not survive `tokio::spawn` or `spawn_blocking`. Code
//! that hands work to another task must re-establish the identifier on the far
//! side with [`TraceId::scope`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    /// Trace identifier of the request the current task is serving.
    pub(crate) static TRACE_ID: TraceId;
}

/// Identifier correlating one request across log lines and error payloads.
///
/// # Examples
/// ```
/// use skistation::TraceId;
///
/// fn correlation_label() -> String {
///     TraceId::current().map_or_else(|| "-".to_owned(), |id| id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh random identifier for a new request.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The identifier scoped to the current task, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` installed as the task-local identifier.
    ///
    /// # Examples
    /// ```
    /// use skistation::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id: TraceId = "6f9a2d1c-5b1e-4c83-9f60-3c94d7a5e210"
    ///     .parse()
    ///     .expect("uuid literal");
    /// let seen = TraceId::scope(id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Uuid>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn a_scoped_future_sees_its_own_id() {
        let id = TraceId::generate();
        let seen = TraceId::scope(id, async { TraceId::current() }).await;
        assert_eq!(seen, Some(id));
    }

    #[tokio::test]
    async fn nested_scopes_shadow_the_outer_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let seen = TraceId::scope(outer, async move {
            TraceId::scope(inner, async { TraceId::current() }).await
        })
        .await;
        assert_eq!(seen, Some(inner));
    }

    #[tokio::test]
    async fn current_is_empty_when_nothing_is_scoped() {
        assert_eq!(TraceId::current(), None);
    }

    #[test]
    fn display_and_parse_agree_on_the_text_form() {
        let text = "6f9a2d1c-5b1e-4c83-9f60-3c94d7a5e210";
        let id: TraceId = text.parse().expect("uuid literal");
        assert_eq!(id.to_string(), text);
    }

    #[test]
    fn garbage_does_not_parse() {
        assert!("not-a-uuid".parse::<TraceId>().is_err());
    }
}
