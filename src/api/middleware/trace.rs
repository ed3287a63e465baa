use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use rand::{rngs::OsRng, TryRngCore};
use sha2::{Digest, Sha256};
use tracing::{debug, info_span, warn, Instrument};

/// Response header carrying the trace id
pub const TRACE_ID_HEADER: &str = "x-trace-id";

const TRACE_ID_BYTES: usize = 16;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Per-request correlation id: 16 random bytes, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(String);

impl TraceId {
    /// Draw a new id from the OS CSPRNG.
    ///
    /// If the OS source fails, the id is derived from a hash of the current
    /// time, a process-wide counter and the process id. Both paths produce
    /// the same format.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TRACE_ID_BYTES];
        if let Err(err) = OsRng.try_fill_bytes(&mut bytes) {
            warn!(error = %err, "OS random source unavailable, using fallback trace id");
            return Self::fallback();
        }
        Self(hex::encode(bytes))
    }

    fn fallback() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut hasher = Sha256::new();
        hasher.update(nanos.to_le_bytes());
        hasher.update(count.to_le_bytes());
        hasher.update(std::process::id().to_le_bytes());
        let digest = hasher.finalize();

        Self(hex::encode(&digest[..TRACE_ID_BYTES]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attach a fresh trace id to the request, run it inside a span carrying
/// that id, and echo the id in the `x-trace-id` response header.
pub async fn trace_middleware(mut request: Request, next: Next) -> Response {
    let trace_id = TraceId::generate();
    request.extensions_mut().insert(trace_id.clone());

    let span = info_span!(
        "request",
        trace_id = %trace_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = async move {
        debug!("request started");
        next.run(request).await
    }
    .instrument(span)
    .await;

    if let Ok(header_value) = HeaderValue::from_str(trace_id.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), header_value);
    }

    response
}

/// What the error boundary needs to know about the failing request.
///
/// `trace_id` is `None` outside [`trace_middleware`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub trace_id: Option<TraceId>,
    pub method: String,
    pub path: String,
}

impl RequestContext {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            trace_id: parts.extensions.get::<TraceId>().cloned(),
            method: parts.method.to_string(),
            path: parts.uri.path().to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use std::collections::HashSet;
    use tower::ServiceExt;

    fn is_trace_id(value: &str) -> bool {
        value.len() == 32
            && value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_generated_ids_are_32_lowercase_hex() {
        let ids: HashSet<String> = (0..64).map(|_| TraceId::generate().to_string()).collect();

        assert_eq!(ids.len(), 64);
        assert!(ids.iter().all(|id| is_trace_id(id)));
    }

    #[test]
    fn test_fallback_ids_share_the_format() {
        let first = TraceId::fallback();
        let second = TraceId::fallback();

        assert!(is_trace_id(first.as_str()));
        assert!(is_trace_id(second.as_str()));
        assert_ne!(first, second);
    }

    #[test]
    fn test_context_outside_traced_request() {
        let (parts, _) = Request::builder()
            .method("DELETE")
            .uri("/v1/cards/42?force=true")
            .body(())
            .unwrap()
            .into_parts();

        let ctx = RequestContext::from_parts(&parts);
        assert_eq!(ctx.trace_id, None);
        assert_eq!(ctx.method, "DELETE");
        assert_eq!(ctx.path, "/v1/cards/42");
    }

    #[tokio::test]
    async fn test_middleware_sets_extension_and_header() {
        async fn echo(ctx: RequestContext) -> String {
            ctx.trace_id.map(|t| t.to_string()).unwrap_or_default()
        }

        let app = Router::new()
            .route("/echo", get(echo))
            .layer(axum::middleware::from_fn(trace_middleware));

        let response = app
            .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response.headers()[TRACE_ID_HEADER].to_str().unwrap().to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        assert!(is_trace_id(&header));
        assert_eq!(body, header.as_bytes());
    }
}
