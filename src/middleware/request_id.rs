use reqwest::RequestBuilder;
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every outgoing call to the recommendation service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tags an outgoing request with a fresh `x-request-id` header.
///
/// Returns the id so the caller can record it in its log fields.
pub fn with_request_id(builder: RequestBuilder) -> (RequestBuilder, RequestId) {
    let request_id = RequestId::new();
    let builder = builder.header(REQUEST_ID_HEADER, request_id.as_str());
    (builder, request_id)
}

/// Span covering a single call to the recommendation service
pub fn make_span_with_request_id(operation: &'static str, request_id: &RequestId) -> tracing::Span {
    tracing::info_span!(
        "service_call",
        operation = operation,
        request_id = %request_id,
    )
}
