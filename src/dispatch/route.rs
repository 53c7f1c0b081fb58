use std::fmt;

/// Errors that can occur while carrying an action to the server.
#[derive(Debug)]
pub enum DispatchError {
    /// Network-level failure (DNS, connection refused, broken transfer).
    Network(String),
    /// The server answered with something that is not the expected JSON.
    Parse(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Network(msg) => write!(f, "network error: {msg}"),
            DispatchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// A fully resolved request: where to POST and what, if anything, to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRequest {
    pub url: String,
    /// JSON body for routes that embed the action; `None` sends an empty body.
    pub body: Option<serde_json::Value>,
}

/// Resolution strategy turning an action name into a request.
///
/// This is the seam where the dispatch mode is selected at setup time.
/// Returning `None` means the action has no endpoint and must not produce
/// a network call.
pub trait ActionRoute: Send + Sync {
    /// Returns the name of the route, for logging.
    fn name(&self) -> &str;

    /// Resolves `action` to a request, or `None` if it is unknown.
    fn plan(&self, action: &str) -> Option<PlannedRequest>;
}

/// Joins a server base URL and an endpoint path with exactly one slash.
pub(crate) fn join_url(server_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        server_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
