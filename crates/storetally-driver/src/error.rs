use thiserror::Error;

/// W3C error code Appium returns when a lookup matches nothing.
pub(crate) const NO_SUCH_ELEMENT: &str = "no such element";

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The lookup described by `context` matched no element.
    #[error("no such element: {context}")]
    NoSuchElement { context: String },

    /// Any other W3C error payload (`{"value": {"error", "message"}}`).
    #[error("WebDriver error \"{error}\" (HTTP {status}) for {context}: {message}")]
    WebDriver {
        status: u16,
        error: String,
        message: String,
        context: String,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },

    #[error("invalid driver URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl DriverError {
    #[must_use]
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Self::NoSuchElement { .. })
    }
}
