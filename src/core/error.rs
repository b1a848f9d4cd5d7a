use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// The variants separate "the request never completed" ([`FmError::Transport`]),
/// "the server failed" ([`FmError::Protocol`]), "the server answered with garbage"
/// ([`FmError::Malformed`]) and "the server refused this operation" ([`FmError::Service`]).
#[derive(Debug, Error)]
pub enum FmError {
    /// The request could not be sent or no response body could be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a 5xx status.
    #[error("unexpected response status: {status} at {url}")]
    Protocol {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The body could not be parsed as XML, even after stripping invalid characters.
    #[error("malformed response: {0}")]
    Malformed(#[from] roxmltree::Error),

    /// The web service answered `status="failed"`.
    ///
    /// `code` is one of the constants in [`crate::core::status`], passed through verbatim.
    #[error("service error {code}: {detail}")]
    Service {
        /// The integer `code` attribute of the `<error>` element.
        code: u32,
        /// The trimmed text of the `<error>` element.
        detail: String,
    },

    /// A client-side invariant failed (exhausted page retries, missing paging attributes, ...).
    #[error("{message}")]
    Client {
        /// A human-readable description.
        message: String,
        /// The error that caused this one, if any.
        #[source]
        source: Option<Box<FmError>>,
    },

    /// A provided URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The on-disk cache could not be read or written.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk cache file is not valid JSON.
    #[error("cache format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FmError {
    pub(crate) fn client(message: impl Into<String>) -> Self {
        FmError::Client {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn client_with_source(message: impl Into<String>, source: FmError) -> Self {
        FmError::Client {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the service error code of this error or of the error it wraps.
    ///
    /// Paged calls report exhausted retries as [`FmError::Client`] around the last failure;
    /// the code of that failure is still visible here.
    #[must_use]
    pub fn service_code(&self) -> Option<u32> {
        match self {
            FmError::Service { code, .. } => Some(*code),
            FmError::Client { source: Some(inner), .. } => inner.service_code(),
            _ => None,
        }
    }
}
