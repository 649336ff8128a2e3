//! Cluster error model and classification
//!
//! The API server does not report "this kind is not installed" through a
//! structured error on every code path, so classification falls back to
//! matching known phrasings in the error text. That matching is kept behind
//! [`ErrorClassifier`] so a structured strategy can replace it later without
//! touching the fetchers or the view.

/// Phrases the API server uses when no handler is registered for a kind
pub const KIND_NOT_INSTALLED_PHRASES: &[&str] = &[
    "no matches for kind",
    "could not find the requested resource",
    "the server could not find the requested resource",
];

/// A failed list/get/update call, decoupled from the client's error enum
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{}", .message, code_suffix(.code))]
pub struct ClusterError {
    /// HTTP status code when the API server answered with a status object
    pub code: Option<u16>,
    pub message: String,
}

impl ClusterError {
    pub fn new(code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Build an error as the API server would report an HTTP 404
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Some(404), message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.code == Some(409)
    }
}

fn code_suffix(code: &Option<u16>) -> String {
    code.map(|c| format!(" (HTTP {})", c)).unwrap_or_default()
}

impl From<kube::Error> for ClusterError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(ref response) => Self::new(Some(response.code), response.message.clone()),
            other => Self::new(None, other.to_string()),
        }
    }
}

/// Outcome of classifying a cluster failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The named object does not exist
    NotFound,
    /// The API server has no handler for the requested kind/version
    KindNotInstalled,
    /// Network, permission, serialization and everything else
    Other,
}

impl ErrorClass {
    /// Whether a list call with this outcome means "the CRD is absent"
    pub fn means_kind_absent(&self) -> bool {
        matches!(self, ErrorClass::NotFound | ErrorClass::KindNotInstalled)
    }
}

/// Strategy for mapping cluster failures onto [`ErrorClass`]
pub trait ErrorClassifier: Send + Sync {
    fn classify(&self, err: &ClusterError) -> ErrorClass;
}

/// Best-effort classifier based on HTTP status and message phrasing
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageClassifier;

impl ErrorClassifier for MessageClassifier {
    fn classify(&self, err: &ClusterError) -> ErrorClass {
        let message = err.message.to_lowercase();
        if KIND_NOT_INSTALLED_PHRASES
            .iter()
            .any(|phrase| message.contains(phrase))
        {
            return ErrorClass::KindNotInstalled;
        }
        if err.is_not_found() {
            return ErrorClass::NotFound;
        }
        ErrorClass::Other
    }
}
