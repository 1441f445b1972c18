//! Error types shared by the remote client, query cache and session store.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` is the single failure type crossing the Remote Client and Query
//! Cache boundary. It is `Clone` because a single in-flight load fans its
//! result out to every caller waiting on the same cache key.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

// =============================================================================
// API ERROR
// =============================================================================

/// Failures produced by a backend round-trip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401; the session has already been cleared.
    #[error("unauthorized")]
    Unauthorized,

    /// A 4xx response (or a 2xx envelope with `success: false`).
    #[error("request rejected (status {status}){}", fmt_message(.message))]
    Rejected { status: u16, message: Option<String> },

    /// A 5xx response.
    #[error("server error (status {status}){}", fmt_message(.message))]
    Server { status: u16, message: Option<String> },

    /// The request never produced a response (offline, CORS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The response did not match the endpoint schema.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("request encoding failed: {0}")]
    Encode(String),
}

fn fmt_message(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Rejected { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::Network(_) | Self::Decode(_) | Self::Encode(_) => None,
        }
    }

    /// Transient failures worth retrying: 5xx and network errors.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Network(_))
    }

    /// The message supplied by the backend, when there is one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } | Self::Server { message, .. } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            _ => None,
        }
    }

    /// Classify a non-2xx status into the matching variant.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            500..=599 => Self::Server { status, message },
            _ => Self::Rejected { status, message },
        }
    }
}

// =============================================================================
// STORAGE ERROR
// =============================================================================

/// Failures writing durable client storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage backend is reachable (private mode, no window).
    #[error("storage unavailable")]
    Unavailable,

    /// The backend refused the write (quota exceeded, permissions).
    #[error("storage write failed for key {key}: {reason}")]
    Write { key: String, reason: String },

    /// The value could not be serialized.
    #[error("storage serialization failed: {0}")]
    Serialize(String),
}
