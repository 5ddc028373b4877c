//! Request context carrying the acting committer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current request.
///
/// Access checks happen before a service is called; the context only
/// records *who* is acting, for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// ASF UID of the acting committer.
    pub asfuid: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(asfuid: impl Into<String>) -> Self {
        Self {
            asfuid: asfuid.into(),
            request_time: Utc::now(),
        }
    }
}
