use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned bookkeeping for a persisted user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimMeta {
    /// Optimistic locking version
    pub version: i64,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}
