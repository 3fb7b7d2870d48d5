use serde::{Deserialize, Serialize};

/// Public usage figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestStats {
    /// Successful name generations so far.
    pub total_requests: u64,
}

impl RequestStats {
    pub fn new(total_requests: u64) -> Self {
        Self { total_requests }
    }
}
