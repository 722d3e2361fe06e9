use serde::{Deserialize, Serialize};

/// Load state of one independently fetched data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchStatus::Ready)
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Issues request ids so that only the most recent request may land.
///
/// Every call to [`RequestTracker::issue`] supersedes all earlier ids;
/// [`RequestTracker::invalidate`] supersedes them without issuing a new one.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new request id
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Drop every in-flight request
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    /// Whether a completion for `id` may still be applied
    pub fn is_current(&self, id: u64) -> bool {
        id == self.latest
    }
}
