use std::time::SystemTime;

use roadwork_core::traits::clock::Clock;
use roadwork_core::SyncError;

/// Clock implementation using std::time::SystemTime.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> Result<i64, SyncError> {
        let elapsed = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|e| SyncError::Clock(format!("SystemTime error: {e}")))?;
        i64::try_from(elapsed.as_millis())
            .map_err(|e| SyncError::Clock(format!("timestamp out of range: {e}")))
    }
}
