use std::sync::Arc;

use crate::helpers::time::now_ms;

/// Time source for expiry decisions.
///
/// All validity checks go through this trait instead of calling the wall
/// clock directly, so tests can drive expiry deterministically.
pub trait Clock: Send + Sync {
    /// Current UNIX timestamp, milliseconds.
    fn now_ms(&self) -> i64;
}

/// Wall-clock implementation used in production.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        now_ms()
    }
}

pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}
