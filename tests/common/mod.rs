use std::time::Duration;

/// How long a test waits before asserting that a thread is still blocked.
pub const BLOCK_GRACE: Duration = Duration::from_millis(100);
pub const SHORT_DELAY: Duration = Duration::from_millis(5);
pub const LONG_TIMEOUT: Duration = Duration::from_secs(3);
pub const ITEMS_LOW: usize = 50;
pub const ITEMS_MEDIUM: usize = 200;
