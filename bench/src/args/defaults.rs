use std::time::Duration;

pub const DEFAULT_RECORD_COUNT: u64 = 1000;
pub const DEFAULT_SIZES: [u64; 5] = [100, 500, 1000, 5000, 10000];
pub const DEFAULT_COOLDOWN: &str = "1000ms";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "30s";
pub const DEFAULT_ENCODED_BASE_URL: &str = "http://localhost:3001/";
pub const DEFAULT_ARCHIVE_BASE_URL: &str = "http://localhost:3002/";

pub const DEFAULT_COOLDOWN_DURATION: Duration = Duration::from_millis(1000);
pub const DEFAULT_REQUEST_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
