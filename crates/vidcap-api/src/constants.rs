//! Application-wide constants for the HTTP layer.

pub const VIDEO_PATH: &str = "/video";
pub const AD_PATH: &str = "/ad";
pub const HEALTH_PATH: &str = "/health";

/// Room left for multipart boundaries and text parts on top of the file size limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;
