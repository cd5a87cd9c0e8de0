//! Constants shared across the upload service.

/// Default per-request upload limit (10 MiB).
pub const UPLOAD_SIZE_LIMIT_BYTES: usize = 10 << 20;

/// Prefix of staged upload files in the scratch directory.
pub const TEMP_FILE_PREFIX: &str = "upload-";

/// Work queue that the processing subsystem consumes.
pub const DEFAULT_TASK_QUEUE_NAME: &str = "task_queue";

/// Content type of the encoded `Task` payload on every transport.
pub const TASK_CONTENT_TYPE: &str = "application/x-protobuf";

/// Plain-text response bodies. Clients match on these strings.
pub mod messages {
    pub const VIDEO_UPLOAD_SUCCESSFUL: &str = "Video Upload Successful";
    pub const VIDEO_UPLOAD_FAILED: &str = "Video Upload Failed";
    pub const AD_UPLOAD_SUCCESSFUL: &str = "Ad Upload Successful";
    pub const AD_UPLOAD_FAILED: &str = "Ad Upload Failed";
    pub const UNABLE_TO_PARSE_REQUEST: &str = "Unable to parse Request";
    pub const ONLY_POST_SUPPORTED: &str = "Only POST method supported";
}

/// Multipart field names of the upload forms.
pub mod fields {
    pub const VIDEO_NAME: &str = "videoName";
    pub const VIDEO_DESC: &str = "videoDesc";
    pub const VIDEO_FILE: &str = "videoFile";
    pub const AD_NAME: &str = "adName";
    pub const AD_IMAGE_LINK: &str = "imageLink";
    pub const AD_REDIRECT_URL: &str = "redirectUrl";
    pub const AD_OBJECT: &str = "object";
}
