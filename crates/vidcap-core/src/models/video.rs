use serde::{Deserialize, Serialize};

/// Index entry for a stored video.
///
/// `storage_link` is always a CID returned by the storage backend during the same
/// upload request; the record is only built after storage (and, in synchronous
/// announce mode, the task announcement) succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub name: String,
    pub description: String,
    pub storage_link: String,
}
