use prost::Message;

/// Unit of downstream processing work: which stored video should be processed.
///
/// Encoded as a protobuf message so the processing subsystem decodes it with the
/// same schema whether it arrives over the broker or through a direct call.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Task {
    #[prost(string, tag = "1")]
    pub video_name: String,
    #[prost(string, tag = "2")]
    pub video_cid: String,
}

impl Task {
    pub fn new(video_name: impl Into<String>, video_cid: impl Into<String>) -> Self {
        Self {
            video_name: video_name.into(),
            video_cid: video_cid.into(),
        }
    }

    /// Binary payload handed to a transport.
    pub fn to_payload(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    pub fn from_payload(payload: &[u8]) -> Result<Self, prost::DecodeError> {
        Self::decode(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_uses_protobuf_field_numbers() {
        let task = Task::new("a", "b");
        // field 1, wire type 2 (len-delimited) then field 2, wire type 2
        assert_eq!(task.to_payload(), vec![0x0a, 0x01, b'a', 0x12, 0x01, b'b']);
    }

    #[test]
    fn test_payload_decodes() {
        let task = Task::new("lecture.mp4", "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi");
        let decoded = Task::from_payload(&task.to_payload()).unwrap();
        assert_eq!(decoded, task);
    }

    #[test]
    fn test_garbage_payload_is_rejected() {
        assert!(Task::from_payload(&[0xff, 0xff, 0xff]).is_err());
    }
}
