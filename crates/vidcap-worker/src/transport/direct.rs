use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use vidcap_core::constants::TASK_CONTENT_TYPE;
use vidcap_core::models::Task;
use vidcap_core::TransportKind;

use super::TaskTransport;
use crate::error::AnnounceError;

/// Hands tasks straight to the task allocator with `POST {base_url}/tasks`.
///
/// The client keeps no idle connections, so each delivery uses its own connection.
pub struct DirectCallTransport {
    client: Client,
    endpoint: String,
}

impl DirectCallTransport {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, AnnounceError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| AnnounceError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/tasks", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TaskTransport for DirectCallTransport {
    async fn deliver(&self, task: &Task) -> Result<(), AnnounceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, TASK_CONTENT_TYPE)
            .body(task.to_payload())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = %self.endpoint, "Task allocator unreachable");
                AnnounceError::Request(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                endpoint = %self.endpoint,
                video_cid = %task.video_cid,
                "Task allocator rejected task"
            );
            return Err(AnnounceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(endpoint = %self.endpoint, video_cid = %task.video_cid, "Task allocated");
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn transport(url: String) -> DirectCallTransport {
        DirectCallTransport::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_delivers_protobuf_payload() {
        let mut server = mockito::Server::new_async().await;
        let task = Task::new("lecture.mp4", "bafkreihdwdcef");
        let expected = String::from_utf8(task.to_payload()).unwrap();
        let mock = server
            .mock("POST", "/tasks")
            .match_header("content-type", TASK_CONTENT_TYPE)
            .match_body(Matcher::Exact(expected))
            .with_status(200)
            .create_async()
            .await;

        transport(format!("{}/", server.url()))
            .deliver(&task)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/tasks")
            .with_status(503)
            .with_body("no workers")
            .create_async()
            .await;

        let err = transport(server.url())
            .deliver(&Task::new("a", "b"))
            .await
            .unwrap_err();
        match err {
            AnnounceError::Rejected { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "no workers");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let t = transport("http://allocator:9000/".to_string());
        assert_eq!(t.endpoint(), "http://allocator:9000/tasks");
        assert_eq!(t.kind(), TransportKind::Direct);
    }
}
