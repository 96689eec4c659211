use std::future::Future;

use reqwest::Client;
use url::Url;

use crate::error::{ProfilensError, Result};

use super::types::{ApiErrorBody, Job, Submission, SubmitOptions, SubmitResponse};

/// The two network operations the polling controller needs.
///
/// Both are single-shot and carry no retry policy; retry decisions belong to
/// the caller. The trait seam exists so the controller can be driven by a
/// scripted implementation in tests.
pub trait JobApi: Send + Sync + 'static {
    /// Enqueue an analysis for `username`.
    fn submit(
        &self,
        username: &str,
        options: &SubmitOptions,
    ) -> impl Future<Output = Result<Submission>> + Send;

    /// Fetch the current status of a job.
    fn check_status(&self, job_id: &str) -> impl Future<Output = Result<Job>> + Send;
}

/// HTTP client for the profile analysis service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the service at `base_url`
    /// (e.g. `http://localhost:5001`).
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("profilens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProfilensError::Config(format!("Failed to create HTTP client: {e}")))?;

        let base_url = Url::parse(base_url)
            .map_err(|e| ProfilensError::Config(format!("Invalid base URL: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ProfilensError::Config(format!("Invalid endpoint URL: {e}")))
    }
}

impl JobApi for ApiClient {
    async fn submit(&self, username: &str, options: &SubmitOptions) -> Result<Submission> {
        let url = self.endpoint(&format!("api/analyze/{username}"))?;

        let response = self.client.post(url).json(options).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => match body.details {
                    Some(details) => format!("{}: {details}", body.error),
                    None => body.error,
                },
                Err(_) => format!("service returned HTTP {status}"),
            };
            return Err(ProfilensError::Submission(message));
        }

        let body: SubmitResponse = response.json().await?;

        // The job id is the handle for every later status check; a response
        // without one is unusable even when the HTTP status said success.
        let job_id = body
            .job_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ProfilensError::Submission("submission response carried no job_id".to_string())
            })?;

        Ok(Submission {
            job_id,
            status_url: body.status_url,
            message: body.message,
        })
    }

    async fn check_status(&self, job_id: &str) -> Result<Job> {
        let url = self.endpoint(&format!("api/status/{job_id}"))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("service returned HTTP {status}"),
            };
            return Err(ProfilensError::StatusCheck(message));
        }

        let job: Job = response
            .json()
            .await
            .map_err(|e| ProfilensError::StatusCheck(format!("unparseable status body: {e}")))?;

        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JobStatus;

    #[tokio::test]
    async fn test_submit_returns_job_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/analyze/octocat")
            .match_body(mockito::Matcher::Json(serde_json::json!({"model": "llama3"})))
            .with_status(202)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message": "Analysis enqueued", "job_id": "abc123", "status_url": "/api/status/abc123"}"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let submission = client
            .submit("octocat", &SubmitOptions::default())
            .await
            .unwrap();

        assert_eq!(submission.job_id, "abc123");
        assert_eq!(submission.status_url.as_deref(), Some("/api/status/abc123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_surfaces_service_error_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/analyze/octocat")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Failed to enqueue job", "details": "redis down"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client
            .submit("octocat", &SubmitOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProfilensError::Submission(_)));
        assert!(err.to_string().contains("Failed to enqueue job"));
        assert!(err.to_string().contains("redis down"));
    }

    #[tokio::test]
    async fn test_submit_generic_message_for_unparseable_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/analyze/octocat")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client
            .submit("octocat", &SubmitOptions::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("502"));
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_job_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/analyze/octocat")
            .with_status(202)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Analysis enqueued"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client
            .submit("octocat", &SubmitOptions::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("job_id"));
    }

    #[tokio::test]
    async fn test_check_status_parses_finished_job() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/status/abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "job_id": "abc123",
                    "status": "finished",
                    "result": {
                        "username": "octocat",
                        "overall_score": {"score": 72},
                        "profile_score": {"score": 65},
                        "docs_score": {"score": 40},
                        "repo_quality_score": {"score": 81},
                        "hygiene_score": {"score": 55},
                        "summary": "Solid profile."
                    }
                }"#,
            )
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let job = client.check_status("abc123").await.unwrap();

        assert_eq!(job.status, JobStatus::Finished);
        let report = job.result.unwrap();
        assert_eq!(report.username, "octocat");
        assert_eq!(report.overall_score.score, 72);
    }

    #[tokio::test]
    async fn test_check_status_maps_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/status/gone")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Job not found"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.check_status("gone").await.unwrap_err();

        assert!(matches!(err, ProfilensError::StatusCheck(_)));
        assert!(err.to_string().contains("Job not found"));
    }

    #[tokio::test]
    async fn test_check_status_rejects_unparseable_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/status/abc123")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = ApiClient::new(&server.url()).unwrap();
        let err = client.check_status("abc123").await.unwrap_err();

        assert!(matches!(err, ProfilensError::StatusCheck(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("not a url");
        assert!(matches!(result, Err(ProfilensError::Config(_))));
    }
}
