use serde::{Deserialize, Serialize};

use crate::report::AnalysisReport;

/// Lifecycle status of a server-side analysis job.
///
/// Statuses the service may add later deserialize to `Unknown` rather than
/// failing the whole poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Started,
    Deferred,
    Finished,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// `finished` and `failed` end the polling loop; everything else keeps it
    /// ticking.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Finished | JobStatus::Failed)
    }
}

/// A status-check response for one job.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    /// Opaque job identifier
    #[serde(rename = "job_id")]
    pub id: String,
    /// Current lifecycle status
    pub status: JobStatus,
    /// The report; present iff `status` is `finished`
    #[serde(default)]
    pub result: Option<AnalysisReport>,
    /// Failure detail; present iff `status` is `failed`
    #[serde(default)]
    pub error: Option<String>,
}

/// A successfully enqueued analysis request.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Id to poll status for
    pub job_id: String,
    /// Service-relative status URL
    pub status_url: Option<String>,
    /// Service acknowledgement message
    pub message: Option<String>,
}

/// Options sent with an analysis submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOptions {
    /// LLM model the service should use for summary/roadmap generation
    pub model: String,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
        }
    }
}

/// Raw submission response body; validated into [`Submission`].
#[derive(Debug, Deserialize)]
pub(super) struct SubmitResponse {
    pub(super) job_id: Option<String>,
    #[serde(default)]
    pub(super) status_url: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

/// Error body the service returns on non-success responses.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorBody {
    pub(super) error: String,
    #[serde(default)]
    pub(super) details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_known_values() {
        for (raw, expected) in [
            ("queued", JobStatus::Queued),
            ("started", JobStatus::Started),
            ("deferred", JobStatus::Deferred),
            ("finished", JobStatus::Finished),
            ("failed", JobStatus::Failed),
        ] {
            let status: JobStatus = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_unrecognized_status_maps_to_unknown() {
        let status: JobStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(status, JobStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Finished.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Started.is_terminal());
        assert!(!JobStatus::Deferred.is_terminal());
    }

    #[test]
    fn test_job_parses_failed_with_error() {
        let job: Job = serde_json::from_str(
            r#"{"job_id": "xyz", "status": "failed", "error": "rate limited"}"#,
        )
        .unwrap();
        assert_eq!(job.id, "xyz");
        assert_eq!(job.status, JobStatus::Failed);
        assert_eq!(job.error.as_deref(), Some("rate limited"));
        assert!(job.result.is_none());
    }
}
