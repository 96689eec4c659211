mod client;
mod types;

pub use client::{ApiClient, JobApi};
pub use types::{Job, JobStatus, Submission, SubmitOptions};
