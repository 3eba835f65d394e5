//! Data model for one synthesis job: the request, the provider-side status,
//! and the UI-side record of a generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::SCRIPT_EXCERPT_CHARS;

/// Output container requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Mp4,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
        }
    }
}

/// A single synthesis request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub script_text: String,
    pub source_image_url: String,
    pub output_format: OutputFormat,
}

impl SynthesisRequest {
    pub fn new(script_text: impl Into<String>, source_image_url: impl Into<String>) -> Self {
        Self {
            script_text: script_text.into(),
            source_image_url: source_image_url.into(),
            output_format: OutputFormat::Mp4,
        }
    }
}

/// Remote job status as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Created,
    Started,
    Done,
    Error,
}

impl JobStatus {
    /// `done` and `error` admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            JobStatus::Created => "created",
            JobStatus::Started => "started",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// A playable video reference. Only produced for a `done` job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub url: String,
}

/// Terminal outcome recorded on a handle once observed.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalOutcome {
    Done(VideoResult),
    Failed { message: String },
}

/// Handle to a submitted job, owned by the caller for the lifetime of polling.
#[derive(Debug, Clone, PartialEq)]
pub struct JobHandle {
    job_id: String,
    created_at: DateTime<Utc>,
    terminal: Option<TerminalOutcome>,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            created_at: Utc::now(),
            terminal: None,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Terminal outcome recorded by a completed wait, if any.
    pub fn terminal(&self) -> Option<&TerminalOutcome> {
        self.terminal.as_ref()
    }

    pub(crate) fn record_terminal(&mut self, outcome: TerminalOutcome) {
        self.terminal = Some(outcome);
    }
}

/// Lifecycle phase of one user-triggered generation, as shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisPhase {
    Queued,
    Running,
    Succeeded,
    Failed,
}

/// UI record for one generation. At most one is in flight at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisJob {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub script_excerpt: String,
    pub phase: SynthesisPhase,
    pub remote_status: Option<JobStatus>,
    pub provider_job_id: Option<String>,
    pub video_url: Option<String>,
    pub error: Option<String>,
}

impl SynthesisJob {
    pub fn queued(script: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            script_excerpt: script_excerpt(script),
            phase: SynthesisPhase::Queued,
            remote_status: None,
            provider_job_id: None,
            video_url: None,
            error: None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SynthesisPhase::Queued | SynthesisPhase::Running)
    }
}

/// Short label for a script, used in job records and logs.
pub fn script_excerpt(script: &str) -> String {
    let trimmed = script.trim();
    let mut excerpt: String = trimmed.chars().take(SCRIPT_EXCERPT_CHARS).collect();
    if trimmed.chars().count() > SCRIPT_EXCERPT_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}
