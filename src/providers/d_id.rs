//! Job client for a D-ID-style talks API.
//!
//! One talk = one synthesis job: an authenticated create call followed by
//! status polling until the provider reports `done` or `error`. The
//! transport sits behind [`TalksApi`] so the poll lifecycle can be driven
//! against a scripted provider in tests.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::constants::{POLL_INTERVAL_SECONDS, POLL_TIMEOUT_SECONDS};
use crate::providers::{PollError, SubmitError};
use crate::state::{
    JobHandle, JobStatus, StudioConfig, SynthesisRequest, TerminalOutcome, VideoResult,
};

/// Request body for `POST /talks`.
#[derive(Debug, Serialize)]
struct CreateTalkBody<'a> {
    script: TalkScript<'a>,
    source_url: &'a str,
    config: TalkConfig<'a>,
}

#[derive(Debug, Serialize)]
struct TalkScript<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    input: &'a str,
    provider: TalkVoice<'a>,
}

#[derive(Debug, Serialize)]
struct TalkVoice<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    voice_id: &'a str,
}

#[derive(Debug, Serialize)]
struct TalkConfig<'a> {
    result_format: &'a str,
}

impl<'a> CreateTalkBody<'a> {
    fn new(request: &'a SynthesisRequest, voice_provider: &'a str, voice_id: &'a str) -> Self {
        Self {
            script: TalkScript {
                kind: "text",
                input: &request.script_text,
                provider: TalkVoice {
                    kind: voice_provider,
                    voice_id,
                },
            },
            source_url: &request.source_image_url,
            config: TalkConfig {
                result_format: request.output_format.as_str(),
            },
        }
    }
}

/// One status response from `GET /talks/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TalkPoll {
    pub status: JobStatus,
    #[serde(default)]
    pub result_url: Option<String>,
    /// Diagnostic payload the provider attaches to failed jobs.
    #[serde(default)]
    pub result: Option<Value>,
}

impl TalkPoll {
    fn error_message(&self) -> String {
        match &self.result {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => "no details provided".to_string(),
        }
    }
}

/// Transport seam for the talks API.
#[async_trait]
pub trait TalksApi {
    /// Create a talk and return the provider's job id.
    async fn create_talk(&self, request: &SynthesisRequest) -> Result<String, SubmitError>;

    /// Query the current status of a talk.
    async fn talk_status(&self, job_id: &str) -> Result<TalkPoll, PollError>;
}

/// reqwest-backed transport against a real talks endpoint.
pub struct DidTalksApi {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    voice_provider: String,
    voice_id: String,
}

impl DidTalksApi {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            voice_provider: config.voice_provider.clone(),
            voice_id: config.voice_id.clone(),
        }
    }

    fn auth_header(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| format!("Basic {key}"))
    }

    fn talks_url(&self) -> String {
        format!("{}/talks", self.base_url.trim_end_matches('/'))
    }

    fn status_url(&self, job_id: &str) -> String {
        format!(
            "{}/talks/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(job_id)
        )
    }
}

#[async_trait]
impl TalksApi for DidTalksApi {
    async fn create_talk(&self, request: &SynthesisRequest) -> Result<String, SubmitError> {
        let auth = self.auth_header().ok_or(SubmitError::MissingCredential)?;
        let url = self.talks_url();
        let body = CreateTalkBody::new(request, &self.voice_provider, &self.voice_id);
        debug!(url = %url, "creating talk");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read response body".to_string());
            warn!(status = status.as_u16(), "talk creation rejected");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        payload
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| SubmitError::MissingJobId {
                body: payload.to_string(),
            })
    }

    async fn talk_status(&self, job_id: &str) -> Result<TalkPoll, PollError> {
        let auth = self.auth_header().ok_or(PollError::MissingCredential)?;
        let url = self.status_url(job_id);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read response body".to_string());
            return Err(PollError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<TalkPoll>().await?)
    }
}

/// Drives the submit/poll lifecycle for one talk at a time.
pub struct TalksClient<A> {
    api: A,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl<A: TalksApi> TalksClient<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            poll_interval: Duration::from_secs(POLL_INTERVAL_SECONDS),
            timeout: Some(Duration::from_secs(POLL_TIMEOUT_SECONDS)),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Submit a synthesis request and return a pollable handle.
    ///
    /// Validates locally first: an empty script or a missing credential
    /// never reaches the network.
    pub async fn submit(&self, request: &SynthesisRequest) -> Result<JobHandle, SubmitError> {
        if request.script_text.trim().is_empty() {
            return Err(SubmitError::EmptyScript);
        }
        let job_id = self.api.create_talk(request).await?;
        info!(job_id = %job_id, "talk created");
        Ok(JobHandle::new(job_id))
    }

    /// Wait for the handle's job to reach a terminal state.
    ///
    /// Polls on a fixed cadence, reporting each observed status to
    /// `observer` without affecting control flow. Returns as soon as the
    /// provider reports `done` or `error`, the deadline elapses, the token
    /// is cancelled, or a status query fails. A handle that already holds a
    /// terminal outcome is not polled again; the cached outcome is returned.
    pub async fn await_completion<F>(
        &self,
        handle: &mut JobHandle,
        cancel: &CancellationToken,
        mut observer: F,
    ) -> Result<VideoResult, PollError>
    where
        F: FnMut(JobStatus),
    {
        if let Some(outcome) = handle.terminal() {
            return match outcome {
                TerminalOutcome::Done(result) => Ok(result.clone()),
                TerminalOutcome::Failed { message } => Err(PollError::Provider {
                    message: message.clone(),
                }),
            };
        }

        let started = Instant::now();
        loop {
            if cancel.is_cancelled() {
                return Err(PollError::Cancelled);
            }

            let poll = self.api.talk_status(handle.job_id()).await?;
            debug!(job_id = %handle.job_id(), status = %poll.status, "polled talk");
            observer(poll.status);

            match poll.status {
                JobStatus::Done => {
                    let url = poll.result_url.ok_or(PollError::MissingResultUrl)?;
                    let result = VideoResult { url };
                    handle.record_terminal(TerminalOutcome::Done(result.clone()));
                    return Ok(result);
                }
                JobStatus::Error => {
                    let message = poll.error_message();
                    warn!(job_id = %handle.job_id(), message = %message, "talk failed");
                    handle.record_terminal(TerminalOutcome::Failed {
                        message: message.clone(),
                    });
                    return Err(PollError::Provider { message });
                }
                JobStatus::Created | JobStatus::Started => {}
            }

            if let Some(limit) = self.timeout {
                let waited = started.elapsed();
                if waited >= limit {
                    return Err(PollError::Timeout { waited });
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(PollError::Cancelled),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Scripted transport: a fixed id for creates, a queue of poll outcomes.
    struct ScriptedApi {
        creates: AtomicUsize,
        polls: AtomicUsize,
        responses: Mutex<Vec<Result<TalkPoll, PollError>>>,
    }

    impl ScriptedApi {
        fn new(responses: Vec<Result<TalkPoll, PollError>>) -> Self {
            Self {
                creates: AtomicUsize::new(0),
                polls: AtomicUsize::new(0),
                responses: Mutex::new(responses),
            }
        }

        fn create_count(&self) -> usize {
            self.creates.load(Ordering::SeqCst)
        }

        fn poll_count(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TalksApi for ScriptedApi {
        async fn create_talk(&self, _request: &SynthesisRequest) -> Result<String, SubmitError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            Ok("job1".to_string())
        }

        async fn talk_status(&self, _job_id: &str) -> Result<TalkPoll, PollError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[async_trait]
    impl TalksApi for Arc<ScriptedApi> {
        async fn create_talk(&self, request: &SynthesisRequest) -> Result<String, SubmitError> {
            self.as_ref().create_talk(request).await
        }

        async fn talk_status(&self, job_id: &str) -> Result<TalkPoll, PollError> {
            self.as_ref().talk_status(job_id).await
        }
    }

    fn pending(status: JobStatus) -> Result<TalkPoll, PollError> {
        Ok(TalkPoll {
            status,
            result_url: None,
            result: None,
        })
    }

    fn done(url: &str) -> Result<TalkPoll, PollError> {
        Ok(TalkPoll {
            status: JobStatus::Done,
            result_url: Some(url.to_string()),
            result: None,
        })
    }

    fn failed(message: &str) -> Result<TalkPoll, PollError> {
        Ok(TalkPoll {
            status: JobStatus::Error,
            result_url: None,
            result: Some(json!(message)),
        })
    }

    fn test_client(api: Arc<ScriptedApi>) -> TalksClient<Arc<ScriptedApi>> {
        TalksClient::new(api)
            .with_poll_interval(Duration::ZERO)
            .with_timeout(None)
    }

    fn request(script: &str) -> SynthesisRequest {
        SynthesisRequest::new(script, "https://cdn.example.com/laura.jpg")
    }

    #[test]
    fn create_talk_payload_matches_provider_contract() {
        let request = request("Hello world");
        let body = CreateTalkBody::new(&request, "microsoft", "en-US-JennyNeural");
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "script": {
                    "type": "text",
                    "input": "Hello world",
                    "provider": { "type": "microsoft", "voice_id": "en-US-JennyNeural" }
                },
                "source_url": "https://cdn.example.com/laura.jpg",
                "config": { "result_format": "mp4" }
            })
        );
    }

    #[test]
    fn talk_poll_deserializes_done_payload() {
        let poll: TalkPoll = serde_json::from_value(json!({
            "status": "done",
            "result_url": "https://x/video.mp4"
        }))
        .unwrap();
        assert_eq!(poll.status, JobStatus::Done);
        assert_eq!(poll.result_url.as_deref(), Some("https://x/video.mp4"));
    }

    #[test]
    fn error_message_renders_string_and_object_diagnostics() {
        let from_string = failed("bad input").unwrap();
        assert_eq!(from_string.error_message(), "bad input");

        let from_object = TalkPoll {
            status: JobStatus::Error,
            result_url: None,
            result: Some(json!({"kind": "ValidationError"})),
        };
        assert_eq!(from_object.error_message(), r#"{"kind":"ValidationError"}"#);

        let empty = TalkPoll {
            status: JobStatus::Error,
            result_url: None,
            result: None,
        };
        assert_eq!(empty.error_message(), "no details provided");
    }

    #[tokio::test]
    async fn empty_script_never_reaches_the_network() {
        let api = Arc::new(ScriptedApi::new(vec![]));
        let client = test_client(api.clone());

        let err = client.submit(&request("   ")).await.unwrap_err();
        assert!(matches!(err, SubmitError::EmptyScript));
        assert_eq!(api.create_count(), 0);
    }

    #[tokio::test]
    async fn missing_credential_never_reaches_the_network() {
        let config = StudioConfig {
            api_key: None,
            ..StudioConfig::default()
        };
        let client = TalksClient::new(DidTalksApi::new(&config));

        let err = client.submit(&request("Hello world")).await.unwrap_err();
        assert!(matches!(err, SubmitError::MissingCredential));
    }

    #[tokio::test]
    async fn submit_returns_provider_job_id() {
        let api = Arc::new(ScriptedApi::new(vec![]));
        let client = test_client(api.clone());

        let handle = client.submit(&request("Hello world")).await.unwrap();
        assert_eq!(handle.job_id(), "job1");
        assert_eq!(api.create_count(), 1);
    }

    #[tokio::test]
    async fn poll_sequence_ending_done_returns_url() {
        let api = Arc::new(ScriptedApi::new(vec![
            pending(JobStatus::Started),
            pending(JobStatus::Started),
            done("https://x/video.mp4"),
        ]));
        let client = test_client(api.clone());
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();
        let mut seen = Vec::new();

        let result = client
            .await_completion(&mut handle, &cancel, |status| seen.push(status))
            .await
            .unwrap();

        assert_eq!(result.url, "https://x/video.mp4");
        assert_eq!(api.poll_count(), 3);
        assert_eq!(
            seen,
            vec![JobStatus::Started, JobStatus::Started, JobStatus::Done]
        );
    }

    #[tokio::test]
    async fn provider_error_stops_polling_immediately() {
        let api = Arc::new(ScriptedApi::new(vec![
            pending(JobStatus::Started),
            failed("bad input"),
        ]));
        let client = test_client(api.clone());
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();
        let mut seen = Vec::new();

        let err = client
            .await_completion(&mut handle, &cancel, |status| seen.push(status))
            .await
            .unwrap_err();

        match err {
            PollError::Provider { message } => assert_eq!(message, "bad input"),
            other => panic!("expected provider error, got {other:?}"),
        }
        assert_eq!(api.poll_count(), 2);
        assert_eq!(seen, vec![JobStatus::Started, JobStatus::Error]);
    }

    #[tokio::test]
    async fn done_without_url_is_malformed() {
        let api = Arc::new(ScriptedApi::new(vec![pending(JobStatus::Done)]));
        let client = test_client(api.clone());
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();

        let err = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::MissingResultUrl));
        assert_eq!(api.poll_count(), 1);
    }

    #[tokio::test]
    async fn transport_failure_aborts_the_wait() {
        let api = Arc::new(ScriptedApi::new(vec![Err(PollError::Http {
            status: 500,
            body: "boom".to_string(),
        })]));
        let client = test_client(api.clone());
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();

        let err = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Http { status: 500, .. }));
        assert_eq!(api.poll_count(), 1);
    }

    #[tokio::test]
    async fn deadline_yields_distinct_timeout_error() {
        let api = Arc::new(ScriptedApi::new(vec![
            pending(JobStatus::Started),
            pending(JobStatus::Started),
        ]));
        let client = TalksClient::new(api.clone())
            .with_poll_interval(Duration::ZERO)
            .with_timeout(Some(Duration::ZERO));
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();

        let err = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Timeout { .. }));
        assert_eq!(api.poll_count(), 1);
    }

    #[tokio::test]
    async fn cancelled_token_polls_nothing() {
        let api = Arc::new(ScriptedApi::new(vec![pending(JobStatus::Started)]));
        let client = test_client(api.clone());
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, PollError::Cancelled));
        assert_eq!(api.poll_count(), 0);
    }

    #[tokio::test]
    async fn terminal_success_is_cached_on_the_handle() {
        let api = Arc::new(ScriptedApi::new(vec![
            pending(JobStatus::Started),
            done("https://x/video.mp4"),
        ]));
        let client = test_client(api.clone());
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();

        let first = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap();
        let second = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(api.poll_count(), 2);
    }

    #[tokio::test]
    async fn terminal_failure_is_cached_on_the_handle() {
        let api = Arc::new(ScriptedApi::new(vec![failed("bad input")]));
        let client = test_client(api.clone());
        let mut handle = JobHandle::new("job1");
        let cancel = CancellationToken::new();

        let first = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap_err();
        let second = client
            .await_completion(&mut handle, &cancel, |_| {})
            .await
            .unwrap_err();

        for err in [first, second] {
            match err {
                PollError::Provider { message } => assert_eq!(message, "bad input"),
                other => panic!("expected provider error, got {other:?}"),
            }
        }
        assert_eq!(api.poll_count(), 1);
    }

    #[test]
    fn status_url_encodes_the_job_id() {
        let api = DidTalksApi::new(&StudioConfig {
            base_url: "https://api.d-id.com/".to_string(),
            ..StudioConfig::default()
        });
        assert_eq!(
            api.status_url("tlk 01"),
            "https://api.d-id.com/talks/tlk%2001"
        );
    }
}
