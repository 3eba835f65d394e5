//! Root application component.
//!
//! Wires the script input and the single trigger action to the talks client:
//! submit, then await completion with per-poll status updates, then render
//! the finished video or the failure. The client itself never touches UI
//! state; the observer callback and the returned results are the only
//! bridges back into signals.

use std::sync::Arc;

use dioxus::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::components::{ResultPanel, ScriptPanel, StatusBar, TitleBar};
use crate::constants::*;
use crate::providers::d_id::{DidTalksApi, TalksClient};
use crate::state::{StudioConfig, SynthesisJob, SynthesisPhase, SynthesisRequest};

#[component]
pub fn App() -> Element {
    let config = use_hook(|| Arc::new(StudioConfig::from_env()));
    let client = use_hook({
        let config = config.clone();
        move || {
            Arc::new(
                TalksClient::new(DidTalksApi::new(&config))
                    .with_poll_interval(config.poll_interval)
                    .with_timeout(config.timeout),
            )
        }
    });

    let mut script_text = use_signal(String::new);
    let current_job = use_signal(|| None::<SynthesisJob>);
    let status_note = use_signal(|| None::<String>);
    let cancel_token = use_signal(|| None::<CancellationToken>);

    let busy = current_job
        .read()
        .as_ref()
        .map(|job| job.is_active())
        .unwrap_or(false);

    let on_generate = {
        let config = config.clone();
        let client = client.clone();
        let script_text = script_text.clone();
        let current_job = current_job.clone();
        let status_note = status_note.clone();
        let cancel_token = cancel_token.clone();
        move |_: MouseEvent| {
            let config = config.clone();
            let client = client.clone();
            let script_text = script_text.clone();
            let mut current_job = current_job.clone();
            let mut status_note = status_note.clone();
            let mut cancel_token = cancel_token.clone();

            let active = current_job
                .read()
                .as_ref()
                .map(|job| job.is_active())
                .unwrap_or(false);
            if active {
                return;
            }

            let script = script_text();
            let queued = SynthesisJob::queued(&script);
            info!(job = %queued.id, "queued synthesis job");
            current_job.set(Some(queued));
            status_note.set(Some("Sending script to our AI presenter...".to_string()));

            let token = CancellationToken::new();
            cancel_token.set(Some(token.clone()));

            spawn(async move {
                let request = SynthesisRequest::new(script, config.avatar_url.clone());

                let mut handle = match client.submit(&request).await {
                    Ok(handle) => handle,
                    Err(err) => {
                        status_note.set(Some(err.to_string()));
                        if let Some(job) = current_job.write().as_mut() {
                            job.phase = SynthesisPhase::Failed;
                            job.error = Some(err.to_string());
                        }
                        cancel_token.set(None);
                        return;
                    }
                };

                info!(
                    job_id = %handle.job_id(),
                    submitted_at = %handle.created_at(),
                    "synthesis job submitted"
                );
                if let Some(job) = current_job.write().as_mut() {
                    job.phase = SynthesisPhase::Running;
                    job.provider_job_id = Some(handle.job_id().to_string());
                }
                status_note.set(Some(format!(
                    "Video generation started (job {}). This can take a few minutes.",
                    handle.job_id()
                )));

                let mut observer_note = status_note.clone();
                let mut observer_job = current_job.clone();
                let outcome = client
                    .await_completion(&mut handle, &token, move |status| {
                        observer_note.set(Some(format!("Video generation status: {status}...")));
                        if let Some(job) = observer_job.write().as_mut() {
                            job.remote_status = Some(status);
                        }
                    })
                    .await;

                match outcome {
                    Ok(video) => {
                        status_note.set(Some("Your AI presenter video is ready!".to_string()));
                        if let Some(job) = current_job.write().as_mut() {
                            job.phase = SynthesisPhase::Succeeded;
                            job.video_url = Some(video.url);
                        }
                    }
                    Err(err) => {
                        status_note.set(Some(err.to_string()));
                        if let Some(job) = current_job.write().as_mut() {
                            job.phase = SynthesisPhase::Failed;
                            job.error = Some(err.to_string());
                        }
                    }
                }
                cancel_token.set(None);
            });
        }
    };

    let on_cancel = {
        let cancel_token = cancel_token.clone();
        let status_note = status_note.clone();
        move |_: MouseEvent| {
            if let Some(token) = cancel_token.read().as_ref() {
                token.cancel();
            }
            let mut status_note = status_note.clone();
            status_note.set(Some("Cancelling...".to_string()));
        }
    };

    let job_view = current_job.read().clone();
    let note_view = status_note.read().clone();
    let job_id_view = job_view
        .as_ref()
        .and_then(|job| job.provider_job_id.clone());

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: 'Segoe UI', 'SF Pro', sans-serif;
            ",
            TitleBar { credential_ready: config.has_credential() }
            div {
                style: "flex: 1; display: flex; flex-direction: column; gap: 12px; padding: 14px; overflow-y: auto;",
                ScriptPanel {
                    script: script_text(),
                    busy: busy,
                    on_input: move |value: String| script_text.set(value),
                    on_generate: on_generate,
                    on_cancel: on_cancel,
                }
                ResultPanel { job: job_view }
            }
            StatusBar { note: note_view, job_id: job_id_view }
        }
    }
}
