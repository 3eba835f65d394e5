use dioxus::prelude::*;
use crate::constants::*;
use crate::state::{SynthesisJob, SynthesisPhase};

#[component]
pub fn ResultPanel(job: Option<SynthesisJob>) -> Element {
    let body = match job.as_ref() {
        None => rsx! {
            div {
                style: "
                    flex: 1; display: flex; align-items: center; justify-content: center;
                    border: 1px dashed {BORDER_DEFAULT}; border-radius: 8px;
                    font-size: 11px; color: {TEXT_DIM};
                ",
                "No video yet. Write a script and hit Generate."
            }
        },
        Some(job) => {
            let (status_label, status_color) = match job.phase {
                SynthesisPhase::Queued => ("Queued", TEXT_MUTED),
                SynthesisPhase::Running => ("Running", ACCENT_RUNNING),
                SynthesisPhase::Succeeded => ("Done", ACCENT_VIDEO),
                SynthesisPhase::Failed => ("Failed", "#ef4444"),
            };
            let remote_label = match job.remote_status {
                Some(status) if status.is_terminal() => format!("provider status: {status} (final)"),
                Some(status) => format!("provider status: {status}"),
                None => "waiting for the provider".to_string(),
            };
            let job_label = job
                .provider_job_id
                .clone()
                .map(|id| format!("Job {id}"))
                .unwrap_or_else(|| "Submitting...".to_string());
            let submitted_label = job.created_at.format("%H:%M:%S").to_string();

            rsx! {
                div {
                    style: "
                        display: flex; flex-direction: column; gap: 8px;
                        padding: 10px; background-color: {BG_SURFACE};
                        border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                    ",
                    div {
                        style: "display: flex; align-items: center; justify-content: space-between; gap: 8px;",
                        span { style: "font-size: 12px; color: {TEXT_PRIMARY};", "{job.script_excerpt}" }
                        span {
                            style: "
                                padding: 2px 8px; font-size: 9px;
                                color: {status_color}; border: 1px solid {status_color};
                                border-radius: 999px; text-transform: uppercase;
                                letter-spacing: 0.6px;
                            ",
                            "{status_label}"
                        }
                    }
                    div {
                        style: "display: flex; align-items: center; justify-content: space-between;",
                        span { style: "font-size: 10px; color: {TEXT_MUTED};", "{job_label} (submitted {submitted_label})" }
                        span { style: "font-size: 10px; color: {TEXT_DIM};", "{remote_label}" }
                    }
                    if job.is_active() {
                        span {
                            style: "font-size: 11px; color: {TEXT_SECONDARY};",
                            "AI is practicing its lines... this can take a few minutes."
                        }
                    }
                    if let Some(error) = job.error.as_ref() {
                        span { style: "font-size: 11px; color: #fca5a5;", "{error}" }
                    }
                    if let Some(url) = job.video_url.as_ref() {
                        span { style: "font-size: 11px; color: {ACCENT_VIDEO};", "Your AI presenter video is ready!" }
                        video {
                            src: "{url}",
                            controls: true,
                            style: "
                                width: 100%; max-height: 420px;
                                background-color: {BG_BASE};
                                border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                            ",
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            style: "
                flex: 1; display: flex; flex-direction: column; gap: 10px;
                padding: 12px; background-color: {BG_ELEVATED};
                border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
                min-height: 320px;
            ",
            span {
                style: "font-size: 11px; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;",
                "2. Presenter Video"
            }
            {body}
        }
    }
}
