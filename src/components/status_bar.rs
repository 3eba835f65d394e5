use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn StatusBar(note: Option<String>, job_id: Option<String>) -> Element {
    let message = note.unwrap_or_else(|| "Ready".to_string());
    let job_label = job_id
        .map(|id| format!("job {id}"))
        .unwrap_or_else(|| "no job".to_string());
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 22px; padding: 0 14px;
                background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT};
                font-size: 11px; color: {TEXT_DIM};
            ",
            span { "{message}" }
            div {
                style: "display: flex; gap: 16px; font-family: 'SF Mono', Consolas, monospace;",
                span { "poll {POLL_INTERVAL_SECONDS}s" }
                span { "{job_label}" }
            }
        }
    }
}
