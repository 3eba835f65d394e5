use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TitleBar(credential_ready: bool) -> Element {
    let (key_label, key_color) = if credential_ready {
        ("Key Loaded", ACCENT_VIDEO)
    } else {
        ("Key Missing", "#ef4444")
    };
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 40px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; align-items: center; gap: 12px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "Synthesis Studio" }
                span { style: "font-size: 11px; color: {TEXT_MUTED};", "AI presenter generation" }
            }
            span {
                style: "
                    padding: 2px 10px; font-size: 9px;
                    color: {key_color}; border: 1px solid {key_color};
                    border-radius: 999px; text-transform: uppercase;
                    letter-spacing: 0.6px;
                ",
                "{key_label}"
            }
        }
    }
}
