use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn ScriptPanel(
    script: String,
    busy: bool,
    on_input: EventHandler<String>,
    on_generate: EventHandler<MouseEvent>,
    on_cancel: EventHandler<MouseEvent>,
) -> Element {
    let generate_label = if busy { "Generating..." } else { "Generate Presenter Video" };
    let generate_opacity = if busy { "0.6" } else { "1.0" };

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 10px;
                padding: 12px; background-color: {BG_ELEVATED};
                border: 1px solid {BORDER_DEFAULT}; border-radius: 8px;
            ",
            span {
                style: "font-size: 11px; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;",
                "1. Write Your Script"
            }
            textarea {
                rows: "6",
                value: "{script}",
                placeholder: "e.g., Hello and welcome! Let's see what our presenter can do.",
                style: "
                    width: 100%; min-width: 0; box-sizing: border-box;
                    padding: 8px 10px; font-size: 12px; line-height: 1.4;
                    background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                    border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                    outline: none;
                    resize: vertical;
                    user-select: text;
                ",
                oninput: move |e| on_input.call(e.value()),
            }
            div {
                style: "display: flex; align-items: center; gap: 8px;",
                button {
                    style: "
                        padding: 8px 14px; border-radius: 6px;
                        border: 1px solid {BORDER_ACCENT};
                        background-color: {BORDER_ACCENT}; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; opacity: {generate_opacity};
                    ",
                    onclick: move |e| on_generate.call(e),
                    "{generate_label}"
                }
                if busy {
                    button {
                        style: "
                            padding: 8px 14px; border-radius: 6px;
                            border: 1px solid {BORDER_DEFAULT};
                            background-color: {BG_SURFACE}; color: {TEXT_PRIMARY};
                            font-size: 12px; cursor: pointer;
                        ",
                        onclick: move |e| on_cancel.call(e),
                        "Cancel"
                    }
                }
            }
        }
    }
}
