//! UI components for the studio shell.

mod result_panel;
mod script_panel;
mod status_bar;
mod title_bar;

pub use result_panel::ResultPanel;
pub use script_panel::ScriptPanel;
pub use status_bar::StatusBar;
pub use title_bar::TitleBar;
