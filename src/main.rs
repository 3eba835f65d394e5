//! Synthesis Studio
//!
//! A desktop front-end for script-to-presenter video generation: write a
//! script, send it to the talks provider, watch the finished clip.

mod app;
mod components;
mod constants;
mod providers;
mod state;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    // Pick up D_ID_API_KEY from a local .env during development.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "synthesis_studio=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Synthesis Studio")
                .with_inner_size(LogicalSize::new(960.0, 720.0))
                .with_resizable(true),
        )
        .with_menu(None);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
