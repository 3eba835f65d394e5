//! Shared UI constants and provider defaults.

pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";

pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_ACCENT: &str = "#3b82f6";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_RUNNING: &str = "#f97316";
pub const ACCENT_VIDEO: &str = "#22c55e";

/// Root of the talks API every request is issued against.
pub const TALKS_API_BASE: &str = "https://api.d-id.com";

/// Predefined presenter image every talk is rendered from.
pub const AVATAR_SOURCE_URL: &str = "https://cdn.d-id.com/images/predefined_laura.jpg";

/// Fixed speech voice sent with every talk.
pub const VOICE_PROVIDER: &str = "microsoft";
pub const VOICE_ID: &str = "en-US-JennyNeural";

pub const POLL_INTERVAL_SECONDS: u64 = 10;
pub const POLL_TIMEOUT_SECONDS: u64 = 600;
pub const SCRIPT_EXCERPT_CHARS: usize = 48;
