pub mod accent;
pub mod video_url;

pub use accent::{accent_hex, AccentColor, ACCENT_COLORS};
pub use video_url::normalize_video_url;
