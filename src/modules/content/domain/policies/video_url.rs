use std::sync::LazyLock;

use regex::Regex;

const EMBED_PREFIX: &str = "https://www.youtube.com/embed/";

static WATCH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/watch\?(?:[^#]*&)?v=([A-Za-z0-9_-]+)")
        .expect("valid watch url pattern")
});

static SHORT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?youtu\.be/([A-Za-z0-9_-]+)")
        .expect("valid short url pattern")
});

static SHORTS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.|m\.)?youtube\.com/shorts/([A-Za-z0-9_-]+)")
        .expect("valid shorts url pattern")
});

/// Rewrites shared video links into the embeddable form.
///
/// Watch links, `youtu.be` short links and shorts links become
/// `https://www.youtube.com/embed/<id>`. Anything else, including links that are
/// already embeddable, is returned trimmed but otherwise unchanged.
pub fn normalize_video_url(url: &str) -> String {
    let url = url.trim();

    [&*WATCH_URL, &*SHORT_URL, &*SHORTS_URL]
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|id| format!("{EMBED_PREFIX}{}", id.as_str()))
        .unwrap_or_else(|| url.to_string())
}
