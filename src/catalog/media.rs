//! External media references.
//!
//! Videos are hosted on YouTube; a video stores only the 11-character id.

use std::sync::OnceLock;

use regex::Regex;

fn bare_id() -> &'static Regex {
    static BARE: OnceLock<Regex> = OnceLock::new();
    BARE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("static id pattern"))
}

fn link() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| {
        Regex::new(
            r"(?i)^(?:https?://)?(?:[\w-]+\.)*(?:youtube\.com/(?:[^/\s]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([a-z0-9_-]{11})(?:[?&#/]|$)",
        )
        .expect("static link pattern")
    })
}

/// Extract the video id from a bare id or a YouTube URL
///
/// Accepts `watch?v=`, `youtu.be/`, `/embed/`, `/v/` and `/e/` forms. The
/// host must be `youtube.com` (or a subdomain of it) or `youtu.be`.
pub fn parse_video_reference(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if bare_id().is_match(input) {
        return Some(input.to_string());
    }

    link()
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Thumbnail served by YouTube for a video id
pub fn default_thumbnail(media_reference: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", media_reference)
}
