use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Extracts the playlist ID from a share URL.
///
/// Takes the segment after the last `/` and drops a `?` query string. No
/// further validation happens: a bare ID passes through unchanged and a
/// malformed URL surfaces later as a lookup failure.
///
/// ```text
/// https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc -> 37i9dQZF1DXcBWIGoYBM5M
/// ```
pub fn playlist_id_from_url(url: &str) -> String {
    let last = url.trim().rsplit('/').next().unwrap_or_default();
    last.split('?').next().unwrap_or_default().to_string()
}

/// `true` only for the word "yes", ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
