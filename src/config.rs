//! Configuration management for spotguess.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It covers Spotify API credentials, the local OAuth
//! callback server, the text generation service and the feedback file location.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (public service endpoints, feedback file location)
//!
//! Values without a sensible default are returned as errors when missing, so the
//! CLI layer can decide how to report them.

use std::{env, path::PathBuf};

use crate::Res;

const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-read-private playlist-read-collaborative";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

/// Loads environment variables from `.env` files.
///
/// Creates the `spotguess` directory below the platform-specific local data
/// directory if it doesn't exist, then loads a `.env` file from the current
/// working directory and from that data directory. Neither file is required;
/// variables that are already set are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotguess/.env`
/// - macOS: `~/Library/Application Support/spotguess/.env`
/// - Windows: `%LOCALAPPDATA%/spotguess/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - An existing `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if PathBuf::from(".env").is_file() {
        dotenv::dotenv().map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Returns the application directory below the local data directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotguess");
    path
}

/// Returns the address the local OAuth callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:8888`.
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID used for the PKCE flow.
///
/// # Errors
///
/// Fails if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at [`server_addr`].
///
/// # Errors
///
/// Fails if `SPOTIFY_API_REDIRECT_URI` is not set.
pub fn spotify_redirect_uri() -> Res<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the Spotify API scope permissions.
///
/// Defaults to read access on private and collaborative playlists.
pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the API key for the text generation service.
///
/// # Errors
///
/// Fails if `OPENAI_API_KEY` is not set.
///
/// # Security Note
///
/// The key should never be printed or written to logs.
pub fn openai_api_key() -> Res<String> {
    required("OPENAI_API_KEY")
}

/// Returns the base URL of the text generation service.
pub fn openai_apiurl() -> String {
    optional("OPENAI_API_URL", DEFAULT_OPENAI_API_URL)
}

/// Returns the model used for recommendations, `gpt-4` unless overridden.
pub fn openai_model() -> String {
    optional("OPENAI_MODEL", DEFAULT_OPENAI_MODEL)
}

/// Returns the location of the persisted feedback scores.
///
/// `SPOTGUESS_FEEDBACK_FILE` overrides the default
/// `<local data dir>/spotguess/artist_feedback.json`.
pub fn feedback_path() -> PathBuf {
    match env::var("SPOTGUESS_FEEDBACK_FILE") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_dir().join("artist_feedback.json"),
    }
}

/// Returns the location of the cached OAuth token.
pub fn token_path() -> PathBuf {
    data_dir().join("cache/token.json")
}

fn required(key: &str) -> Res<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{key} must be set").into()),
    }
}

fn optional(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
