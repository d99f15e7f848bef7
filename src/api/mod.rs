//! # API Module
//!
//! HTTP endpoints served by the local callback server while `spotguess auth`
//! is running.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify and exchanges
//!   it, together with the PKCE verifier, for an access token.
//! - [`health`] - Reports that the server is up, with the application name and
//!   version.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
