//! # CLI Module
//!
//! User-facing commands of spotguess. Each command wires the real services
//! (Spotify, the text generation API, the feedback file) into the library
//! functions and reports failures through the coloured output macros.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth PKCE authorization
//! - [`guess`] - Interactive guessing session that learns from the answers
//! - [`rank`] - Shows how a playlist's artists currently rank
//! - [`feedback`] - Lists or clears the stored feedback scores
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotguess auth
//! spotguess guess --url https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! spotguess rank https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M
//! spotguess feedback --search daft
//! ```

mod auth;
mod feedback;
mod guess;
mod rank;

pub use auth::auth;
pub use feedback::feedback;
pub use guess::ConsolePrompter;
pub use guess::guess;
pub use rank::rank;
