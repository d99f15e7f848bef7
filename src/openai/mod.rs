//! # Text Generation Module
//!
//! Chat-completions client that turns a recommendation prompt into a single
//! free-text answer. Exposed to the session as a
//! [`crate::session::TextGenerator`].
//!
//! ## API Coverage
//!
//! - `POST /chat/completions` - one user message, first choice returned

mod completions;

pub use completions::OpenAiGenerator;
pub use completions::completion_text;
