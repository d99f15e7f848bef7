mod auth;
mod feedback;

pub use auth::TokenManager;
pub use feedback::FeedbackError;
pub use feedback::FeedbackManager;
