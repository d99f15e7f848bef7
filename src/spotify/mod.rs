//! # Spotify Integration Module
//!
//! Client for the two parts of the Spotify Web API spotguess needs:
//!
//! - [`auth`] - OAuth 2.0 PKCE authorization, code exchange and token refresh
//! - [`playlist`] - track listing of a playlist, exposed as a
//!   [`crate::session::TrackSource`]
//!
//! ## API Coverage
//!
//! - `GET /playlists/{playlist_id}/tracks` - first page of a playlist's tracks
//! - `POST /api/token` - token exchange and refresh operations
//!
//! ## Limitations
//!
//! Only the first page (100 tracks) of a playlist is read and failed requests
//! are not retried. Errors are returned to the caller unchanged.

pub mod auth;
pub mod playlist;
