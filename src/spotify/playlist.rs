use reqwest::Client;

use crate::{
    Res, config,
    management::TokenManager,
    session::TrackSource,
    types::{PlaylistItem, PlaylistTracksResponse},
    utils,
};

/// Page size of the single playlist request. Playlists longer than this are
/// truncated: following `next` is deliberately not done.
pub const PLAYLIST_PAGE_SIZE: u32 = 100;

/// Retrieves the first page of tracks of a playlist.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Playlist ID as found at the end of a share URL
///
/// # Returns
///
/// The playlist items in playlist order. Items whose track is unavailable
/// are kept with `track: None`.
///
/// # Errors
///
/// Network failures, non-success statuses (unknown playlist, missing scope,
/// expired token) and malformed bodies are returned as they are. There is no
/// retry.
pub async fn get_playlist_tracks(
    token: &str,
    playlist_id: &str,
) -> Result<Vec<PlaylistItem>, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{playlist_id}/tracks?limit={limit}",
        uri = &config::spotify_apiurl(),
        limit = PLAYLIST_PAGE_SIZE
    );

    let client = Client::new();
    let response = client
        .get(&api_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;

    let res = response.json::<PlaylistTracksResponse>().await?;
    Ok(res.items)
}

/// [`TrackSource`] backed by the Spotify Web API.
pub struct SpotifyPlaylistSource {
    token_mgr: TokenManager,
}

impl SpotifyPlaylistSource {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self { token_mgr }
    }
}

impl TrackSource for SpotifyPlaylistSource {
    async fn playlist_tracks(&mut self, playlist_id: &str) -> Res<Vec<PlaylistItem>> {
        let token = self.token_mgr.get_valid_token().await?;

        let pb = utils::spinner("Fetching playlist tracks...");
        let result = get_playlist_tracks(&token, playlist_id).await;
        pb.finish_and_clear();

        Ok(result?)
    }
}
