use tabled::Table;

use crate::{
    error,
    management::{FeedbackManager, TokenManager},
    ranking, session,
    spotify::playlist::SpotifyPlaylistSource,
    types::RankingTableRow,
    utils, warning,
};

/// Prints the current ranking of a playlist's artists without asking
/// anything and without touching the stored feedback.
pub async fn rank(url: String) {
    let playlist_id = utils::playlist_id_from_url(&url);

    let token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run spotguess auth\n Error: {}",
            e
        ),
    };
    let mut source = SpotifyPlaylistSource::new(token_mgr);

    let occurrences = match session::tally_playlist(&mut source, &playlist_id).await {
        Ok(o) => o,
        Err(e) => error!("Failed to fetch playlist {}: {}", playlist_id, e),
    };

    let feedback = match FeedbackManager::from_config().load().await {
        Ok(f) => f,
        Err(e) => error!("Failed to load feedback. Err: {}", e),
    };

    let ranked = ranking::rank(&occurrences, &feedback);
    if ranked.is_empty() {
        warning!("{}", ranking::Guess::NoArtists);
        return;
    }

    let table_rows: Vec<RankingTableRow> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, r)| RankingTableRow {
            rank: i + 1,
            artist: r.name,
            tracks: r.occurrences,
            feedback: r.feedback,
            score: r.total,
        })
        .collect();

    println!("{}", Table::new(table_rows));
}
