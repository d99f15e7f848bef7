//! Tally, scoring and ranking of playlist artists.
//!
//! Artists are identified by their display name only. Names are case-sensitive
//! keys, so `"Daft Punk"` and `"daft punk"` are counted separately.
//!
//! The total score of an artist is its number of appearances in the playlist
//! plus the feedback score learned from earlier runs (0 when unknown). Ranking
//! is descending by total score; artists with the same total are ordered by
//! name, ascending, so the ranking and the guess are deterministic.

use std::{collections::BTreeMap, fmt};

use crate::types::PlaylistItem;

/// Artist name to number of appearances across the analyzed tracks.
pub type OccurrenceMap = BTreeMap<String, u64>;

/// Artist name to learned feedback score. Absent artists score 0.
pub type FeedbackMap = BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedArtist {
    pub name: String,
    pub occurrences: u64,
    pub feedback: i64,
    pub total: i64,
}

/// Result of [`guess`]. `NoArtists` is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guess {
    Artist(String),
    NoArtists,
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guess::Artist(name) => write!(f, "{name}"),
            Guess::NoArtists => write!(f, "No artists found."),
        }
    }
}

/// Counts artist appearances over a page of playlist items.
///
/// Items without a track (deleted or region-restricted content) are skipped.
/// Every artist credited on a track counts once for that track.
pub fn tally(items: &[PlaylistItem]) -> OccurrenceMap {
    let mut occurrences = OccurrenceMap::new();

    for track in items.iter().filter_map(|item| item.track.as_ref()) {
        for artist in &track.artists {
            *occurrences.entry(artist.name.clone()).or_insert(0) += 1;
        }
    }

    occurrences
}

/// Occurrences plus learned feedback; unknown feedback counts as 0.
pub fn total_score(artist: &str, occurrences: &OccurrenceMap, feedback: &FeedbackMap) -> i64 {
    let count = occurrences.get(artist).copied().unwrap_or(0);
    let count = i64::try_from(count).unwrap_or(i64::MAX);
    count.saturating_add(feedback.get(artist).copied().unwrap_or(0))
}

/// Ranks every artist of `occurrences` by total score, highest first.
pub fn rank(occurrences: &OccurrenceMap, feedback: &FeedbackMap) -> Vec<RankedArtist> {
    let mut ranked: Vec<RankedArtist> = occurrences
        .iter()
        .map(|(name, count)| RankedArtist {
            name: name.clone(),
            occurrences: *count,
            feedback: feedback.get(name).copied().unwrap_or(0),
            total: total_score(name, occurrences, feedback),
        })
        .collect();

    // stable sort keeps the map's name order for equal totals
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked
}

/// Picks the artist with the highest total score.
///
/// Always the head of [`rank`] for the same inputs.
pub fn guess(occurrences: &OccurrenceMap, feedback: &FeedbackMap) -> Guess {
    match rank(occurrences, feedback).into_iter().next() {
        Some(top) => Guess::Artist(top.name),
        None => Guess::NoArtists,
    }
}

/// Distinct artist names seen in the playlist, used as the exclusion list
/// for recommendations.
pub fn distinct_artists(occurrences: &OccurrenceMap) -> Vec<String> {
    occurrences.keys().cloned().collect()
}
