//! # Session Module
//!
//! Runs one guessing session: tally the playlist, rank the artists with the
//! stored feedback, then walk the ranking asking the user to confirm each
//! guess until one is accepted or the ranking runs out.
//!
//! ## Service Seams
//!
//! The external collaborators are passed in explicitly so tests can replace
//! them with in-memory fakes:
//!
//! - [`TrackSource`] - one page of a playlist's tracks
//! - [`TextGenerator`] - a single free-text completion for a prompt
//! - [`Prompter`] - the interactive console
//!
//! ## Learning
//!
//! Every answer changes the in-memory feedback: `+1` for the confirmed artist,
//! `-1` for each rejected one. The feedback is written back exactly once, after
//! the loop, whether a guess was confirmed or not.

#![allow(async_fn_in_trait)]

use crate::{
    Res,
    management::FeedbackManager,
    ranking::{self, FeedbackMap, Guess, OccurrenceMap, RankedArtist},
    types::PlaylistItem,
    utils, warning,
};

/// Playlist-track-listing service.
pub trait TrackSource {
    /// Returns the first page of tracks of `playlist_id`.
    async fn playlist_tracks(&mut self, playlist_id: &str) -> Res<Vec<PlaylistItem>>;
}

/// Text-generation service.
pub trait TextGenerator {
    async fn complete(&self, prompt: &str) -> Res<String>;
}

/// Interactive console.
pub trait Prompter {
    fn show(&mut self, message: &str);

    /// Asks `question` and returns the raw answer line.
    fn ask(&mut self, question: &str) -> Res<String>;
}

/// Terminal state of [`confirm_and_learn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Confirmed { artist: String, attempts: usize },
    Exhausted { attempts: usize },
}

enum LoopState {
    Guessing(usize),
    Confirmed(usize),
    Exhausted,
}

/// Fetches one page of `playlist_id` and counts its artists.
pub async fn tally_playlist<S: TrackSource>(
    source: &mut S,
    playlist_id: &str,
) -> Res<OccurrenceMap> {
    let items = source.playlist_tracks(playlist_id).await?;
    Ok(ranking::tally(&items))
}

pub fn recommendation_prompt(artist: &str, exclusions: &[String]) -> String {
    let listed = exclusions
        .iter()
        .map(|name| format!("'{name}'"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Given this artist: {artist}, recommend a new artist with a similar music style that is not in this list: [{listed}] and give a one sentence summary of how that artist is similar"
    )
}

/// Asks the generator for an artist similar to `artist` that is not in
/// `exclusions`. The answer is used verbatim apart from trimming.
pub async fn recommend<G: TextGenerator>(
    generator: &G,
    artist: &str,
    exclusions: &[String],
) -> Res<String> {
    let prompt = recommendation_prompt(artist, exclusions);
    let completion = generator.complete(&prompt).await?;
    Ok(completion.trim().to_string())
}

fn adjust(feedback: &mut FeedbackMap, artist: &str, delta: i64) {
    let score = feedback.entry(artist.to_string()).or_insert(0);
    *score = score.saturating_add(delta);
}

/// Walks `ranking` until the user confirms a guess.
///
/// A generator failure ends the loop with that error; adjustments made for
/// earlier candidates stay in `feedback`.
pub async fn confirm_and_learn<G: TextGenerator, P: Prompter>(
    ranking: &[RankedArtist],
    exclusions: &[String],
    generator: &G,
    prompter: &mut P,
    feedback: &mut FeedbackMap,
) -> Res<Outcome> {
    let mut state = LoopState::Guessing(0);

    loop {
        state = match state {
            LoopState::Guessing(pos) => match ranking.get(pos) {
                None => LoopState::Exhausted,
                Some(candidate) => {
                    let recommendation = recommend(generator, &candidate.name, exclusions).await?;
                    prompter.show(&format!(
                        "Based on your playlist, your favorite artist might be: {}. I recommend you check out the {}!",
                        candidate.name, recommendation
                    ));

                    let answer = prompter.ask("Was my guess correct? (yes/no)")?;
                    if utils::is_affirmative(&answer) {
                        adjust(feedback, &candidate.name, 1);
                        LoopState::Confirmed(pos)
                    } else {
                        adjust(feedback, &candidate.name, -1);
                        LoopState::Guessing(pos + 1)
                    }
                }
            },
            LoopState::Confirmed(pos) => {
                return Ok(Outcome::Confirmed {
                    artist: ranking[pos].name.clone(),
                    attempts: pos + 1,
                });
            }
            LoopState::Exhausted => {
                return Ok(Outcome::Exhausted {
                    attempts: ranking.len(),
                });
            }
        }
    }
}

/// Runs a complete session for `playlist_id` and persists the learned
/// feedback through `store`.
///
/// The feedback is saved even when the loop fails part way. In that case the
/// loop's error is returned and a failed save is only reported as a warning.
pub async fn run_session<S, G, P>(
    playlist_id: &str,
    source: &mut S,
    generator: &G,
    prompter: &mut P,
    store: &FeedbackManager,
) -> Res<Outcome>
where
    S: TrackSource,
    G: TextGenerator,
    P: Prompter,
{
    let occurrences = tally_playlist(source, playlist_id).await?;
    let mut feedback = store.load().await?;

    let ranked = ranking::rank(&occurrences, &feedback);
    let exclusions = ranking::distinct_artists(&occurrences);

    if let guess @ Guess::NoArtists = ranking::guess(&occurrences, &feedback) {
        prompter.show(&guess.to_string());
    }

    let outcome = confirm_and_learn(&ranked, &exclusions, generator, prompter, &mut feedback).await;
    let saved = store.persist(&feedback).await;

    match (&outcome, saved) {
        (Err(_), Err(e)) => {
            warning!("Failed to save feedback to {}: {}", store.path().display(), e)
        }
        (Ok(_), Err(e)) => return Err(e.into()),
        (_, Ok(())) => {}
    }

    match &outcome {
        Ok(Outcome::Confirmed { .. }) => prompter.show("Yay! Glad I got it right!"),
        Ok(Outcome::Exhausted { .. }) => {
            prompter.show("Hmm, sorry I couldn't guess your favorite artist accurately.")
        }
        Err(_) => {}
    }

    outcome
}

/// Closing line for the command line after a session, if there is anything
/// left to report beyond the session's own status line.
pub fn outcome_summary(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Confirmed { artist, attempts } => Some(format!(
            "Learned that {artist} is your favorite artist after {attempts} guess(es)"
        )),
        Outcome::Exhausted { attempts: 0 } => None,
        Outcome::Exhausted { attempts } => {
            Some(format!("Lowered the score of {attempts} rejected artist(s)"))
        }
    }
}
