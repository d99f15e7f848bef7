use std::{cell::RefCell, collections::VecDeque, io::Cursor};

use spotguess::{
    Res,
    cli::ConsolePrompter,
    management::FeedbackManager,
    ranking::{self, FeedbackMap, OccurrenceMap, RankedArtist},
    session::*,
    types::{PlaylistItem, PlaylistTrack, TrackArtist},
};
use tempfile::tempdir;

struct FakeSource {
    items: Vec<PlaylistItem>,
    requested: Vec<String>,
}

impl TrackSource for FakeSource {
    async fn playlist_tracks(&mut self, playlist_id: &str) -> Res<Vec<PlaylistItem>> {
        self.requested.push(playlist_id.to_string());
        Ok(self.items.clone())
    }
}

/// Answers with a fixed text; fails once `fail_after` prompts were served.
struct FakeGenerator {
    prompts: RefCell<Vec<String>>,
    fail_after: Option<usize>,
}

impl FakeGenerator {
    fn new() -> Self {
        Self {
            prompts: RefCell::new(Vec::new()),
            fail_after: None,
        }
    }

    fn failing_after(n: usize) -> Self {
        Self {
            prompts: RefCell::new(Vec::new()),
            fail_after: Some(n),
        }
    }

    fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }
}

impl TextGenerator for FakeGenerator {
    async fn complete(&self, prompt: &str) -> Res<String> {
        if self.fail_after == Some(self.calls()) {
            return Err("service unavailable".into());
        }
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok("  artist Tame Impala, dreamy and psychedelic.\n".to_string())
    }
}

struct ScriptedPrompter {
    answers: VecDeque<String>,
    shown: Vec<String>,
    asked: usize,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            shown: Vec::new(),
            asked: 0,
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn show(&mut self, message: &str) {
        self.shown.push(message.to_string());
    }

    fn ask(&mut self, _question: &str) -> Res<String> {
        self.asked += 1;
        self.answers.pop_front().ok_or_else(|| "no more answers".into())
    }
}

fn ranked(names: &[&str]) -> Vec<RankedArtist> {
    let occurrences: OccurrenceMap = names
        .iter()
        .enumerate()
        .map(|(i, n)| (n.to_string(), (names.len() - i) as u64))
        .collect();
    ranking::rank(&occurrences, &FeedbackMap::new())
}

fn track(artists: &[&str]) -> PlaylistItem {
    PlaylistItem {
        track: Some(PlaylistTrack {
            name: "song".to_string(),
            artists: artists
                .iter()
                .map(|name| TrackArtist {
                    name: name.to_string(),
                })
                .collect(),
        }),
    }
}

#[tokio::test]
async fn test_no_no_yes_confirms_third_candidate() {
    let ranking = ranked(&["A", "B", "C", "D"]);
    let generator = FakeGenerator::new();
    let mut prompter = ScriptedPrompter::new(&["no", "nope", "YES", "yes"]);
    let mut feedback = FeedbackMap::from([("B".to_string(), 2)]);

    let outcome = confirm_and_learn(&ranking, &[], &generator, &mut prompter, &mut feedback)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Confirmed {
            artist: "C".to_string(),
            attempts: 3
        }
    );
    assert_eq!(feedback.get("A"), Some(&-1));
    assert_eq!(feedback.get("B"), Some(&1));
    assert_eq!(feedback.get("C"), Some(&1));
    assert_eq!(feedback.get("D"), None);
    // stopped after the third candidate
    assert_eq!(prompter.asked, 3);
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn test_all_rejections_exhaust_the_ranking() {
    let ranking = ranked(&["A", "B", "C", "D", "E"]);
    let generator = FakeGenerator::new();
    let mut prompter = ScriptedPrompter::new(&["no", "no", "", "maybe", "y"]);
    let mut feedback = FeedbackMap::new();

    let outcome = confirm_and_learn(&ranking, &[], &generator, &mut prompter, &mut feedback)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Exhausted { attempts: 5 });
    assert_eq!(prompter.asked, 5);
    for name in ["A", "B", "C", "D", "E"] {
        assert_eq!(feedback.get(name), Some(&-1));
    }
}

#[tokio::test]
async fn test_empty_ranking_is_exhausted_immediately() {
    let generator = FakeGenerator::new();
    let mut prompter = ScriptedPrompter::new(&[]);
    let mut feedback = FeedbackMap::new();

    let outcome = confirm_and_learn(&[], &[], &generator, &mut prompter, &mut feedback)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Exhausted { attempts: 0 });
    assert_eq!(generator.calls(), 0);
    assert!(feedback.is_empty());
}

#[tokio::test]
async fn test_guess_and_trimmed_recommendation_are_shown() {
    let ranking = ranked(&["Pond"]);
    let generator = FakeGenerator::new();
    let mut prompter = ScriptedPrompter::new(&["yes"]);
    let mut feedback = FeedbackMap::new();

    confirm_and_learn(&ranking, &[], &generator, &mut prompter, &mut feedback)
        .await
        .unwrap();

    assert_eq!(
        prompter.shown,
        vec![
            "Based on your playlist, your favorite artist might be: Pond. I recommend you check out the artist Tame Impala, dreamy and psychedelic.!"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_recommend_prompt_lists_exclusions() {
    let generator = FakeGenerator::new();
    let exclusions = vec!["Drake".to_string(), "SZA".to_string()];

    let answer = recommend(&generator, "Drake", &exclusions).await.unwrap();

    assert_eq!(answer, "artist Tame Impala, dreamy and psychedelic.");
    let prompts = generator.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("Given this artist: Drake, recommend a new artist"));
    assert!(prompts[0].contains("not in this list: ['Drake', 'SZA']"));
}

#[tokio::test]
async fn test_run_session_persists_every_adjustment_once() {
    let dir = tempdir().unwrap();
    let store = FeedbackManager::new(dir.path().join("artist_feedback.json"));
    store
        .persist(&FeedbackMap::from([("Blur".to_string(), 5)]))
        .await
        .unwrap();

    let mut source = FakeSource {
        items: vec![
            track(&["Oasis"]),
            track(&["Oasis"]),
            PlaylistItem { track: None },
            track(&["Blur", "Oasis"]),
            track(&["Pulp"]),
        ],
        requested: Vec::new(),
    };
    let generator = FakeGenerator::new();
    let mut prompter = ScriptedPrompter::new(&["no", "yes"]);

    let outcome = run_session("abc123", &mut source, &generator, &mut prompter, &store)
        .await
        .unwrap();

    // Blur: 1 + 5 = 6, Oasis: 3, Pulp: 1
    assert_eq!(
        outcome,
        Outcome::Confirmed {
            artist: "Oasis".to_string(),
            attempts: 2
        }
    );
    assert_eq!(source.requested, vec!["abc123".to_string()]);
    assert!(generator.prompts.borrow()[0].contains("['Blur', 'Oasis', 'Pulp']"));
    assert_eq!(
        prompter.shown.last().map(String::as_str),
        Some("Yay! Glad I got it right!")
    );

    let stored = store.load().await.unwrap();
    assert_eq!(
        stored,
        FeedbackMap::from([("Blur".to_string(), 4), ("Oasis".to_string(), 1)])
    );
}

#[tokio::test]
async fn test_run_session_with_empty_playlist_still_saves() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("artist_feedback.json");
    let store = FeedbackManager::new(path.clone());

    let mut source = FakeSource {
        items: vec![PlaylistItem { track: None }],
        requested: Vec::new(),
    };
    let generator = FakeGenerator::new();
    let mut prompter = ScriptedPrompter::new(&[]);

    let outcome = run_session("empty", &mut source, &generator, &mut prompter, &store)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Exhausted { attempts: 0 });
    assert_eq!(prompter.shown.len(), 2);
    assert_eq!(prompter.shown[0], "No artists found.");
    assert_eq!(
        prompter.shown.last().map(String::as_str),
        Some("Hmm, sorry I couldn't guess your favorite artist accurately.")
    );
    assert!(path.exists());
    assert!(store.load().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_run_session_saves_progress_before_failing() {
    let dir = tempdir().unwrap();
    let store = FeedbackManager::new(dir.path().join("artist_feedback.json"));

    let mut source = FakeSource {
        items: vec![track(&["A"]), track(&["A"]), track(&["B"])],
        requested: Vec::new(),
    };
    let generator = FakeGenerator::failing_after(1);
    let mut prompter = ScriptedPrompter::new(&["no", "yes"]);

    let result = run_session("abc", &mut source, &generator, &mut prompter, &store).await;

    assert!(result.is_err());
    assert_eq!(prompter.asked, 1);
    assert_eq!(
        store.load().await.unwrap(),
        FeedbackMap::from([("A".to_string(), -1)])
    );
}

#[tokio::test]
async fn test_run_session_keeps_service_error_when_save_fails() {
    let dir = tempdir().unwrap();
    // parent of the feedback file is a regular file, so saving must fail
    let blocker = dir.path().join("f");
    std::fs::write(&blocker, "").unwrap();
    let store = FeedbackManager::new(blocker.join("artist_feedback.json"));

    let mut source = FakeSource {
        items: vec![track(&["A"])],
        requested: Vec::new(),
    };
    let generator = FakeGenerator::failing_after(0);
    let mut prompter = ScriptedPrompter::new(&["yes"]);

    let err = run_session("abc", &mut source, &generator, &mut prompter, &store)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "service unavailable");
    assert_eq!(prompter.asked, 0);
}

#[tokio::test]
async fn test_run_session_reports_save_failure_after_successful_loop() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("f");
    std::fs::write(&blocker, "").unwrap();
    let store = FeedbackManager::new(blocker.join("artist_feedback.json"));

    let mut source = FakeSource {
        items: vec![track(&["A"])],
        requested: Vec::new(),
    };
    let generator = FakeGenerator::new();
    let mut prompter = ScriptedPrompter::new(&["yes"]);

    let result = run_session("abc", &mut source, &generator, &mut prompter, &store).await;
    assert!(result.is_err());
}

#[test]
fn test_outcome_summary() {
    assert_eq!(
        outcome_summary(&Outcome::Confirmed {
            artist: "Blur".to_string(),
            attempts: 2
        }),
        Some("Learned that Blur is your favorite artist after 2 guess(es)".to_string())
    );
    assert_eq!(
        outcome_summary(&Outcome::Exhausted { attempts: 3 }),
        Some("Lowered the score of 3 rejected artist(s)".to_string())
    );
    // nothing was guessed, nothing was learned
    assert_eq!(outcome_summary(&Outcome::Exhausted { attempts: 0 }), None);
}

#[test]
fn test_console_prompter_reads_lines() {
    let mut prompter = ConsolePrompter::new(Cursor::new("Yes\r\nno\n"));

    assert_eq!(prompter.ask("first?").unwrap(), "Yes");
    assert_eq!(prompter.ask("second?").unwrap(), "no");
    assert!(prompter.ask("third?").is_err());
}
