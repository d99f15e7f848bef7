use std::io::{self, BufRead, Write};

use crate::{
    Res, error, info,
    management::{FeedbackManager, TokenManager},
    openai::OpenAiGenerator,
    session::{self, Outcome, Prompter},
    spotify::playlist::SpotifyPlaylistSource,
    success, utils, warning,
};

/// Console prompter on stdin/stdout.
pub struct ConsolePrompter<R> {
    input: R,
}

impl<R: BufRead> ConsolePrompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Prompter for ConsolePrompter<R> {
    fn show(&mut self, message: &str) {
        info!("{}", message);
    }

    fn ask(&mut self, question: &str) -> Res<String> {
        print!("{question}\n> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err("standard input closed".into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

pub async fn guess(url: Option<String>) {
    let stdin = io::stdin();
    let mut prompter = ConsolePrompter::new(stdin.lock());

    let url = match url {
        Some(url) => url,
        None => match prompter.ask("Enter your Spotify playlist URL:") {
            Ok(url) => url,
            Err(e) => error!("Cannot read playlist URL: {}", e),
        },
    };
    let playlist_id = utils::playlist_id_from_url(&url);

    let token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run spotguess auth\n Error: {}",
            e
        ),
    };
    let mut source = SpotifyPlaylistSource::new(token_mgr);

    let generator = match OpenAiGenerator::from_config() {
        Ok(g) => g,
        Err(e) => error!("Cannot set up recommendations: {}", e),
    };

    let store = FeedbackManager::from_config();
    if !store.path().exists() {
        warning!("No feedback history yet, starting from scratch");
    }

    match session::run_session(&playlist_id, &mut source, &generator, &mut prompter, &store).await
    {
        Ok(outcome) => match (&outcome, session::outcome_summary(&outcome)) {
            (Outcome::Confirmed { .. }, Some(summary)) => success!("{}", summary),
            (_, Some(summary)) => info!("{}", summary),
            (_, None) => {}
        },
        Err(e) => error!("Guessing failed: {}", e),
    }
}
