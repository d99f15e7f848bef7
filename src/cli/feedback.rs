use tabled::Table;

use crate::{error, info, management::FeedbackManager, success, types::FeedbackTableRow};

pub async fn feedback(search: Option<String>, reset: bool) {
    let store = FeedbackManager::from_config();

    if reset {
        match store.reset().await {
            Ok(()) => success!("Feedback history cleared"),
            Err(e) => error!("Cannot clear feedback. Err: {}", e),
        }
        return;
    }

    let scores = match store.load().await {
        Ok(s) => s,
        Err(e) => error!("Failed to load feedback. Err: {}", e),
    };

    let mut rows: Vec<FeedbackTableRow> = scores
        .into_iter()
        .map(|(artist, score)| FeedbackTableRow { artist, score })
        .collect();

    if let Some(term) = search {
        let term = term.to_lowercase();
        rows.retain(|r| r.artist.to_lowercase().contains(&term));
    }

    if rows.is_empty() {
        info!("No feedback stored in {}", store.path().display());
        return;
    }

    // highest score first, then by name
    rows.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.artist.cmp(&b.artist)));
    println!("{}", Table::new(rows));
}
