use crate::store::Store;
use crate::types::*;

pub const NO_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub url: String,
}

impl From<&Article> for Card {
    fn from(article: &Article) -> Self {
        let description = article
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION);
        Self {
            title: article.title.clone(),
            description: description.to_string(),
            url: article.url.clone(),
        }
    }
}

/// What the user sees. Exactly one variant applies at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Idle,
    Loading,
    Failure { message: String, can_retry: bool },
    NotFound { keyword: String, language: Language },
    Results(Vec<Card>),
}

pub fn project(store: &Store) -> View {
    let query = store.query();
    match store.outcome() {
        None => View::Idle,
        Some(FetchOutcome::Loading) => View::Loading,
        Some(FetchOutcome::Failure(message)) => View::Failure {
            message: message.clone(),
            can_retry: store.last_request().is_some() && query.effective_keyword().is_some(),
        },
        Some(FetchOutcome::Success(articles)) if articles.is_empty() => {
            // Name what was searched, not edits still waiting on the debounce.
            match (query.effective_keyword(), store.last_request()) {
                (Some(_), Some(searched)) => View::NotFound {
                    keyword: searched.keyword.trim().to_string(),
                    language: searched.language,
                },
                _ => View::Idle,
            }
        }
        Some(FetchOutcome::Success(articles)) => View::Results(articles.iter().map(Card::from).collect()),
    }
}
