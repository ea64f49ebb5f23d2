//! Search state and the transitions between its states.
//!
//! The store never performs I/O. Every action returns at most one [`Effect`]
//! that the pipeline carries out; its result comes back as another action.

use crate::error::FetchError;
use crate::types::*;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetKeyword(String),
    SetLanguage(Language),
    SetSortBy(SortMode),
    /// The debounce delay passed with no further edits.
    DebounceElapsed,
    /// Explicit user request to repeat the last search.
    Retry,
    FetchFinished {
        seq: u64,
        result: Result<Vec<Article>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub query: QueryState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleDebounce,
    StartFetch(FetchRequest),
}

#[derive(Debug, Default)]
pub struct Store {
    query: QueryState,
    outcome: Option<FetchOutcome>,
    latest_seq: u64,
    last_request: Option<QueryState>,
}

impl Store {
    pub fn new(query: QueryState) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn outcome(&self) -> Option<&FetchOutcome> {
        self.outcome.as_ref()
    }

    pub fn articles(&self) -> &[Article] {
        match &self.outcome {
            Some(FetchOutcome::Success(articles)) => articles,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.outcome, Some(FetchOutcome::Loading))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Some(FetchOutcome::Failure(message)) => Some(message),
            _ => None,
        }
    }

    /// Query used by the most recent request, which is what a retry repeats.
    pub fn last_request(&self) -> Option<&QueryState> {
        self.last_request.as_ref()
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::SetKeyword(keyword) => {
                self.query.set_keyword(keyword);
                Some(Effect::ScheduleDebounce)
            }
            Action::SetLanguage(language) => {
                self.query.set_language(language);
                Some(Effect::ScheduleDebounce)
            }
            Action::SetSortBy(sort_by) => {
                self.query.set_sort_by(sort_by);
                Some(Effect::ScheduleDebounce)
            }
            Action::DebounceElapsed => {
                if self.query.effective_keyword().is_none() {
                    debug!("keyword empty, clearing results");
                    // Anything still in flight belongs to an older query.
                    self.latest_seq += 1;
                    self.outcome = None;
                    return None;
                }
                Some(self.start_fetch(self.query.clone()))
            }
            Action::Retry => {
                // Only a failed search can be retried, and never with the keyword cleared.
                if self.error().is_none() || self.query.effective_keyword().is_none() {
                    debug!("ignoring retry: nothing failed or keyword empty");
                    return None;
                }
                let query = self.last_request.clone()?;
                info!("retrying last search for '{}'", query.keyword);
                Some(self.start_fetch(query))
            }
            Action::FetchFinished { seq, result } => {
                if seq != self.latest_seq {
                    debug!("dropping stale response #{} (latest #{})", seq, self.latest_seq);
                    return None;
                }
                self.outcome = Some(match result {
                    Ok(articles) => FetchOutcome::Success(articles),
                    Err(e) => {
                        error!("Fetch error ({}): {}", e.kind(), e);
                        FetchOutcome::Failure(e.to_string())
                    }
                });
                None
            }
        }
    }

    fn start_fetch(&mut self, query: QueryState) -> Effect {
        self.latest_seq += 1;
        self.outcome = Some(FetchOutcome::Loading);
        self.last_request = Some(query.clone());
        Effect::StartFetch(FetchRequest {
            seq: self.latest_seq,
            query,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: None,
            url: format!("http://example.com/{}", title),
            url_to_image: None,
        }
    }

    fn started(effect: Option<Effect>) -> FetchRequest {
        match effect {
            Some(Effect::StartFetch(request)) => request,
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    #[test]
    fn edits_only_schedule() {
        let mut store = Store::default();
        assert_eq!(store.dispatch(Action::SetKeyword("rust".into())), Some(Effect::ScheduleDebounce));
        assert_eq!(store.dispatch(Action::SetLanguage(Language::En)), Some(Effect::ScheduleDebounce));
        assert_eq!(store.dispatch(Action::SetSortBy(SortMode::Popularity)), Some(Effect::ScheduleDebounce));
        assert!(store.outcome().is_none());
        assert_eq!(store.query().keyword, "rust");
    }

    #[test]
    fn elapse_fetches_snapshot_at_fire_time() {
        let mut store = Store::default();
        for keyword in ["b", "bi", "bitcoin"] {
            store.dispatch(Action::SetKeyword(keyword.into()));
        }
        store.dispatch(Action::SetLanguage(Language::En));

        let request = started(store.dispatch(Action::DebounceElapsed));
        assert_eq!(request.query.keyword, "bitcoin");
        assert_eq!(request.query.language, Language::En);
        assert!(store.is_loading());
    }

    #[test]
    fn empty_keyword_never_fetches() {
        let mut store = Store::default();
        store.dispatch(Action::SetKeyword("  ".into()));
        assert_eq!(store.dispatch(Action::DebounceElapsed), None);
        assert!(store.outcome().is_none());
        assert!(store.articles().is_empty());
    }

    #[test]
    fn success_clears_loading() {
        let mut store = Store::default();
        let request = started(store.dispatch(Action::DebounceElapsed));
        store.dispatch(Action::FetchFinished {
            seq: request.seq,
            result: Ok(vec![article("a"), article("b")]),
        });
        assert!(!store.is_loading());
        assert_eq!(store.articles().len(), 2);
    }

    #[test]
    fn failure_clears_results_and_keeps_message() {
        let mut store = Store::default();
        let first = started(store.dispatch(Action::DebounceElapsed));
        store.dispatch(Action::FetchFinished {
            seq: first.seq,
            result: Ok(vec![article("a")]),
        });

        let second = started(store.dispatch(Action::DebounceElapsed));
        store.dispatch(Action::FetchFinished {
            seq: second.seq,
            result: Err(FetchError::HttpStatus(500)),
        });
        assert!(!store.is_loading());
        assert!(store.articles().is_empty());
        assert!(store.error().unwrap().contains("500"));
    }

    #[test]
    fn retry_repeats_last_request() {
        let mut store = Store::default();
        assert_eq!(store.dispatch(Action::Retry), None);

        store.dispatch(Action::SetKeyword("bitcoin".into()));
        let first = started(store.dispatch(Action::DebounceElapsed));
        store.dispatch(Action::FetchFinished {
            seq: first.seq,
            result: Err(FetchError::Transport("connection refused".into())),
        });

        let retried = started(store.dispatch(Action::Retry));
        assert_eq!(retried.query, first.query);
        assert!(retried.seq > first.seq);
        assert!(store.error().is_none());
    }

    #[test]
    fn retry_is_ignored_after_keyword_cleared() {
        let mut store = Store::default();
        store.dispatch(Action::SetKeyword("bitcoin".into()));
        let request = started(store.dispatch(Action::DebounceElapsed));
        store.dispatch(Action::FetchFinished {
            seq: request.seq,
            result: Err(FetchError::HttpStatus(500)),
        });

        store.dispatch(Action::SetKeyword(String::new()));
        store.dispatch(Action::DebounceElapsed);
        assert_eq!(store.dispatch(Action::Retry), None);
        assert!(store.outcome().is_none());
    }

    #[test]
    fn retry_needs_a_failure() {
        let mut store = Store::default();
        let request = started(store.dispatch(Action::DebounceElapsed));
        assert_eq!(store.dispatch(Action::Retry), None);

        store.dispatch(Action::FetchFinished {
            seq: request.seq,
            result: Ok(vec![article("a")]),
        });
        assert_eq!(store.dispatch(Action::Retry), None);
        assert_eq!(store.articles().len(), 1);
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut store = Store::default();
        store.dispatch(Action::SetKeyword("slow".into()));
        let slow = started(store.dispatch(Action::DebounceElapsed));
        store.dispatch(Action::SetKeyword("fast".into()));
        let fast = started(store.dispatch(Action::DebounceElapsed));

        store.dispatch(Action::FetchFinished {
            seq: fast.seq,
            result: Ok(vec![article("fast")]),
        });
        store.dispatch(Action::FetchFinished {
            seq: slow.seq,
            result: Ok(vec![article("slow")]),
        });
        assert_eq!(store.articles()[0].title, "fast");
    }

    #[test]
    fn clearing_keyword_supersedes_in_flight_request() {
        let mut store = Store::default();
        let request = started(store.dispatch(Action::DebounceElapsed));
        store.dispatch(Action::SetKeyword(String::new()));
        store.dispatch(Action::DebounceElapsed);

        store.dispatch(Action::FetchFinished {
            seq: request.seq,
            result: Err(FetchError::HttpStatus(502)),
        });
        assert!(store.outcome().is_none());
    }
}
