use crate::debounce::{Debouncer, Generation};
use crate::error::FetchError;
use crate::fetch::NewsSource;
use crate::store::{Action, Effect, FetchRequest, Store};
use crate::types::Article;
use crate::view::{self, View};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

/// Completions reported back to the event loop by spawned tasks.
#[derive(Debug)]
enum Event {
    DebounceElapsed(Generation),
    FetchFinished {
        seq: u64,
        result: Result<Vec<Article>, FetchError>,
    },
}

/// Single-threaded event loop tying the store to its timer and its news source.
pub struct SearchPipeline<S> {
    store: Store,
    debouncer: Debouncer,
    source: S,
}

impl<S: NewsSource> SearchPipeline<S> {
    pub fn new(store: Store, source: S) -> Self {
        Self {
            store,
            debouncer: Debouncer::default(),
            source,
        }
    }

    /// Process user actions until `input` closes, calling `on_view` whenever the view changes.
    ///
    /// The initial query is scheduled immediately, as if it had just been typed.
    /// Closing `input` tears the pipeline down: a pending debounce is cancelled and
    /// the final store is returned.
    pub async fn run<F>(mut self, mut input: mpsc::Receiver<Action>, mut on_view: F) -> Store
    where
        F: FnMut(&View),
    {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut last_view = view::project(&self.store);
        on_view(&last_view);

        self.schedule(&events_tx);

        loop {
            tokio::select! {
                action = input.recv() => match action {
                    Some(action) => self.apply(action, &events_tx),
                    None => break,
                },
                Some(event) = events_rx.recv() => match event {
                    Event::DebounceElapsed(generation) => {
                        if self.debouncer.fire(generation) {
                            self.apply(Action::DebounceElapsed, &events_tx);
                        }
                    }
                    Event::FetchFinished { seq, result } => {
                        self.apply(Action::FetchFinished { seq, result }, &events_tx);
                    }
                },
            }

            let next = view::project(&self.store);
            if next != last_view {
                on_view(&next);
                last_view = next;
            }
        }

        self.debouncer.cancel();
        info!("search pipeline stopped");
        self.store
    }

    fn apply(&mut self, action: Action, events: &UnboundedSender<Event>) {
        match self.store.dispatch(action) {
            Some(Effect::ScheduleDebounce) => self.schedule(events),
            Some(Effect::StartFetch(request)) => self.spawn_fetch(request, events.clone()),
            None => {}
        }
    }

    fn schedule(&mut self, events: &UnboundedSender<Event>) {
        self.debouncer.schedule(events.clone(), Event::DebounceElapsed);
    }

    fn spawn_fetch(&self, request: FetchRequest, events: UnboundedSender<Event>) {
        let source = self.source.clone();
        debug!("starting request #{} for '{}'", request.seq, request.query.keyword);
        tokio::spawn(async move {
            let result = source.fetch(&request.query).await;
            let _ = events.send(Event::FetchFinished {
                seq: request.seq,
                result,
            });
        });
    }
}
