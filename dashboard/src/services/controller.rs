// Runs the commands produced by AppState::update as tokio tasks and feeds
// their outcomes back as events through an mpsc channel.
use chrono::Utc;
use engine::SnapshotBuilder;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::{AnalysisOracle, ContextProvider, IntelProvider};
use crate::state::{AppEvent, AppState, Command};

const EVENT_BUFFER: usize = 16;

#[derive(Clone)]
pub struct Providers {
    pub context: Arc<dyn ContextProvider>,
    pub intel: Arc<dyn IntelProvider>,
    pub oracle: Arc<dyn AnalysisOracle>,
}

pub struct Controller {
    providers: Providers,
    builder: Arc<SnapshotBuilder>,
    /// Fixed seed for reproducible series; `None` draws fresh randomness.
    seed: Option<u64>,
    tx: mpsc::Sender<AppEvent>,
    rx: mpsc::Receiver<AppEvent>,
    in_flight: usize,
}

impl Controller {
    pub fn new(providers: Providers, builder: SnapshotBuilder, seed: Option<u64>) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        Self {
            providers,
            builder: Arc::new(builder),
            seed,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Applies an event and starts whatever commands it produced.
    pub fn handle(&mut self, state: AppState, event: AppEvent) -> AppState {
        let (state, commands) = state.update(event);
        for command in commands {
            self.dispatch(command);
        }
        state
    }

    /// Processes results until no task is left running.
    pub async fn settle(&mut self, mut state: AppState) -> AppState {
        while let Some(event) = self.next_event().await {
            state = self.handle(state, event);
        }
        state
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        if self.in_flight == 0 {
            return None;
        }
        let event = self.rx.recv().await;
        self.in_flight -= 1;
        event
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::LoadData { generation, ticker } => {
                let provider = Arc::clone(&self.providers.context);
                let builder = Arc::clone(&self.builder);
                let seed = self.seed;
                self.spawn_task(
                    async move {
                        match provider.fetch_ticker_context(&ticker).await {
                            Ok(context) => {
                                let snapshot = match seed {
                                    Some(seed) => {
                                        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(generation));
                                        builder.build_with_rng(&ticker, context, Utc::now(), &mut rng)
                                    }
                                    None => builder.build(&ticker, context),
                                };
                                AppEvent::DataLoaded { generation, snapshot: Arc::new(snapshot) }
                            }
                            Err(e) => {
                                tracing::error!(ticker = %ticker, generation, error = %e, "Failed to fetch ticker context");
                                AppEvent::DataFailed { generation, error: e.to_string() }
                            }
                        }
                    },
                    move |error| AppEvent::DataFailed { generation, error },
                );
            }
            Command::LoadIntel { generation, ticker } => {
                let provider = Arc::clone(&self.providers.intel);
                self.spawn_task(
                    async move {
                        match provider.fetch_intel(&ticker).await {
                            Ok(news) => {
                                tracing::debug!(ticker = %ticker, count = news.len(), "Fetched intel");
                                AppEvent::IntelLoaded { generation, news }
                            }
                            Err(e) => AppEvent::IntelFailed { generation, error: e.to_string() },
                        }
                    },
                    move |error| AppEvent::IntelFailed { generation, error },
                );
            }
            Command::Analyze { generation, payload } => {
                let oracle = Arc::clone(&self.providers.oracle);
                self.spawn_task(
                    async move {
                        match oracle.analyze(&payload).await {
                            Ok(result) => {
                                tracing::info!(ticker = %payload.ticker, signal = result.signal.signal_type.as_str(), score = result.signal.score, "Oracle analysis complete");
                                AppEvent::AnalysisCompleted { generation, result }
                            }
                            Err(e) => AppEvent::AnalysisFailed { generation, error: e.to_string() },
                        }
                    },
                    move |error| AppEvent::AnalysisFailed { generation, error },
                );
            }
        }
    }

    /// Runs `task` on its own tokio task. Exactly one event always comes back:
    /// the task's own, or `on_abort` when it panicked or was cancelled.
    fn spawn_task<F, A>(&mut self, task: F, on_abort: A)
    where
        F: Future<Output = AppEvent> + Send + 'static,
        A: FnOnce(String) -> AppEvent + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        let handle = tokio::spawn(task);
        tokio::spawn(async move {
            let event = match handle.await {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(error = %e, "Provider task aborted");
                    on_abort(e.to_string())
                }
            };
            deliver(&tx, event).await;
        });
    }
}

async fn deliver(tx: &mpsc::Sender<AppEvent>, event: AppEvent) {
    if let Err(e) = tx.send(event).await {
        tracing::error!(error = %e, "Controller went away before a result could be delivered");
    }
}
