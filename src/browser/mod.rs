//! The character browser: query state, debounced search and pagination.
//!
//! [`BrowserState`] holds the rules; [`CharacterBrowser`] runs them on a
//! single Tokio task. Callers talk to the task through a [`BrowserHandle`]
//! and observe it through a `watch` channel of state snapshots.

pub mod debounce;
pub mod state;

pub use debounce::Debouncer;
pub use state::{BrowserState, FetchRequest, LoadStatus};

use crate::api::CharacterApi;
use crate::config::BrowserConfig;
use crate::error::{ConfigError, FetchError};
use crate::results::CharacterPage;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// User actions accepted by the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetSearchText(String),
    NextPage,
    PreviousPage,
    Refresh,
    Shutdown,
}

enum Event {
    Command(Command),
    DebounceElapsed(u64),
    FetchCompleted {
        request_id: u64,
        result: Result<CharacterPage, FetchError>,
    },
}

/// Event loop owning the browser state
pub struct CharacterBrowser<A> {
    api: Arc<A>,
    state: BrowserState,
    debouncer: Debouncer,
    in_flight: Option<JoinHandle<()>>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    state_tx: watch::Sender<BrowserState>,
}

impl<A: CharacterApi + 'static> CharacterBrowser<A> {
    /// Start the browser on its own task. The unfiltered listing is
    /// requested immediately.
    pub fn spawn(api: A, config: &BrowserConfig) -> Result<BrowserHandle, ConfigError> {
        let state = BrowserState::new(config.endpoint_url()?);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(state.clone());

        let browser = Self {
            api: Arc::new(api),
            state,
            debouncer: Debouncer::new(config.debounce()),
            in_flight: None,
            events_tx: events_tx.clone(),
            events_rx,
            state_tx,
        };

        let task = tokio::spawn(browser.run());
        Ok(BrowserHandle {
            events: events_tx,
            state: state_rx,
            task: Some(task),
        })
    }

    async fn run(mut self) {
        ::log::info!("Character browser started");
        let request = self.state.fetch_page(None);
        self.start_fetch(request);
        self.publish();

        while let Some(event) = self.events_rx.recv().await {
            if !self.handle(event) {
                break;
            }
            self.publish();
        }

        self.debouncer.cancel();
        self.abort_in_flight();
        ::log::info!("Character browser stopped");
    }

    /// Apply one event. Returns false once the loop should stop.
    fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Command(Command::SetSearchText(text)) => {
                if self.state.set_search_text(text) {
                    let events = self.events_tx.clone();
                    self.debouncer.schedule(move |ticket| {
                        let _ = events.send(Event::DebounceElapsed(ticket));
                    });
                }
            }
            Event::Command(Command::NextPage) => {
                let request = self.state.go_to_next();
                self.paginate(request, "next");
            }
            Event::Command(Command::PreviousPage) => {
                let request = self.state.go_to_previous();
                self.paginate(request, "previous");
            }
            Event::Command(Command::Refresh) => {
                let request = self.state.refresh();
                self.start_fetch(request);
            }
            Event::Command(Command::Shutdown) => return false,
            Event::DebounceElapsed(ticket) => {
                if !self.debouncer.fire(ticket) {
                    ::log::trace!("Ignoring superseded debounce ticket {}", ticket);
                } else if let Some(request) = self.state.debounce_elapsed() {
                    self.start_fetch(request);
                }
            }
            Event::FetchCompleted { request_id, result } => {
                if self.state.complete(request_id, result) {
                    self.in_flight = None;
                }
            }
        }
        true
    }

    /// A pagination link that could not be followed still ends whatever
    /// request was in flight, so its response cannot hide the error.
    fn paginate(&mut self, request: Option<FetchRequest>, direction: &str) {
        match request {
            Some(request) => self.start_fetch(request),
            None if self.state.error().is_some() => self.abort_in_flight(),
            None => ::log::debug!("No {} page", direction),
        }
    }

    fn start_fetch(&mut self, request: FetchRequest) {
        self.abort_in_flight();

        let api = Arc::clone(&self.api);
        let events = self.events_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = api.fetch_page(&request.url).await;
            let _ = events.send(Event::FetchCompleted {
                request_id: request.id,
                result,
            });
        }));
    }

    fn abort_in_flight(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            ::log::debug!("Aborting superseded request");
            previous.abort();
        }
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.state.clone());
    }
}

/// Handle to a running browser
pub struct BrowserHandle {
    events: mpsc::UnboundedSender<Event>,
    state: watch::Receiver<BrowserState>,
    task: Option<JoinHandle<()>>,
}

impl BrowserHandle {
    pub fn send(&self, command: Command) {
        if self.events.send(Event::Command(command)).is_err() {
            ::log::warn!("Character browser is no longer running");
        }
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.send(Command::SetSearchText(text.into()));
    }

    pub fn next_page(&self) {
        self.send(Command::NextPage);
    }

    pub fn previous_page(&self) {
        self.send(Command::PreviousPage);
    }

    pub fn refresh(&self) {
        self.send(Command::Refresh);
    }

    /// Latest published state
    pub fn snapshot(&self) -> BrowserState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state transition
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.clone()
    }

    /// Stop the event loop and wait for it to finish
    pub async fn shutdown(mut self) {
        self.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                ::log::error!("Character browser task failed: {}", e);
            }
        }
    }
}

impl Drop for BrowserHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            let _ = self.events.send(Event::Command(Command::Shutdown));
        }
    }
}
