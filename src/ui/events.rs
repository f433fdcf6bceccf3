use anyhow::Result;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use futures::StreamExt;
use tokio::sync::watch;

use crate::browser::BrowserState;

/// Everything the terminal loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Input(char),
    Backspace,
    ClearSearch,
    NextPage,
    PreviousPage,
    Refresh,
    ScrollUp,
    ScrollDown,
    Quit,
    /// Browser state or terminal size changed
    Redraw,
}

/// Merges keyboard input with browser state notifications
pub struct EventsService {
    crossterm_events: EventStream,
    state: Option<watch::Receiver<BrowserState>>,
}

impl EventsService {
    pub fn new(state: watch::Receiver<BrowserState>) -> EventsService {
        EventsService {
            crossterm_events: EventStream::new(),
            state: Some(state),
        }
    }

    pub async fn next(&mut self) -> Result<UiEvent> {
        loop {
            let watching = self.state.is_some();
            let evt = tokio::select! {
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => handle_crossterm(input),
                    Some(Err(e)) => return Err(e.into()),
                    None => Some(UiEvent::Quit),
                },
                result = changed(&mut self.state), if watching => match result {
                    Ok(()) => Some(UiEvent::Redraw),
                    Err(_) => {
                        ::log::warn!("Character browser stopped publishing state");
                        self.state = None;
                        None
                    }
                },
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}

fn handle_crossterm(event: CrosstermEvent) -> Option<UiEvent> {
    match event {
        CrosstermEvent::Key(key) => map_key(key),
        CrosstermEvent::Resize(_, _) => Some(UiEvent::Redraw),
        _ => None,
    }
}

async fn changed(
    state: &mut Option<watch::Receiver<BrowserState>>,
) -> Result<(), watch::error::RecvError> {
    match state {
        Some(rx) => rx.changed().await,
        None => std::future::pending().await,
    }
}

/// Translate a key press into a UI event
pub fn map_key(key: KeyEvent) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(UiEvent::Quit),
        KeyCode::Char('r') if ctrl => Some(UiEvent::Refresh),
        KeyCode::Char('u') if ctrl => Some(UiEvent::ClearSearch),
        KeyCode::Char('n') if ctrl => Some(UiEvent::NextPage),
        KeyCode::Char('p') if ctrl => Some(UiEvent::PreviousPage),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(UiEvent::Input(c)),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Right | KeyCode::PageDown => Some(UiEvent::NextPage),
        KeyCode::Left | KeyCode::PageUp => Some(UiEvent::PreviousPage),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::Esc => Some(UiEvent::Quit),
        _ => None,
    }
}
