//! Interactive terminal surface for the character browser.

pub mod events;
pub mod render;

pub use events::{EventsService, UiEvent};
pub use render::ViewState;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};

use crate::browser::BrowserHandle;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Put the terminal back into a usable state. Safe to call from a panic hook.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = execute!(io::stdout(), crossterm::cursor::Show);
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the interactive browser until the user quits
pub async fn start_loop(handle: BrowserHandle, initial_search: String) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &handle, initial_search).await;
    restore_terminal(&mut terminal)?;
    handle.shutdown().await;
    result
}

async fn run(terminal: &mut Term, handle: &BrowserHandle, initial_search: String) -> Result<()> {
    let mut events = EventsService::new(handle.subscribe());
    let mut view = ViewState {
        search: initial_search,
        scroll: 0,
    };
    if !view.search.is_empty() {
        handle.set_search_text(view.search.clone());
    }

    loop {
        let state = handle.snapshot();
        terminal.draw(|frame| render::draw(frame, &state, &view))?;
        let width = terminal.size()?.width;

        match events.next().await? {
            UiEvent::Input(c) => {
                view.search.push(c);
                view.scroll = 0;
                handle.set_search_text(view.search.clone());
            }
            UiEvent::Backspace => {
                if view.search.pop().is_some() {
                    view.scroll = 0;
                    handle.set_search_text(view.search.clone());
                }
            }
            UiEvent::ClearSearch => {
                view.search.clear();
                view.scroll = 0;
                handle.set_search_text(String::new());
            }
            UiEvent::NextPage => {
                if state.can_go_next() {
                    view.scroll = 0;
                    handle.next_page();
                }
            }
            UiEvent::PreviousPage => {
                if state.can_go_previous() {
                    view.scroll = 0;
                    handle.previous_page();
                }
            }
            UiEvent::Refresh => handle.refresh(),
            UiEvent::ScrollUp => view.scroll = view.scroll.saturating_sub(1),
            UiEvent::ScrollDown => {
                let rows = render::card_rows(state.characters.len(), width);
                if view.scroll + 1 < rows {
                    view.scroll += 1;
                }
            }
            UiEvent::Quit => return Ok(()),
            UiEvent::Redraw => {}
        }
    }
}
