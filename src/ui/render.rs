use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::browser::{BrowserState, LoadStatus};
use crate::results::Character;

const CARD_WIDTH: u16 = 40;
const CARD_HEIGHT: u16 = 8;

/// Terminal-only view state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Search text as typed, ahead of the browser's copy
    pub search: String,
    /// Index of the first visible card row
    pub scroll: usize,
}

pub fn draw(frame: &mut Frame, state: &BrowserState, view: &ViewState) {
    let [search_area, controls_area, status_area, cards_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    let search = Paragraph::new(view.search.as_str()).block(
        Block::bordered()
            .title(" Rick and Morty Characters ")
            .title_bottom(" type to search by name, Esc to quit "),
    );
    frame.render_widget(search, search_area);
    frame.set_cursor_position((
        search_area.x + 1 + view.search.chars().count() as u16,
        search_area.y + 1,
    ));

    frame.render_widget(Paragraph::new(controls_line(state)), controls_area);
    frame.render_widget(Paragraph::new(status_line(state)), status_area);

    if matches!(state.status, LoadStatus::Loaded) {
        draw_cards(frame, &state.characters, view.scroll, cards_area);
    }
}

/// Previous/next controls; a control without a target URL is dimmed and
/// loses its arrow.
pub fn controls_line(state: &BrowserState) -> Line<'static> {
    let enabled = Style::default().add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let prev = if state.can_go_previous() {
        Span::styled("< Prev", enabled)
    } else {
        Span::styled("  Prev", disabled)
    };
    let next = if state.can_go_next() {
        Span::styled("Next >", enabled)
    } else {
        Span::styled("Next  ", disabled)
    };

    let page = match (state.current_page(), state.info.pages) {
        (Some(page), Some(pages)) => format!("  page {page} of {pages}  "),
        (Some(page), None) => format!("  page {page}  "),
        _ => "  ".to_string(),
    };

    Line::from(vec![prev, Span::raw(page), next])
}

pub fn status_text(state: &BrowserState) -> String {
    match &state.status {
        LoadStatus::Idle => String::new(),
        LoadStatus::Loading => "Loading characters...".to_string(),
        LoadStatus::Failed(message) => format!("Error: {message}"),
        LoadStatus::Empty => "No characters found matching your search.".to_string(),
        LoadStatus::Loaded => {
            let total = state
                .info
                .count
                .unwrap_or(state.characters.len() as u64);
            if total == 1 {
                "1 character".to_string()
            } else {
                format!("{total} characters")
            }
        }
    }
}

fn status_line(state: &BrowserState) -> Line<'static> {
    let style = match state.status {
        LoadStatus::Failed(_) => Style::default().fg(Color::Red),
        LoadStatus::Loading => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    Line::styled(status_text(state), style)
}

pub fn card_lines(character: &Character) -> Vec<Line<'static>> {
    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(value.to_string()),
        ])
    };

    vec![
        field("Status", &character.status),
        field("Species", &character.species),
        field("Gender", &character.gender),
        field("Origin", &character.origin.name),
        field("Location", &character.location.name),
        Line::styled(character.image.clone(), Style::default().fg(Color::DarkGray)),
    ]
}

fn draw_cards(frame: &mut Frame, characters: &[Character], scroll: usize, area: Rect) {
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let card_width = area.width / columns as u16;

    let rows = characters.chunks(columns).skip(scroll).take(visible_rows);
    for (row, chunk) in rows.enumerate() {
        for (column, character) in chunk.iter().enumerate() {
            let card_area = Rect {
                x: area.x + column as u16 * card_width,
                y: area.y + row as u16 * CARD_HEIGHT,
                width: card_width,
                height: CARD_HEIGHT.min(area.height.saturating_sub(row as u16 * CARD_HEIGHT)),
            };
            let card = Paragraph::new(card_lines(character))
                .wrap(Wrap { trim: true })
                .block(Block::bordered().title(Span::styled(
                    format!(" {} ", character.name),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
            frame.render_widget(card, card_area);
        }
    }
}

/// Number of card rows the current page spans for a given terminal width
pub fn card_rows(count: usize, width: u16) -> usize {
    let columns = (width / CARD_WIDTH).max(1) as usize;
    count.div_ceil(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;
    use crate::error::FetchError;
    use crate::results::fixtures;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use url::Url;

    fn loaded(names: &[&str], prev: Option<&str>, next: Option<&str>) -> BrowserState {
        let mut state = BrowserState::new(Url::parse(DEFAULT_ENDPOINT).unwrap());
        let request = state.fetch_page(None);
        state.complete(request.id, Ok(fixtures::page(names, prev, next)));
        state
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn render(state: &BrowserState, view: &ViewState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, state, view)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_single_result_with_next_link() {
        let state = loaded(
            &["Rick"],
            None,
            Some("https://rickandmortyapi.com/api/character/?page=2"),
        );

        let controls = line_text(&controls_line(&state));
        assert!(!controls.contains("< Prev"));
        assert!(controls.contains("Next >"));
        assert!(controls.contains("page 1 of 2"));

        let screen = render(&state, &ViewState::default());
        assert_eq!(screen.matches("┌ Rick ─").count(), 1);
        assert!(screen.contains("Earth (C-137)"));
        assert!(screen.contains("Citadel of Ricks"));
    }

    #[test]
    fn test_status_messages() {
        let empty = {
            let mut state = BrowserState::new(Url::parse(DEFAULT_ENDPOINT).unwrap());
            let request = state.fetch_page(None);
            state.complete(request.id, Ok(crate::results::CharacterPage::empty()));
            state
        };
        assert_eq!(status_text(&empty), "No characters found matching your search.");

        let mut failed = loaded(&["Rick"], None, None);
        let request = failed.fetch_page(None);
        assert_eq!(status_text(&failed), "Loading characters...");
        failed.complete(request.id, Err(FetchError::Status(500)));
        assert_eq!(status_text(&failed), "Error: HTTP error, status: 500");

        assert_eq!(status_text(&loaded(&["Rick", "Morty"], None, None)), "2 characters");
        assert_eq!(status_text(&loaded(&["Rick"], None, None)), "1 character");
    }

    #[test]
    fn test_error_hides_cards() {
        let mut state = loaded(&["Rick"], None, None);
        let request = state.fetch_page(None);
        state.complete(request.id, Err(FetchError::Status(500)));

        let screen = render(&state, &ViewState::default());
        assert!(screen.contains("Error: HTTP error, status: 500"));
        assert!(!screen.contains("Citadel of Ricks"));
    }

    #[test]
    fn test_search_text_is_shown() {
        let state = loaded(&["Rick"], None, None);
        let view = ViewState {
            search: "rick".to_string(),
            scroll: 0,
        };
        let screen = render(&state, &view);
        assert!(screen.contains("rick"));
    }

    #[test]
    fn test_card_rows() {
        assert_eq!(card_rows(20, 80), 10);
        assert_eq!(card_rows(3, 120), 1);
        assert_eq!(card_rows(1, 10), 1);
        assert_eq!(card_rows(0, 80), 0);
    }
}
