//! Country detail screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    api::ApiError,
    controller::{DetailController, DetailState},
    country_tui::ui::Styles,
    models::CountryDetail,
};

/// Width of the label column
const LABEL_WIDTH: usize = 18;

/// Outcome of a key press on the detail screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    None,
    /// Return to the list
    Back,
    /// Fetch this country (token, iso3)
    Load(u64, String),
}

pub struct DetailScreen {
    pub controller: DetailController,
    pub scroll_offset: usize,
}

impl Default for DetailScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailScreen {
    pub fn new() -> Self {
        Self {
            controller: DetailController::new(),
            scroll_offset: 0,
        }
    }

    /// Start showing `iso3`; returns the load to dispatch
    pub fn open(&mut self, iso3: &str) -> DetailAction {
        self.scroll_offset = 0;
        let token = self.controller.open(iso3);
        DetailAction::Load(token, iso3.to_string())
    }

    pub fn apply_response(&mut self, token: u64, result: Result<CountryDetail, ApiError>) -> bool {
        self.controller.apply_response(token, result)
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> DetailAction {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => DetailAction::Back,
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                DetailAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_offset += 1;
                DetailAction::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.scroll_offset = 0;
                DetailAction::None
            }
            KeyCode::Char('r') => match self.controller.reload() {
                Some((token, iso3)) => {
                    self.scroll_offset = 0;
                    DetailAction::Load(token, iso3)
                }
                None => DetailAction::None,
            },
            _ => DetailAction::None,
        }
    }

    /// Lines of the body for the current state
    pub fn content_lines(&self) -> Vec<Line<'static>> {
        match self.controller.state() {
            DetailState::Idle => vec![Line::from("No country selected")],
            DetailState::Loading { iso3 } => {
                vec![Line::from(Span::styled(format!("Loading {}...", iso3), Styles::warning()))]
            }
            DetailState::NotFound { iso3 } => vec![
                Line::from(Span::styled("No data found", Styles::error())),
                Line::from(""),
                Line::from(format!("Nothing is known about \"{}\".", iso3)),
            ],
            DetailState::Loaded(detail) => detail
                .field_rows()
                .into_iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(
                            format!("{:<width$}", label, width = LABEL_WIDTH),
                            Styles::header(),
                        ),
                        Span::raw(value),
                    ])
                })
                .collect(),
        }
    }

    fn title(&self) -> String {
        match self.controller.state() {
            DetailState::Loaded(detail) if detail.emoji.is_empty() => detail.name.clone(),
            DetailState::Loaded(detail) => format!("{} {}", detail.emoji, detail.name),
            _ => self.controller.iso3().unwrap_or("Country").to_string(),
        }
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Fields
                Constraint::Length(3), // Instructions
            ])
            .split(area);

        let title = Paragraph::new(self.title())
            .style(Styles::title())
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        let lines = self.content_lines();
        let max_scroll = lines.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let body = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Details")
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));
        f.render_widget(body, chunks[1]);

        let instructions = Paragraph::new("↑/↓: Scroll | r: Reload | Esc/Backspace: Back to list")
            .style(Styles::info())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
        f.render_widget(instructions, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_open_then_not_found() {
        let mut screen = DetailScreen::new();
        let DetailAction::Load(token, iso3) = screen.open("XXX") else {
            panic!("open must request a load");
        };
        assert_eq!(iso3, "XXX");
        assert!(text(&screen.content_lines()).contains("Loading XXX"));

        screen.apply_response(token, Err(ApiError::NotFound("XXX".to_string())));
        assert!(text(&screen.content_lines()).contains("No data found"));
    }

    #[test]
    fn test_loaded_lists_fields() {
        let mut screen = DetailScreen::new();
        let DetailAction::Load(token, _) = screen.open("FRA") else {
            panic!("open must request a load");
        };
        let detail: CountryDetail = serde_json::from_value(serde_json::json!({
            "id": 75,
            "name": "France",
            "iso3": "FRA",
            "capitalName": "Paris",
            "latitude": 46.0,
            "longitude": 2.0
        }))
        .unwrap();
        screen.apply_response(token, Ok(detail));

        let body = text(&screen.content_lines());
        assert!(body.contains("Paris"));
        assert!(body.contains("Longitude"));
        assert_eq!(screen.title(), "France");
    }

    #[test]
    fn test_keys() {
        let mut screen = DetailScreen::new();
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('r'))), DetailAction::None);

        screen.open("PER");
        screen.handle_key_event(key(KeyCode::Down));
        screen.handle_key_event(key(KeyCode::Down));
        assert_eq!(screen.scroll_offset, 2);
        screen.handle_key_event(key(KeyCode::Up));
        assert_eq!(screen.scroll_offset, 1);

        assert!(matches!(
            screen.handle_key_event(key(KeyCode::Char('r'))),
            DetailAction::Load(_, ref iso3) if iso3 == "PER"
        ));
        assert_eq!(screen.scroll_offset, 0);
        assert_eq!(screen.handle_key_event(key(KeyCode::Esc)), DetailAction::Back);
    }
}
