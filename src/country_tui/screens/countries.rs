//! Country list screen

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    api::ApiError,
    controller::{QueryTicket, ResponseOutcome, Route, TableController},
    country_tui::{
        components::{
            country_table::CountryTable,
            filter_form::{FilterForm, FormEvent},
        },
        traits::Navigable,
        ui::Styles,
    },
    models::{CountryRow, PageResult, SortField},
};

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Filters,
}

/// Outcome of a key press on the list screen
#[derive(Debug, Clone, PartialEq)]
pub enum CountriesAction {
    None,
    /// Run this listing query
    Query(QueryTicket),
    /// Navigate to a route
    Open(Route),
}

/// List screen state
pub struct CountriesScreen {
    pub controller: TableController,
    pub table: CountryTable,
    pub filters: FilterForm,
    pub focus: Focus,
}

impl CountriesScreen {
    pub fn new(page_size: u32, regions: &[String]) -> Self {
        Self {
            controller: TableController::new(page_size),
            table: CountryTable::new(),
            filters: FilterForm::new(regions),
            focus: Focus::Table,
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.filters.set_active(focus == Focus::Filters);
    }

    /// True while keys are going to a text field
    pub fn is_editing(&self) -> bool {
        self.focus == Focus::Filters
    }

    /// Apply a listing response and keep the selection in range
    pub fn apply_response(
        &mut self,
        token: u64,
        result: Result<PageResult<CountryRow>, ApiError>,
    ) -> ResponseOutcome {
        let outcome = self.controller.apply_response(token, result);
        if outcome == ResponseOutcome::Applied {
            self.table.rows_replaced(self.controller.rows().len());
        }
        outcome
    }

    /// Route of the highlighted row
    pub fn selected_route(&self) -> Option<Route> {
        self.table
            .get_selected_index()
            .and_then(|i| self.controller.activate_row(i))
    }

    /// Handle key events for the list screen
    pub fn handle_key_event(&mut self, key: KeyEvent) -> CountriesAction {
        if self.focus == Focus::Filters {
            return match self.filters.handle_key_event(key) {
                FormEvent::Edited => CountriesAction::None,
                FormEvent::Cancelled => {
                    self.set_focus(Focus::Table);
                    CountriesAction::None
                }
                FormEvent::Submitted(criteria) => {
                    self.set_focus(Focus::Table);
                    CountriesAction::Query(self.controller.apply_filter(criteria))
                }
            };
        }

        let ticket = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.table.navigate_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.table.navigate_down();
                None
            }
            KeyCode::Enter | KeyCode::Char('v') => {
                return self
                    .selected_route()
                    .map(CountriesAction::Open)
                    .unwrap_or(CountriesAction::None);
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => self.controller.next_page(),
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => self.controller.previous_page(),
            KeyCode::Home | KeyCode::Char('g') => self.controller.first_page(),
            KeyCode::End | KeyCode::Char('G') => self.controller.last_page(),
            KeyCode::Char('s') => Some(self.controller.cycle_page_size()),
            KeyCode::Char('r') => Some(self.controller.refresh()),
            KeyCode::Char('/') | KeyCode::Char('f') => {
                self.set_focus(Focus::Filters);
                None
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0) as usize;
                let index = (digit + 9) % 10;
                Some(self.controller.change_sort(SortField::ALL[index]))
            }
            _ => None,
        };

        ticket.map(CountriesAction::Query).unwrap_or(CountriesAction::None)
    }

    /// Draw the list screen
    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Filters
                Constraint::Min(0),    // Table
                Constraint::Length(4), // Instructions and pagination
            ])
            .split(area);

        self.draw_title(f, chunks[0]);
        self.filters.render(f, chunks[1]);

        let title = format!(
            "Countries (page size {}, sorted by {} {})",
            self.controller.size(),
            self.controller.sort().field.label(),
            if self.controller.sort().ascending { "asc" } else { "desc" }
        );
        self.table.render(
            f,
            chunks[2],
            self.controller.rows(),
            self.controller.sort(),
            &title,
            self.focus == Focus::Table,
        );

        self.draw_bottom_info(f, chunks[3]);
        self.filters.render_popup(f, area);
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let (text, style) = if self.controller.is_loading() {
            ("Country Directory - Loading...".to_string(), Styles::warning())
        } else if self.controller.total_elements() == 0 {
            ("Country Directory - No countries found".to_string(), Styles::title())
        } else {
            (
                format!("Country Directory - {} countries", self.controller.total_elements()),
                Styles::title(),
            )
        };

        let title = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn draw_bottom_info(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let instructions = match self.focus {
            Focus::Table => vec![
                Line::from("↑/↓: Select | ←/→: Pages | Home/End: First/Last | Enter: Details"),
                Line::from("1-9,0: Sort by column | s: Page size | /: Filters | r: Refresh"),
            ],
            Focus::Filters => vec![
                Line::from("Tab/Shift+Tab: Fields | Enter: Search (region: pick)"),
                Line::from("Ctrl+L: Clear fields | Esc: Back to table"),
            ],
        };

        let instructions_widget = Paragraph::new(instructions).style(Styles::info()).block(
            Block::default()
                .title("Instructions")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(instructions_widget, chunks[0]);

        let total_pages = self.controller.total_pages();
        let pagination_text = if total_pages > 0 {
            format!(
                "Page {} of {}\n{} countries",
                self.controller.shown_page().saturating_add(1),
                total_pages,
                self.controller.total_elements()
            )
        } else {
            "No pages".to_string()
        };

        let pagination_widget = Paragraph::new(pagination_text).style(Styles::info()).block(
            Block::default()
                .title("Navigation")
                .borders(Borders::ALL)
                .border_style(Styles::inactive_border()),
        );
        f.render_widget(pagination_widget, chunks[1]);
    }
}
