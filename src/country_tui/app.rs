//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use super::events::AppEvent;
use super::screens::{CountriesAction, CountriesScreen, DetailAction, DetailScreen};
use super::ui::{centered_rect, Styles};
use crate::api::CountryApi;
use crate::config::Config;
use crate::controller::{QueryTicket, ResponseOutcome};
use crate::models::{FilterCriteria, PageRequest};

pub use crate::controller::Route;

/// How long the loop waits for a key before checking for fetched data
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main TUI application state
pub struct App {
    /// Current location
    pub route: Route,
    pub config: Config,
    api: Arc<dyn CountryApi>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,

    // Screen states
    pub countries: CountriesScreen,
    pub detail: DetailScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn CountryApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let countries = CountriesScreen::new(config.page_size, &config.regions);

        Self {
            route: Route::Countries,
            config,
            api,
            events_tx,
            events_rx,
            countries,
            detail: DetailScreen::new(),
            should_quit: false,
            show_help_popup: false,
            status_message: None,
        }
    }

    /// Seed the list with filters and paging given on the command line
    pub fn preset_list(&mut self, filter: FilterCriteria, request: &PageRequest) {
        self.countries.filters.set_criteria(&filter);
        self.countries.controller.preset(filter, request);
    }

    /// Load the list and open `route`
    pub fn start(&mut self, route: Route) {
        info!("Starting country explorer at {}", route.path());
        self.navigate(route);
        let ticket = self.countries.controller.initial_query();
        self.dispatch_query(ticket);
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        route: Route,
    ) -> Result<()> {
        self.start(route);

        loop {
            terminal.draw(|f| self.draw(f))?;

            self.drain_events();

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply every fetch result that has arrived; returns how many
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next fetch result and apply it
    pub async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_app_event(event);
                true
            }
            None => false,
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PageLoaded { token, result } => {
                // Failures leave the previous rows on screen
                if self.countries.apply_response(token, result) != ResponseOutcome::Stale {
                    self.clear_messages();
                }
            }
            AppEvent::DetailLoaded { token, result } => {
                self.detail.apply_response(token, result);
            }
        }
    }

    /// Handle keyboard input events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return;
        }

        // Text entry owns every printable key
        let editing = self.route == Route::Countries && self.countries.is_editing();
        if !editing {
            match key.code {
                KeyCode::F(1) | KeyCode::Char('?') => {
                    self.show_help_popup = true;
                    return;
                }
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                _ => {}
            }
        }

        match self.route {
            Route::Countries => match self.countries.handle_key_event(key) {
                CountriesAction::None => {}
                CountriesAction::Query(ticket) => self.dispatch_query(ticket),
                CountriesAction::Open(route) => self.navigate(route),
            },
            Route::Country { .. } => match self.detail.handle_key_event(key) {
                DetailAction::None => {}
                DetailAction::Back => self.navigate(Route::Countries),
                DetailAction::Load(token, iso3) => self.dispatch_detail(token, iso3),
            },
        }
    }

    /// Move to `route`, fetching the country when it is a detail route
    pub fn navigate(&mut self, route: Route) {
        debug!("Navigating to {}", route.path());
        if let Route::Country { iso3 } = &route {
            if let DetailAction::Load(token, iso3) = self.detail.open(iso3) {
                self.dispatch_detail(token, iso3);
            }
        }
        self.route = route;
        self.clear_messages();
    }

    fn dispatch_query(&mut self, ticket: QueryTicket) {
        self.set_status("Loading countries...".to_string());
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.search_page(&ticket.filter, &ticket.page_request).await;
            // The receiver only goes away when the app is shutting down
            let _ = tx.send(AppEvent::PageLoaded {
                token: ticket.token,
                result,
            });
        });
    }

    fn dispatch_detail(&mut self, token: u64, iso3: String) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.country_detail(&iso3).await;
            let _ = tx.send(AppEvent::DetailLoaded { token, result });
        });
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout: status bar at bottom, content area above
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        match self.route {
            Route::Countries => self.countries.draw(f, chunks[0]),
            Route::Country { .. } => self.detail.draw(f, chunks[0]),
        }

        self.draw_status_bar(f, chunks[1]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    /// Status bar with the current location and shortcuts
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let (status_text, style) = if let Some(ref msg) = self.status_message {
            (format!("Status: {}", msg), Styles::success())
        } else {
            (
                format!(
                    "{} | {} | Q: Quit | F1/?: Help",
                    self.route.path(),
                    self.config.api_base_url_str()
                ),
                Styles::inactive(),
            )
        };

        let status_bar = Paragraph::new(status_text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(status_bar, area);
    }

    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);
        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .style(Styles::warning()),
            )
            .style(Styles::default());
        f.render_widget(help_popup, popup_area);
    }

    /// Context-sensitive help text
    pub fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            Q - Quit application\n\
            Ctrl+C - Quit from anywhere\n\
            F1 / ? - Toggle this help\n\n";

        let screen_help = match self.route {
            Route::Countries => {
                "Country List:\n\
                ↑/↓ - Select country\n\
                Enter - Show details\n\
                ←/→, PgUp/PgDn - Previous/next page\n\
                Home/End - First/last page\n\
                1-9, 0 - Sort by column (again to reverse)\n\
                s - Cycle page size\n\
                / or f - Edit filters (Enter searches)\n\
                r - Refresh"
            }
            Route::Country { .. } => {
                "Country Details:\n\
                ↑/↓ - Scroll\n\
                r - Reload\n\
                Esc/Backspace - Back to list"
            }
        };

        format!("{}{}", global_help, screen_help)
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_messages(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::controller::DetailState;
    use crate::models::{CountryDetail, CountryRow, PageResult, SortField, SortOrder};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory directory recording every listing request
    #[derive(Default)]
    struct FakeApi {
        requests: Mutex<Vec<(FilterCriteria, PageRequest)>>,
    }

    fn row(iso3: &str) -> CountryRow {
        CountryRow {
            id: 1,
            name: iso3.to_string(),
            iso3: iso3.to_string(),
            numeric_code: String::new(),
            capital_name: String::new(),
            currency: String::new(),
            region: String::new(),
            subregion: String::new(),
            latitude_longitude: String::new(),
            emoji: String::new(),
        }
    }

    #[async_trait]
    impl CountryApi for FakeApi {
        async fn search_page(
            &self,
            filter: &FilterCriteria,
            page_request: &PageRequest,
        ) -> Result<PageResult<CountryRow>, ApiError> {
            self.requests
                .lock()
                .unwrap()
                .push((filter.clone(), page_request.clone()));
            Ok(PageResult {
                content: vec![row("FRA"), row("DEU")],
                page: page_request.page,
                size: page_request.size,
                total_elements: 2,
                total_pages: 1,
            })
        }

        async fn country_detail(&self, iso3: &str) -> Result<CountryDetail, ApiError> {
            if iso3 != "FRA" {
                return Err(ApiError::NotFound(iso3.to_string()));
            }
            Ok(serde_json::from_value(serde_json::json!({
                "id": 75,
                "name": "France",
                "iso3": "FRA"
            }))
            .unwrap())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> (App, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::default());
        (App::new(Config::default(), api.clone()), api)
    }

    #[tokio::test]
    async fn test_start_loads_first_page() {
        let (mut app, api) = app();
        app.start(Route::Countries);
        assert!(app.countries.controller.is_loading());

        assert!(app.next_event().await);
        assert_eq!(app.countries.controller.rows().len(), 2);
        assert!(!app.countries.controller.is_loading());

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1.sort, vec![SortOrder::ascending(SortField::Name)]);
    }

    #[tokio::test]
    async fn test_enter_opens_detail_and_back_returns() {
        let (mut app, _api) = app();
        app.start(Route::Countries);
        app.next_event().await;

        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(
            app.route,
            Route::Country {
                iso3: "FRA".to_string()
            }
        );
        app.next_event().await;
        assert!(matches!(
            app.detail.controller.state(),
            DetailState::Loaded(d) if d.name == "France"
        ));

        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.route, Route::Countries);
    }

    #[tokio::test]
    async fn test_start_on_unknown_country_shows_not_found() {
        let (mut app, _api) = app();
        app.start(Route::Country {
            iso3: "XXX".to_string(),
        });
        // List page and detail both arrive
        app.next_event().await;
        app.next_event().await;
        assert_eq!(
            app.detail.controller.state(),
            &DetailState::NotFound {
                iso3: "XXX".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_q_types_into_filters_instead_of_quitting() {
        let (mut app, _api) = app();
        app.handle_key_event(key(KeyCode::Char('/')));
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.countries.filters.fields[0].value, "q");

        app.handle_key_event(key(KeyCode::Esc));
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_preset_list_shapes_first_request() {
        let (mut app, api) = app();
        let filter = FilterCriteria {
            currency: Some("EUR".to_string()),
            ..Default::default()
        };
        app.preset_list(
            filter.clone(),
            &PageRequest::new(0, 20, SortOrder::ascending(SortField::Iso3)),
        );
        app.start(Route::Countries);
        app.next_event().await;

        let requests = api.requests.lock().unwrap();
        assert_eq!(requests[0].0, filter);
        assert_eq!(requests[0].1.size, 20);
        assert_eq!(app.countries.filters.fields[3].value, "EUR");
    }

    #[test]
    fn test_help_toggles() {
        let (mut app, _api) = app();
        app.handle_key_event(key(KeyCode::Char('?')));
        assert!(app.show_help_popup);
        assert!(app.get_context_help().contains("Sort by column"));
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.show_help_popup);
    }
}
