//! Country table component

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::{
    country_tui::{
        traits::Navigable,
        ui::{fit_width, Styles},
    },
    models::{CountryRow, SortField, SortOrder},
};

/// Display widths of the columns, in `SortField::ALL` order
pub const COLUMN_WIDTHS: [usize; 10] = [4, 22, 4, 5, 16, 8, 10, 18, 20, 4];

/// Selection and rendering state of the country list
pub struct CountryTable {
    pub state: ListState,
    pub row_count: usize,
}

impl Default for CountryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryTable {
    pub fn new() -> Self {
        Self {
            state: ListState::default(),
            row_count: 0,
        }
    }

    /// Reset selection after the rows were replaced
    pub fn rows_replaced(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.navigate_to_first();
    }

    /// Header line with the sort marker on the active column
    pub fn header(sort: SortOrder) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (field, width)) in SortField::ALL.iter().zip(COLUMN_WIDTHS).enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", Styles::header()));
            }
            let marker = if *field == sort.field {
                if sort.ascending { "▲" } else { "▼" }
            } else {
                ""
            };
            let key = (i + 1) % 10;
            let label = format!("{}{}{}", key, field.label(), marker);
            spans.push(Span::styled(fit_width(&label, width), Styles::header()));
        }
        Line::from(spans)
    }

    /// One formatted table line
    pub fn row_line(row: &CountryRow) -> String {
        SortField::ALL
            .iter()
            .zip(COLUMN_WIDTHS)
            .map(|(field, width)| fit_width(&row.column_text(*field), width))
            .collect::<Vec<_>>()
            .join("│")
    }

    pub fn render(
        &mut self,
        f: &mut Frame,
        area: Rect,
        rows: &[CountryRow],
        sort: SortOrder,
        title: &str,
        focused: bool,
    ) {
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                ListItem::new(Line::from(Span::styled(Self::row_line(row), Style::default())))
            })
            .collect();

        let border_style = if focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.height == 0 {
            return;
        }

        let header_area = Rect { height: 1, ..inner };
        f.render_widget(ratatui::widgets::Paragraph::new(Self::header(sort)), header_area);

        let list_area = Rect {
            y: inner.y + 1,
            height: inner.height - 1,
            ..inner
        };
        let list = List::new(items).highlight_style(Styles::selected());
        f.render_stateful_widget(list, list_area, &mut self.state);
    }
}

impl Navigable for CountryTable {
    fn get_selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    fn set_selected_index(&mut self, index: Option<usize>) {
        self.state.select(index);
    }

    fn get_item_count(&self) -> usize {
        self.row_count
    }
}
