//! Form field component for user input

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::country_tui::ui::Styles;

/// Type of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldType {
    Text,
    Dropdown,
}

/// Individual form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub field_type: FormFieldType,
    pub is_focused: bool,
    /// Cursor position in characters, not bytes
    pub cursor_position: usize,
    pub dropdown_options: Vec<String>,
    pub dropdown_state: ListState,
    pub show_dropdown: bool,
}

impl FormField {
    pub fn new(label: &str, field_type: FormFieldType) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            field_type,
            is_focused: false,
            cursor_position: 0,
            dropdown_options: Vec::new(),
            dropdown_state: ListState::default(),
            show_dropdown: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    /// Dropdown options; the first one is selected initially
    pub fn with_dropdown_options(mut self, options: Vec<String>) -> Self {
        self.dropdown_options = options;
        if let Some(first) = self.dropdown_options.first() {
            self.value = first.clone();
            self.dropdown_state.select(Some(0));
        }
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        if !focused {
            self.show_dropdown = false;
        }
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        if self.field_type == FormFieldType::Dropdown {
            return;
        }
        let offset = self.byte_offset(self.cursor_position);
        self.value.insert(offset, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.field_type == FormFieldType::Dropdown || self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        let offset = self.byte_offset(self.cursor_position);
        self.value.remove(offset);
    }

    pub fn delete_char_forward(&mut self) {
        if self.field_type == FormFieldType::Dropdown || self.cursor_position >= self.char_count() {
            return;
        }
        let offset = self.byte_offset(self.cursor_position);
        self.value.remove(offset);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.char_count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.char_count();
    }

    /// Reset to empty text, or to the first option for dropdowns
    pub fn clear(&mut self) {
        self.cursor_position = 0;
        self.show_dropdown = false;
        match self.field_type {
            FormFieldType::Text => self.value.clear(),
            FormFieldType::Dropdown => {
                self.value = self.dropdown_options.first().cloned().unwrap_or_default();
                self.dropdown_state
                    .select(if self.dropdown_options.is_empty() { None } else { Some(0) });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Index of the committed dropdown option
    pub fn selected_option(&self) -> Option<usize> {
        self.dropdown_options.iter().position(|o| *o == self.value)
    }

    pub fn dropdown_up(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.dropdown_options.len() - 1
        } else {
            selected - 1
        };
        self.dropdown_state.select(Some(new_selected));
    }

    pub fn dropdown_down(&mut self) {
        if self.dropdown_options.is_empty() {
            return;
        }
        let selected = self.dropdown_state.selected().unwrap_or(0);
        self.dropdown_state
            .select(Some((selected + 1) % self.dropdown_options.len()));
    }

    /// Commit the highlighted dropdown option as the field value
    pub fn select_dropdown_value(&mut self) {
        if let Some(value) = self
            .dropdown_state
            .selected()
            .and_then(|i| self.dropdown_options.get(i))
        {
            self.value = value.clone();
            self.cursor_position = self.char_count();
        }
        self.show_dropdown = false;
    }

    /// Render the form field
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let display_text = if showing_placeholder {
            self.placeholder.clone()
        } else if self.field_type == FormFieldType::Dropdown {
            format!("{} ▾", self.value)
        } else {
            self.value.clone()
        };

        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);

        let text_style = if showing_placeholder {
            Styles::inactive()
        } else {
            Styles::default()
        };

        f.render_widget(Paragraph::new(display_text).style(text_style).block(block), area);

        if self.is_focused && self.field_type == FormFieldType::Text {
            let before_cursor: String = self.value.chars().take(self.cursor_position).collect();
            let cursor_x = area.x + 1 + before_cursor.width() as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }

    /// Render dropdown if visible
    pub fn render_dropdown(&mut self, f: &mut Frame, area: Rect) {
        if !self.show_dropdown || self.dropdown_options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .dropdown_options
            .iter()
            .map(|option| ListItem::new(option.clone()).style(Style::default()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!("Select {}", self.label))
                    .borders(Borders::ALL)
                    .border_style(Styles::active_border()),
            )
            .highlight_style(Styles::selected());

        f.render_widget(ratatui::widgets::Clear, area);
        f.render_stateful_widget(list, area, &mut self.dropdown_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_editing_with_cursor() {
        let mut field = FormField::new("Name", FormFieldType::Text);
        for c in "Frnce".chars() {
            field.insert_char(c);
        }
        field.move_cursor_left();
        field.move_cursor_left();
        field.move_cursor_left();
        field.insert_char('a');
        assert_eq!(field.value, "France");

        field.move_cursor_to_end();
        field.delete_char();
        assert_eq!(field.value, "Franc");

        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value, "ranc");
    }

    #[test]
    fn test_multibyte_input() {
        let mut field = FormField::new("Name", FormFieldType::Text);
        for c in "Côte".chars() {
            field.insert_char(c);
        }
        field.move_cursor_left();
        field.move_cursor_left();
        field.delete_char();
        assert_eq!(field.value, "Cte");
        assert_eq!(field.cursor_position, 1);
    }

    #[test]
    fn test_dropdown_ignores_typing_and_commits_selection() {
        let mut field = FormField::new("Region", FormFieldType::Dropdown)
            .with_dropdown_options(vec![
                "All".to_string(),
                "Asia".to_string(),
                "Europe".to_string(),
            ]);
        assert_eq!(field.value, "All");

        field.insert_char('x');
        assert_eq!(field.value, "All");

        field.show_dropdown = true;
        field.dropdown_down();
        field.dropdown_down();
        // Highlight alone does not change the value
        assert_eq!(field.value, "All");
        field.select_dropdown_value();
        assert_eq!(field.value, "Europe");
        assert_eq!(field.selected_option(), Some(2));
        assert!(!field.show_dropdown);

        field.dropdown_down();
        assert_eq!(field.dropdown_state.selected(), Some(0));

        field.clear();
        assert_eq!(field.value, "All");
    }
}
