//! Country filter form
//!
//! Edits stay local to the form until the user submits; only then is a
//! [`FilterCriteria`] handed to the table.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::form_field::{FormField, FormFieldType};
use crate::country_tui::{traits::FormHandler, ui::centered_rect};
use crate::models::FilterCriteria;

/// Dropdown entry meaning "no region constraint"
pub const ALL_REGIONS: &str = "All";

const NAME: usize = 0;
const ISO3: usize = 1;
const REGION: usize = 2;
const CURRENCY: usize = 3;

/// Result of feeding a key to the form
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// Key consumed, nothing to report
    Edited,
    /// User committed the form
    Submitted(FilterCriteria),
    /// User left the form without submitting
    Cancelled,
}

pub struct FilterForm {
    pub fields: Vec<FormField>,
    pub current_field: usize,
    pub is_active: bool,
}

impl FilterForm {
    pub fn new(regions: &[String]) -> Self {
        let region_options = std::iter::once(ALL_REGIONS.to_string())
            .chain(regions.iter().cloned())
            .collect();

        let mut form = Self {
            fields: vec![
                FormField::new("Name", FormFieldType::Text).with_placeholder("e.g. France"),
                FormField::new("ISO3", FormFieldType::Text).with_placeholder("e.g. FRA"),
                FormField::new("Region (Enter)", FormFieldType::Dropdown)
                    .with_dropdown_options(region_options),
                FormField::new("Currency", FormFieldType::Text).with_placeholder("e.g. EUR"),
            ],
            current_field: 0,
            is_active: false,
        };
        form.update_focus();
        form
    }

    /// Give or take keyboard focus
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.update_focus();
    }

    fn update_focus(&mut self) {
        let active = self.is_active;
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focus(active && i == self.current_field);
        }
    }

    fn current_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.current_field]
    }

    /// Reset every field
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.current_field = 0;
        self.update_focus();
    }

    /// Show already-applied criteria in the fields
    pub fn set_criteria(&mut self, criteria: &FilterCriteria) {
        self.clear();
        for (index, value) in [
            (NAME, &criteria.name),
            (ISO3, &criteria.iso3),
            (CURRENCY, &criteria.currency),
        ] {
            if let Some(value) = value {
                let field = &mut self.fields[index];
                field.value = value.clone();
                field.move_cursor_to_end();
            }
        }

        let region = &mut self.fields[REGION];
        if let Some(wanted) = &criteria.region {
            match region.dropdown_options.iter().position(|o| o == wanted) {
                Some(i) => {
                    region.dropdown_state.select(Some(i));
                    region.select_dropdown_value();
                }
                None => {
                    // Regions outside the configured list are still honoured
                    region.dropdown_options.push(wanted.clone());
                    region.dropdown_state.select(Some(region.dropdown_options.len() - 1));
                    region.select_dropdown_value();
                }
            }
        }
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.fields[REGION].show_dropdown
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> FormEvent {
        if self.is_dropdown_open() {
            let region = &mut self.fields[REGION];
            match key.code {
                KeyCode::Up => region.dropdown_up(),
                KeyCode::Down => region.dropdown_down(),
                KeyCode::Enter => region.select_dropdown_value(),
                KeyCode::Esc => region.show_dropdown = false,
                _ => {}
            }
            return FormEvent::Edited;
        }

        match key.code {
            KeyCode::Esc => return FormEvent::Cancelled,
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Enter => {
                if self.current_field == REGION {
                    self.fields[REGION].show_dropdown = true;
                } else {
                    return FormEvent::Submitted(self.submit());
                }
            }
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => self.clear(),
            KeyCode::Char(c) => self.handle_char_input(c),
            KeyCode::Backspace => self.handle_backspace(),
            KeyCode::Delete => self.handle_delete(),
            KeyCode::Left => self.current_field_mut().move_cursor_left(),
            KeyCode::Right => self.current_field_mut().move_cursor_right(),
            KeyCode::Home => self.current_field_mut().move_cursor_to_start(),
            KeyCode::End => self.current_field_mut().move_cursor_to_end(),
            _ => {}
        }
        FormEvent::Edited
    }

    /// Draw the fields side by side
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(15),
                Constraint::Percentage(30),
                Constraint::Percentage(25),
            ])
            .split(area);

        for (field, chunk) in self.fields.iter().zip(chunks.iter()) {
            field.render(f, *chunk);
        }
    }

    /// Draw the region dropdown as a popup over `screen`
    pub fn render_popup(&mut self, f: &mut Frame, screen: Rect) {
        if self.is_dropdown_open() {
            self.fields[REGION].render_dropdown(f, centered_rect(40, 50, screen));
        }
    }
}

fn text_value(field: &FormField) -> Option<String> {
    (!field.is_empty()).then(|| field.value.clone())
}

impl FormHandler for FilterForm {
    type Output = FilterCriteria;

    fn get_current_field(&self) -> usize {
        self.current_field
    }

    fn set_current_field(&mut self, field: usize) {
        if field < self.fields.len() {
            self.current_field = field;
            self.update_focus();
        }
    }

    fn get_field_count(&self) -> usize {
        self.fields.len()
    }

    fn handle_char_input(&mut self, c: char) {
        self.current_field_mut().insert_char(c);
    }

    fn handle_backspace(&mut self) {
        self.current_field_mut().delete_char();
    }

    fn handle_delete(&mut self) {
        self.current_field_mut().delete_char_forward();
    }

    /// Empty text fields and the "All" region are left out of the criteria
    fn submit(&self) -> FilterCriteria {
        let region = &self.fields[REGION];
        FilterCriteria {
            name: text_value(&self.fields[NAME]),
            iso3: text_value(&self.fields[ISO3]),
            region: match region.selected_option() {
                Some(0) | None => None,
                Some(_) => Some(region.value.clone()),
            },
            currency: text_value(&self.fields[CURRENCY]),
        }
    }
}
