//! Shared behavior of TUI widgets

/// Widgets with a selectable list of items
pub trait Navigable {
    /// Get currently selected index
    fn get_selected_index(&self) -> Option<usize>;

    /// Set selected index
    fn set_selected_index(&mut self, index: Option<usize>);

    /// Get total number of items
    fn get_item_count(&self) -> usize;

    /// Move selection up, wrapping to the last item
    fn navigate_up(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let selected = self.get_selected_index().unwrap_or(0);
        self.set_selected_index(Some(if selected == 0 { count - 1 } else { selected - 1 }));
    }

    /// Move selection down, wrapping to the first item
    fn navigate_down(&mut self) {
        let count = self.get_item_count();
        if count == 0 {
            return;
        }
        let selected = self.get_selected_index().unwrap_or(0);
        self.set_selected_index(Some((selected + 1) % count));
    }

    /// Navigate to first item
    fn navigate_to_first(&mut self) {
        if self.get_item_count() > 0 {
            self.set_selected_index(Some(0));
        } else {
            self.set_selected_index(None);
        }
    }
}

/// Multi-field text forms
pub trait FormHandler {
    type Output;

    /// Get current field index
    fn get_current_field(&self) -> usize;

    /// Set current field
    fn set_current_field(&mut self, field: usize);

    /// Get total number of fields
    fn get_field_count(&self) -> usize;

    /// Move to next field
    fn next_field(&mut self) {
        let current = self.get_current_field();
        let total = self.get_field_count();
        self.set_current_field((current + 1) % total);
    }

    /// Move to previous field
    fn previous_field(&mut self) {
        let current = self.get_current_field();
        let total = self.get_field_count();
        self.set_current_field(if current == 0 { total - 1 } else { current - 1 });
    }

    /// Handle character input for current field
    fn handle_char_input(&mut self, c: char);

    /// Handle backspace for current field
    fn handle_backspace(&mut self);

    /// Handle delete for current field
    fn handle_delete(&mut self);

    /// Produce the committed value of the form
    fn submit(&self) -> Self::Output;
}
