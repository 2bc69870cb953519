use visadesk_types::{AddWeekForm, FormField};

use crate::ui::components::common::TextInputState;

/// Text fields of the add-week modal and the last validation error.
#[derive(Debug, Default, Clone)]
pub struct AddWeekState {
    pub inputs: [TextInputState; 3],
    pub focused: usize,
    pub error: Option<String>,
}

impl AddWeekState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn focused_field(&self) -> FormField {
        FormField::ALL[self.focused]
    }

    pub fn focused_input(&mut self) -> &mut TextInputState {
        &mut self.inputs[self.focused]
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % self.inputs.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + self.inputs.len() - 1) % self.inputs.len();
    }

    pub fn form(&self) -> AddWeekForm {
        let [start, end, hours] = &self.inputs;
        AddWeekForm {
            week_start: start.input().to_string(),
            week_end: end.input().to_string(),
            total_hours: hours.input().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_collects_inputs_in_field_order() {
        let mut state = AddWeekState::default();
        state.focused_input().set_input("2024-01-22");
        state.focus_next();
        state.focused_input().set_input("2024-01-28");
        state.focus_next();
        assert_eq!(state.focused_field(), FormField::TotalHours);
        state.focused_input().set_input("40");
        state.focus_next();
        assert_eq!(state.focused_field(), FormField::WeekStart);

        let form = state.form();
        assert_eq!(form.week_start, "2024-01-22");
        assert_eq!(form.week_end, "2024-01-28");
        assert_eq!(form.total_hours, "40");
    }

    #[test]
    fn prev_wraps() {
        let mut state = AddWeekState::default();
        state.focus_prev();
        assert_eq!(state.focused_field(), FormField::TotalHours);
    }
}
