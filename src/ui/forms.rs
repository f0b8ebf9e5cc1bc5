use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Field;
use crate::validation::RecordInput;

/// Width of the right-aligned field labels ("English" and "Science" are the
/// longest).
pub(crate) const LABEL_WIDTH: usize = 7;

/// State of the "add student" form: the raw text of every field plus focus and
/// the last validation or storage error.
#[derive(Clone)]
pub(crate) struct StudentForm {
    pub(crate) input: RecordInput,
    pub(crate) active: Field,
    pub(crate) error: Option<String>,
}

impl Default for StudentForm {
    fn default() -> Self {
        Self {
            input: RecordInput::default(),
            active: Field::Id,
            error: None,
        }
    }
}

impl StudentForm {
    fn active_index(&self) -> usize {
        Field::ALL
            .iter()
            .position(|field| *field == self.active)
            .unwrap_or(0)
    }

    /// Move focus to the next field, wrapping after Science.
    pub(crate) fn focus_next(&mut self) {
        self.active = Field::ALL[(self.active_index() + 1) % Field::ALL.len()];
    }

    /// Move focus to the previous field, wrapping before ID.
    pub(crate) fn focus_previous(&mut self) {
        let len = Field::ALL.len();
        self.active = Field::ALL[(self.active_index() + len - 1) % len];
    }

    /// Append a character to the active field. Marks accept any printable
    /// character so the numeric check happens on submit.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.input.value_mut(self.active).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.input.value_mut(self.active).pop();
    }

    /// Empty every field and return focus to ID.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: Field) -> Line<'static> {
        let value = self.input.value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                Field::Id | Field::Name => "<required>".to_string(),
                Field::Mark(_) => "<integer>".to_string(),
            }
        } else {
            value.to_string()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(label_prefix(field)),
            Span::styled(display, style),
        ])
    }

    /// Character count of the requested field.
    pub(crate) fn value_len(&self, field: Field) -> usize {
        self.input.value(field).chars().count()
    }

    /// Row of the active field inside the form.
    pub(crate) fn active_row(&self) -> usize {
        self.active_index()
    }
}

/// `"   Math: "` style prefix shared by rendering and cursor placement.
pub(crate) fn label_prefix(field: Field) -> String {
    format!("{:>width$}: ", field.label(), width = LABEL_WIDTH)
}

/// Keyword being typed into the search bar.
#[derive(Default, Clone)]
pub(crate) struct SearchState {
    pub(crate) query: String,
}
