//! Manual entry form: a popup with one text field per canonical column.
//!
//! `Tab` / `↓` move to the next field, `Shift+Tab` / `↑` to the previous one.
//! `Enter` submits (validation happens in
//! [`ManualEntry::validate`](campo_core::entry::ManualEntry::validate)) and
//! `Escape` discards the form.

use campo_core::entry::ManualEntry;
use campo_core::Field;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::command_bar::edit_line;
use crate::widgets::help::centered_rect;

const LABEL_WIDTH: usize = 20;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct EntryFormState {
    /// One value per [`Field::ALL`] entry.
    pub values: [String; 7],
    /// Index into [`Field::ALL`] of the field being edited.
    pub active: usize,
    /// Byte offset of the cursor within the active value.
    pub cursor: usize,
    /// Validation error from the last submit.
    pub error: Option<String>,
}

impl EntryFormState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn active_field(&self) -> Field {
        Field::ALL[self.active]
    }

    fn focus(&mut self, index: usize) {
        self.active = index % Field::ALL.len();
        self.cursor = self.values[self.active].len();
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::FocusNext | AppEvent::Nav(Direction::Down) => self.focus(self.active + 1),
            AppEvent::FocusPrev | AppEvent::Nav(Direction::Up) => {
                self.focus(self.active + Field::ALL.len() - 1)
            }
            other => {
                self.error = None;
                edit_line(&mut self.values[self.active], &mut self.cursor, other);
            }
        }
    }

    pub fn to_entry(&self) -> ManualEntry {
        let [date, category, application_number, frequency_days, hectares, product_1, product_2] =
            self.values.clone();
        ManualEntry {
            date,
            category,
            application_number,
            frequency_days,
            hectares,
            product_1,
            product_2,
        }
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Date => "AAAA-MM-DD o DD/MM/AAAA (vacío = hoy)",
        Field::Category => "CICLO | FOLIAR | INTERCICLO | CONTROL",
        Field::ApplicationNumber => "entero >= 1",
        Field::FrequencyDays => "días, entero >= 0",
        Field::Hectares => "decimal >= 0",
        Field::Product1 | Field::Product2 => "opcional",
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct EntryForm<'a> {
    state: &'a EntryFormState,
    theme: &'a Theme,
}

impl<'a> EntryForm<'a> {
    pub fn new(state: &'a EntryFormState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn popup_area(area: Rect) -> Rect {
        centered_rect(70, Field::ALL.len() as u16 + 6, area)
    }

    /// Terminal position of the text cursor. Pass the same `area` given to
    /// `render`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let popup = Self::popup_area(area);
        let chars = self.state.values[self.state.active][..self.state.cursor].chars().count();
        let x = popup.x + 1 + 2 + LABEL_WIDTH as u16 + chars as u16;
        let y = popup.y + 1 + self.state.active as u16;
        (x.min(popup.right().saturating_sub(2)), y)
    }
}

impl Widget for EntryForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = Self::popup_area(area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" Agregar registro (Enter guarda, Esc cancela) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines: Vec<Line> = Field::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let active = i == self.state.active;
                let marker = if active { "› " } else { "  " };
                let label_style = if active {
                    self.theme.border_focused
                } else {
                    self.theme.metric_label
                };
                let value = &self.state.values[i];
                let value_span = if value.is_empty() {
                    Span::styled(placeholder(*field), Style::default().add_modifier(Modifier::DIM))
                } else {
                    Span::raw(value.as_str())
                };
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
                    value_span,
                ])
            })
            .collect();

        lines.push(Line::default());
        if let Some(ref err) = self.state.error {
            lines.push(Line::from(Span::styled(format!("✗ {err}"), self.theme.status_error)));
        }

        Paragraph::new(lines).wrap(Wrap { trim: false }).render(inner, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn type_str(state: &mut EntryFormState, s: &str) {
        for c in s.chars() {
            state.handle(&AppEvent::Char(c));
        }
    }

    #[test]
    fn fields_cycle_and_collect_into_entry() {
        let mut state = EntryFormState::default();
        type_str(&mut state, "2024-03-05");
        state.handle(&AppEvent::FocusNext);
        type_str(&mut state, "ciclo");
        state.handle(&AppEvent::FocusNext);
        type_str(&mut state, "2");
        assert_eq!(state.active_field(), Field::ApplicationNumber);

        let entry = state.to_entry();
        assert_eq!(entry.date, "2024-03-05");
        assert_eq!(entry.category, "ciclo");
        assert_eq!(entry.application_number, "2");
        assert_eq!(entry.hectares, "");
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut state = EntryFormState::default();
        state.handle(&AppEvent::FocusPrev);
        assert_eq!(state.active_field(), Field::Product2);
        state.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(state.active_field(), Field::Date);
    }

    #[test]
    fn returning_to_a_field_puts_cursor_at_end() {
        let mut state = EntryFormState::default();
        type_str(&mut state, "abc");
        state.handle(&AppEvent::FocusNext);
        state.handle(&AppEvent::FocusPrev);
        assert_eq!(state.cursor, 3);
        state.handle(&AppEvent::Backspace);
        assert_eq!(state.values[0], "ab");
    }

    #[test]
    fn renders_labels_and_error() {
        let theme = Theme::load_default();
        let state = EntryFormState {
            error: Some("hectares must be a number >= 0".into()),
            ..Default::default()
        };
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        EntryForm::new(&state, &theme).render(area, &mut buf);
        let text: String = buf.content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("NUM. APLICACION"));
        assert!(text.contains("hectares must be a number"));
    }
}
