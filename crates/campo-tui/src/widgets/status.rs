//! Status line: the last success or error message, one row high.

use crate::app::Status;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

pub struct StatusLine<'a> {
    status: Option<&'a Status>,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: Option<&'a Status>, theme: &'a Theme) -> Self {
        Self { status, theme }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.status {
            Some(Status::Info(msg)) => Line::from(Span::styled(format!(" ✓ {msg}"), self.theme.status_info)),
            Some(Status::Error(msg)) => Line::from(Span::styled(format!(" ✗ {msg}"), self.theme.status_error)),
            None => Line::from(Span::styled(
                " :load <file>  :export  :help",
                Style::default().add_modifier(Modifier::DIM),
            )),
        };
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
