//! Tab bar widget: the strip of dashboard tabs at the top of the screen.

use crate::app::Tab;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line tab strip. The active tab is highlighted and the
/// record count plus keybinding hints are right-aligned in the same row.
pub struct TabBar<'a> {
    active: Tab,
    records: usize,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: Tab, records: usize, theme: &'a Theme) -> Self {
        Self { active, records, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = Tab::ALL
            .iter()
            .map(|tab| Line::from(format!(" {} ", tab.label())))
            .collect();

        Tabs::new(labels)
            .select(self.active.index())
            .highlight_style(self.theme.table_selected.add_modifier(Modifier::BOLD))
            .divider("")
            .render(area, buf);

        let hint = format!(" {} registros  a:add  ::cmd  ?:help ", self.records);
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(hint_x, area.y, hint, Style::default().add_modifier(Modifier::DIM));
    }
}
