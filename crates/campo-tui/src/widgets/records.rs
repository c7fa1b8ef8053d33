//! Datos tab: scrollable table of every record in the store.
//!
//! # Navigation
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k`, `↓` / `j` | Move the selection one row |
//! | `PageUp` / `PageDown` | Move one page |
//! | `g` / `G` | First / last record |
//!
//! `offset` is the index of the first visible row; the selection is always
//! kept inside the visible window.

use std::cell::Cell;

use campo_core::{Field, Store};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Span,
    widgets::{
        Block, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Table, Widget,
    },
};

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::summary::format_hectares;

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RecordTableState {
    pub selected: usize,
    pub offset: usize,
    /// Body height from the last render.
    last_height: Cell<usize>,
}

impl Default for RecordTableState {
    fn default() -> Self {
        Self { selected: 0, offset: 0, last_height: Cell::new(20) }
    }
}

impl RecordTableState {
    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    pub fn handle(&mut self, event: &AppEvent, total: usize) {
        if total == 0 {
            return;
        }
        let last = total - 1;
        self.selected = match event {
            AppEvent::Nav(Direction::Up) => self.selected.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => (self.selected + 1).min(last),
            AppEvent::ScrollUp => self.selected.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => (self.selected + PAGE_STEP).min(last),
            AppEvent::ScrollToTop => 0,
            AppEvent::ScrollToBottom => last,
            _ => return,
        };
        self.follow_selection();
        tracing::debug!(selected = self.selected, offset = self.offset, "records: moved");
    }

    /// Keep the selection valid after the store changed size.
    pub fn clamp(&mut self, total: usize) {
        self.selected = self.selected.min(total.saturating_sub(1));
        self.follow_selection();
    }

    fn follow_selection(&mut self) {
        let height = self.height();
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct RecordTable<'a> {
    store: &'a Store,
    state: &'a RecordTableState,
    decimals: usize,
    theme: &'a Theme,
}

impl<'a> RecordTable<'a> {
    pub fn new(store: &'a Store, state: &'a RecordTableState, decimals: usize, theme: &'a Theme) -> Self {
        Self { store, state, decimals, theme }
    }
}

fn column_width(field: Field) -> Constraint {
    match field {
        Field::Date => Constraint::Length(10),
        Field::Category => Constraint::Length(11),
        Field::ApplicationNumber => Constraint::Length(15),
        Field::FrequencyDays => Constraint::Length(17),
        Field::Hectares => Constraint::Length(10),
        Field::Product1 | Field::Product2 => Constraint::Fill(1),
    }
}

impl Widget for RecordTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" Base de datos ({} registros) ", self.store.len()))
            .border_style(self.theme.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        // One row for the header.
        let height = inner.height.saturating_sub(1) as usize;
        self.state.last_height.set(height);

        let columns = self.store.columns();
        let records = self.store.all();
        let start = self.state.offset.min(records.len());
        let end = (start + height).min(records.len());

        let rows: Vec<Row> = records[start..end]
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let cells: Vec<Span> = columns
                    .iter()
                    .map(|field| match field {
                        Field::Hectares => Span::raw(format_hectares(record.hectares, self.decimals)),
                        Field::Category => Span::styled(
                            record.category_text(),
                            self.theme.category_style(&record.category),
                        ),
                        other => Span::raw(record.field_text(*other)),
                    })
                    .collect();
                let row = Row::new(cells);
                if start + i == self.state.selected {
                    row.style(self.theme.table_selected)
                } else {
                    row
                }
            })
            .collect();

        let header = Row::new(columns.iter().map(|f| f.label())).style(self.theme.table_header);
        let table_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let table = Table::new(rows, columns.iter().map(|f| column_width(*f)))
            .header(header)
            .column_spacing(1);
        Widget::render(table, table_area, buf);

        if !records.is_empty() {
            let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };
            let mut sb_state = ScrollbarState::new(records.len())
                .position(start)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
