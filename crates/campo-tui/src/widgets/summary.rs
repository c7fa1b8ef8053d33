//! Resumen tab: headline metrics, category breakdown and the two charts.
//!
//! ```text
//! ┌ Total aplicaciones ┐┌ Hectáreas tratadas ┐┌ Frecuencia promedio ┐
//! ┌ CICLOS ┐┌ FOLIARES ┐┌ INTERCICLOS ┐┌ CONTROL ┐
//! ┌ Evolución de frecuencia ─────────────┐┌ Distribución ┐
//! ┌ Cronograma de hectáreas (vs frecuencia) ──────────────┐
//! ```

use campo_core::summary::Summary;
use campo_core::Category;
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, Gauge, GraphType, Paragraph, Widget},
};

use crate::theme::Theme;

/// Width of one frequency bar plus its gap.
const BAR_SLOT: u16 = 6;

pub struct SummaryView<'a> {
    summary: &'a Summary,
    decimals: usize,
    theme: &'a Theme,
}

impl<'a> SummaryView<'a> {
    pub fn new(summary: &'a Summary, decimals: usize, theme: &'a Theme) -> Self {
        Self { summary, decimals, theme }
    }

    fn render_global(&self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(area);
        let s = self.summary;
        metric_card(cols[0], buf, self.theme, "Total aplicaciones", s.total_applications.to_string(), "registros", self.theme.metric_value);
        metric_card(
            cols[1],
            buf,
            self.theme,
            "Hectáreas tratadas",
            format!("{} ha", format_hectares(s.total_hectares, self.decimals)),
            "acumulado",
            self.theme.metric_value,
        );
        metric_card(
            cols[2],
            buf,
            self.theme,
            "Frecuencia promedio",
            format!("{:.1} días", s.average_frequency),
            "entre aplicaciones",
            self.theme.metric_value,
        );
    }

    fn render_categories(&self, area: Rect, buf: &mut Buffer) {
        let cols = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);
        for (col, category) in cols.iter().zip(Category::NAMED.iter()) {
            metric_card(
                *col,
                buf,
                self.theme,
                &plural(category),
                self.summary.categories.get(category).to_string(),
                "aplicaciones",
                self.theme.category_style(category),
            );
        }
    }

    fn render_frequency(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Evolución de frecuencia (días) ")
            .border_style(self.theme.border_unfocused);
        let series = &self.summary.frequency_series;
        if series.is_empty() {
            Paragraph::new("sin frecuencias registradas").block(block).render(area, buf);
            return;
        }

        // Most recent points that fit the pane.
        let fit = (area.width.saturating_sub(2) / BAR_SLOT).max(1) as usize;
        let shown = &series[series.len().saturating_sub(fit)..];
        let bars: Vec<Bar> = shown
            .iter()
            .map(|(date, freq)| {
                Bar::default()
                    .value(freq.max(0.0).round() as u64)
                    .label(Line::from(date.format("%d/%m").to_string()))
                    .text_value(format!("{freq:.0}"))
                    .style(self.theme.chart_frequency)
            })
            .collect();

        BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(BAR_SLOT - 1)
            .bar_gap(1)
            .bar_style(self.theme.chart_frequency)
            .render(area, buf);
    }

    fn render_distribution(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Distribución ")
            .border_style(self.theme.border_unfocused);
        let inner = block.inner(area);
        block.render(area, buf);

        // One lane per distinct category label, coloured by its class.
        let total = self.summary.total_applications.max(1) as f64;
        let rows: Vec<(&str, usize, Style)> = self
            .summary
            .category_labels
            .iter()
            .take(inner.height as usize)
            .map(|(label, n)| (label.as_str(), *n, self.theme.category_style(&Category::classify(label))))
            .collect();

        let lanes = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints(rows.iter().map(|_| Constraint::Length(1)).collect::<Vec<_>>())
            .split(inner);
        for (lane, (name, count, style)) in lanes.iter().zip(rows) {
            let ratio = (count as f64 / total).clamp(0.0, 1.0);
            Gauge::default()
                .gauge_style(style)
                .ratio(ratio)
                .label(format!("{name} {:.0}%", ratio * 100.0))
                .render(*lane, buf);
        }
    }

    fn render_timeline(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Cronograma de hectáreas (vs frecuencia) ")
            .border_style(self.theme.border_unfocused);
        let timeline = &self.summary.timeline;

        let hectares: Vec<(f64, f64)> =
            timeline.iter().enumerate().map(|(i, p)| (i as f64, p.hectares)).collect();
        let frequency: Vec<(f64, f64)> =
            timeline.iter().enumerate().map(|(i, p)| (i as f64, p.frequency_days)).collect();

        let (y_min, y_max) = hectares
            .iter()
            .chain(frequency.iter())
            .fold((0.0_f64, 1.0_f64), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
        let x_max = timeline.len().saturating_sub(1).max(1) as f64;

        let date_label = |p: Option<NaiveDate>| p.map(|d| d.format("%d/%m/%Y").to_string()).unwrap_or_default();
        let first = date_label(timeline.first().and_then(|p| p.date));
        let last = date_label(timeline.last().and_then(|p| p.date));

        let datasets = vec![
            Dataset::default()
                .name("hectáreas")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(self.theme.chart_hectares)
                .data(&hectares),
            Dataset::default()
                .name("frecuencia")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(self.theme.chart_frequency)
                .data(&frequency),
        ];

        Chart::new(datasets)
            .block(block)
            .x_axis(Axis::default().bounds([0.0, x_max]).labels(vec![first, last]))
            .y_axis(
                Axis::default()
                    .bounds([y_min, y_max * 1.1])
                    .labels(vec![format!("{y_min:.0}"), format!("{:.0}", y_max * 1.1)]),
            )
            .render(area, buf);
    }
}

impl Widget for SummaryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ])
            .split(area);
        let middle = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Fill(1)])
            .split(rows[2]);

        self.render_global(rows[0], buf);
        self.render_categories(rows[1], buf);
        self.render_frequency(middle[0], buf);
        self.render_distribution(middle[1], buf);
        self.render_timeline(rows[3], buf);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Fixed-decimal hectare formatting shared by the cards and the record table.
pub fn format_hectares(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

fn plural(category: &Category) -> String {
    match category {
        Category::Ciclo => "CICLOS".to_string(),
        Category::Foliar => "FOLIARES".to_string(),
        Category::Interciclo => "INTERCICLOS".to_string(),
        Category::Control => "CONTROL".to_string(),
        Category::Other(_) => "OTRAS".to_string(),
    }
}

fn metric_card(
    area: Rect,
    buf: &mut Buffer,
    theme: &Theme,
    title: &str,
    value: String,
    caption: &str,
    value_style: Style,
) {
    let block = Block::bordered()
        .title(Span::styled(format!(" {title} "), theme.metric_label))
        .border_style(theme.border_unfocused);
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(value, value_style)),
        Line::from(Span::styled(caption.to_string(), theme.metric_label)),
    ])
    .render(inner, buf);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use campo_core::Record;

    fn record(day: u32, category: Category, freq: f64, hectares: f64) -> Record {
        Record {
            date: NaiveDate::from_ymd_opt(2024, 3, day),
            category_label: category.to_string(),
            category,
            application_number: 1,
            frequency_days: freq,
            hectares,
            product_1: Some("Urea".into()),
            product_2: None,
        }
    }

    fn rendered(summary: &Summary) -> String {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        SummaryView::new(summary, 2, &theme).render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn plural_labels() {
        let labels: Vec<String> = Category::NAMED.iter().map(plural).collect();
        assert_eq!(labels, vec!["CICLOS", "FOLIARES", "INTERCICLOS", "CONTROL"]);
    }

    #[test]
    fn hectares_use_configured_decimals() {
        assert_eq!(format_hectares(12.5, 2), "12.50");
        assert_eq!(format_hectares(12.4, 0), "12");
        assert_eq!(format_hectares(-3.26, 1), "-3.3");
    }

    #[test]
    fn renders_headline_numbers() {
        let records = vec![
            record(5, Category::Ciclo, 14.0, 10.0),
            record(19, Category::Foliar, 7.0, 2.5),
        ];
        let text = rendered(&Summary::from_records(&records, 12));
        assert!(text.contains("12.50 ha"));
        assert!(text.contains("10.5 días"));
        assert!(text.contains("CICLOS"));
        assert!(text.contains("Distribución"));
    }

    #[test]
    fn distribution_lists_each_category_label() {
        let mut records = vec![
            record(5, Category::Control, 0.0, 1.0),
            record(6, Category::Control, 0.0, 1.0),
        ];
        records[0].category_label = "CONTROL MALEZA".into();
        records[1].category_label = "CONTROL HONGOS".into();
        let text = rendered(&Summary::from_records(&records, 12));
        assert!(text.contains("CONTROL HONGOS 50%"));
        assert!(text.contains("CONTROL MALEZA 50%"));
    }

    #[test]
    fn empty_frequency_series_shows_placeholder() {
        let records = vec![record(5, Category::Control, 0.0, 1.0)];
        let text = rendered(&Summary::from_records(&records, 12));
        assert!(text.contains("sin frecuencias registradas"));
    }
}
