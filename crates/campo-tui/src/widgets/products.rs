//! Insumos tab: product usage as a horizontal bar chart.

use ratatui::{
    buffer::Buffer,
    layout::{Direction as LayoutDir, Rect},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Paragraph, Widget},
};

use crate::theme::Theme;

pub struct ProductsChart<'a> {
    ranking: &'a [(String, usize)],
    theme: &'a Theme,
}

impl<'a> ProductsChart<'a> {
    /// `ranking` is already sorted and truncated to the configured length.
    pub fn new(ranking: &'a [(String, usize)], theme: &'a Theme) -> Self {
        Self { ranking, theme }
    }
}

impl Widget for ProductsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" Uso de productos (top {}) ", self.ranking.len()))
            .border_style(self.theme.border_unfocused);

        if self.ranking.is_empty() {
            Paragraph::new("no hay productos registrados").block(block).render(area, buf);
            return;
        }

        let bars: Vec<Bar> = self
            .ranking
            .iter()
            .map(|(product, count)| {
                Bar::default()
                    .value(*count as u64)
                    .label(Line::from(product.clone()))
                    .text_value(count.to_string())
                    .style(self.theme.chart_products)
            })
            .collect();

        BarChart::default()
            .block(block)
            .direction(LayoutDir::Horizontal)
            .data(BarGroup::default().bars(&bars))
            .bar_width(1)
            .bar_gap(1)
            .bar_style(self.theme.chart_products)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(ranking: &[(String, usize)]) -> String {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        ProductsChart::new(ranking, &theme).render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn lists_products_in_ranking_order() {
        let ranking = vec![("Mancozeb".to_string(), 3), ("Urea".to_string(), 2)];
        let text = rendered(&ranking);
        let m = text.find("Mancozeb").unwrap();
        let u = text.find("Urea").unwrap();
        assert!(m < u);
        assert!(text.contains("top 2"));
    }

    #[test]
    fn empty_ranking_shows_placeholder() {
        assert!(rendered(&[]).contains("no hay productos registrados"));
    }
}
