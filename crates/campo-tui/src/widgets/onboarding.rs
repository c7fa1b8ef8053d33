//! Onboarding prompt, shown in place of the dashboard while the store is
//! not ready (no records, or a required column is missing).

use campo_core::{Field, Store};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::theme::Theme;

pub struct Onboarding<'a> {
    store: &'a Store,
    theme: &'a Theme,
}

impl<'a> Onboarding<'a> {
    pub fn new(store: &'a Store, theme: &'a Theme) -> Self {
        Self { store, theme }
    }

    fn missing(&self) -> Vec<Field> {
        Field::REQUIRED
            .iter()
            .copied()
            .filter(|f| !self.store.columns().contains(f))
            .collect()
    }
}

impl Widget for Onboarding<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" campo ")
            .border_style(self.theme.border_focused);

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled("Panel de aplicaciones de campo", self.theme.metric_value)),
            Line::default(),
        ];

        let missing = self.missing();
        if self.store.is_empty() {
            lines.push(Line::from("Todavía no hay datos cargados."));
        } else if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            lines.push(Line::from(Span::styled(
                format!("Faltan columnas requeridas: {}", names.join(", ")),
                self.theme.status_error,
            )));
        }

        lines.extend([
            Line::default(),
            Line::from("La planilla necesita columnas de fecha, categoría y hectáreas,"),
            Line::from("por ejemplo FECHA, CATEGORIA, HAS. También se reconocen"),
            Line::from("FRECUENCIA (DIAS), NUM. APLICACION, PRODUCTO 1 y PRODUCTO 2."),
            Line::default(),
            Line::from(vec![Span::styled("  :load <archivo.xlsx|.csv>", bold), Span::raw("  cargar una planilla")]),
            Line::from(vec![Span::styled("  a", bold), Span::raw("                          agregar un registro a mano")]),
            Line::from(vec![Span::styled("  ?", bold), Span::raw("                          ayuda")]),
        ]);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(store: &Store) -> String {
        let theme = Theme::load_default();
        let area = Rect::new(0, 0, 80, 16);
        let mut buf = Buffer::empty(area);
        Onboarding::new(store, &theme).render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn empty_store_prompts_for_a_file() {
        let text = rendered(&Store::new());
        assert!(text.contains("no hay datos cargados"));
        assert!(text.contains(":load"));
    }

    #[test]
    fn names_missing_required_columns() {
        let record = campo_core::Record {
            date: None,
            category: campo_core::Category::Ciclo,
            category_label: "CICLO".into(),
            application_number: 0,
            frequency_days: 0.0,
            hectares: 0.0,
            product_1: None,
            product_2: None,
        };
        let mut store = Store::new();
        store.replace(vec![record], vec![Field::Category, Field::Product1]);
        let text = rendered(&store);
        assert!(text.contains("Faltan columnas requeridas: FECHA, HAS"));
    }
}
