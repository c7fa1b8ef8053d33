//! Plain-text summary for `campo --headless`.

use std::fmt::Write;

use campo_core::summary::Summary;
use campo_core::Category;

/// Render the headline metrics, category counts and product ranking.
pub fn render(summary: &Summary, decimals: usize) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Total aplicaciones:  {}", summary.total_applications);
    let _ = writeln!(out, "Hectáreas tratadas:  {:.decimals$} ha", summary.total_hectares);
    let _ = writeln!(out, "Frecuencia promedio: {:.1} días", summary.average_frequency);

    let _ = writeln!(out);
    for category in Category::NAMED.iter() {
        let _ = writeln!(out, "{:<12}{}", category.to_string(), summary.categories.get(category));
    }
    if summary.categories.other > 0 {
        let _ = writeln!(out, "{:<12}{}", "OTRAS", summary.categories.other);
    }

    if !summary.top_products.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Productos:");
        let width = summary.top_products.iter().map(|(p, _)| p.chars().count()).max().unwrap_or(0);
        for (product, count) in &summary.top_products {
            let _ = writeln!(out, "  {product:<width$}  {count}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use campo_core::Record;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_counts_and_products() {
        let records = vec![
            Record {
                date: NaiveDate::from_ymd_opt(2024, 3, 5),
                category: Category::Ciclo,
                category_label: "CICLO".into(),
                application_number: 1,
                frequency_days: 14.0,
                hectares: 12.5,
                product_1: Some("Mancozeb".into()),
                product_2: Some("Urea".into()),
            },
            Record {
                date: None,
                category: Category::Other("RIEGO".into()),
                category_label: "RIEGO".into(),
                application_number: 0,
                frequency_days: 0.0,
                hectares: 2.0,
                product_1: Some("Urea".into()),
                product_2: None,
            },
        ];
        let text = render(&Summary::from_records(&records, 12), 2);
        assert_eq!(
            text,
            "Total aplicaciones:  2\n\
             Hectáreas tratadas:  14.50 ha\n\
             Frecuencia promedio: 14.0 días\n\
             \n\
             CICLO       1\n\
             FOLIAR      0\n\
             INTERCICLO  0\n\
             CONTROL     0\n\
             OTRAS       1\n\
             \n\
             Productos:\n\
             \x20 Urea      2\n\
             \x20 Mancozeb  1\n"
        );
    }
}
