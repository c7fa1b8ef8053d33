//! Summary metrics shown on the dashboard.
//!
//! Everything here is a pure function of the store contents; the TUI only
//! formats and draws the numbers.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::store::Store;
use crate::types::{Category, Record};

/// Default length of the product ranking.
pub const DEFAULT_TOP_PRODUCTS: usize = 12;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts {
    pub ciclo: usize,
    pub foliar: usize,
    pub interciclo: usize,
    pub control: usize,
    pub other: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: &Category) -> usize {
        match category {
            Category::Ciclo => self.ciclo,
            Category::Foliar => self.foliar,
            Category::Interciclo => self.interciclo,
            Category::Control => self.control,
            Category::Other(_) => self.other,
        }
    }

    fn bump(&mut self, category: &Category) {
        match category {
            Category::Ciclo => self.ciclo += 1,
            Category::Foliar => self.foliar += 1,
            Category::Interciclo => self.interciclo += 1,
            Category::Control => self.control += 1,
            Category::Other(_) => self.other += 1,
        }
    }
}

/// One point of the hectares-vs-frequency timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelinePoint {
    pub date: Option<NaiveDate>,
    pub hectares: f64,
    pub frequency_days: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_applications: usize,
    pub total_hectares: f64,
    /// Mean of the frequencies greater than zero; 0 when there are none.
    pub average_frequency: f64,
    pub categories: CategoryCounts,
    /// `(category label, applications)` for each distinct non-blank label,
    /// sorted by count descending, then label.
    pub category_labels: Vec<(String, usize)>,
    /// Dated records with frequency > 0, sorted by date.
    pub frequency_series: Vec<(NaiveDate, f64)>,
    /// Every record sorted by date; undated records last, in store order.
    pub timeline: Vec<TimelinePoint>,
    /// `(product, applications)` sorted by count descending, then name.
    pub top_products: Vec<(String, usize)>,
}

impl Summary {
    pub fn from_store(store: &Store, top_products: usize) -> Self {
        Self::from_records(store.all(), top_products)
    }

    pub fn from_records(records: &[Record], top_products: usize) -> Self {
        let total_hectares = records.iter().map(|r| r.hectares).sum();

        let freqs: Vec<f64> = records
            .iter()
            .map(|r| r.frequency_days)
            .filter(|f| *f > 0.0)
            .collect();
        let average_frequency = if freqs.is_empty() {
            0.0
        } else {
            freqs.iter().sum::<f64>() / freqs.len() as f64
        };

        let mut categories = CategoryCounts::default();
        for r in records {
            categories.bump(&r.category);
        }

        let mut frequency_series: Vec<(NaiveDate, f64)> = records
            .iter()
            .filter(|r| r.frequency_days > 0.0)
            .filter_map(|r| r.date.map(|d| (d, r.frequency_days)))
            .collect();
        frequency_series.sort_by_key(|(d, _)| *d);

        let mut timeline: Vec<TimelinePoint> = records
            .iter()
            .map(|r| TimelinePoint {
                date: r.date,
                hectares: r.hectares,
                frequency_days: r.frequency_days,
            })
            .collect();
        // Stable sort: None sorts after every date, ties keep store order.
        timeline.sort_by_key(|p| (p.date.is_none(), p.date));

        Self {
            total_applications: records.len(),
            total_hectares,
            average_frequency,
            categories,
            category_labels: label_usage(records),
            frequency_series,
            timeline,
            top_products: product_usage(records, top_products),
        }
    }
}

/// Count how often each product appears across both product columns.
pub fn product_usage(records: &[Record], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records {
        for p in [&r.product_1, &r.product_2].into_iter().flatten() {
            let p = p.trim();
            if !p.is_empty() {
                *counts.entry(p).or_default() += 1;
            }
        }
    }
    rank(counts, limit)
}

/// Count records per distinct category label.
pub fn label_usage(records: &[Record]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in records {
        let label = r.category_label.as_str();
        if !label.is_empty() {
            *counts.entry(label).or_default() += 1;
        }
    }
    rank(counts, usize::MAX)
}

fn rank(counts: HashMap<&str, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> =
        counts.into_iter().map(|(k, n)| (k.to_string(), n)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
