use crate::assemblers::types::{ChartDescriptor, ChartKind, Layout, SeriesData};
use crate::record::EarthquakeRecord;
use std::collections::HashMap;

pub const CHART_ID: &str = "daily_counts";

/// Order of the day axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DayOrder {
    /// Days appear in the order they are first seen in the records.
    #[default]
    FirstSeen,
    /// Days sorted ascending; `YYYY-MM-DD` keys sort chronologically.
    Chronological,
}

/// Occurrences per UTC calendar day, kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct DailyCounts {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl DailyCounts {
    pub fn from_records(records: &[EarthquakeRecord]) -> Self {
        let mut counts = Self::default();
        for r in records {
            counts.increment(r.day_key());
        }
        counts
    }

    pub fn increment(&mut self, day: String) {
        match self.index.get(&day) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(day.clone(), self.entries.len());
                self.entries.push((day, 1));
            }
        }
    }

    pub fn sort_chronologically(&mut self) {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (slot, (day, _)) in self.entries.iter().enumerate() {
            self.index.insert(day.clone(), slot);
        }
    }

    pub fn get(&self, day: &str) -> Option<u64> {
        self.index.get(day).map(|&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(day, count)| (day.as_str(), *count))
    }
}

/// Distinct days and their counts as parallel sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesChart {
    pub days: Vec<String>,
    pub counts: Vec<u64>,
}

pub fn assemble(records: &[EarthquakeRecord], order: DayOrder) -> TimeSeriesChart {
    let mut daily = DailyCounts::from_records(records);
    if order == DayOrder::Chronological {
        daily.sort_chronologically();
    }

    let (days, counts) = daily
        .iter()
        .map(|(day, count)| (day.to_string(), count))
        .unzip();
    TimeSeriesChart { days, counts }
}

impl TimeSeriesChart {
    pub fn descriptor(&self) -> ChartDescriptor {
        let layout = Layout {
            title: "Earthquakes per Day".to_string(),
            x_axis: Some("Date".to_string()),
            y_axis: Some("Number of Earthquakes".to_string()),
            mode: Some("lines+markers".to_string()),
            ..Default::default()
        };

        ChartDescriptor::new(CHART_ID, ChartKind::LineMarkers, layout)
            .with_series("x", SeriesData::Text(self.days.clone()))
            .with_series("y", SeriesData::Counts(self.counts.clone()))
    }
}
