use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::Serialize;

use crate::error::DistributionError;
use crate::record::Tabular;

/// Counts of rows, grouped by the value of a column.
///
/// Categories are sorted by descending count. Ties keep the order in which categories were first encountered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Distribution {
    column: String,
    buckets: Vec<(String, usize)>,
}

impl Distribution {
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The sum of all counts
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    /// The number of categories
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.buckets.iter().map(|(category, count)| (category.as_str(), *count))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(category, _)| category.as_str())
    }

    pub fn count(&self, category: &str) -> usize {
        self.buckets.iter()
            .find(|(c, _)| c == category)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.count(category) > 0
    }

    /// The share of a category, in percent of `total`, rounded to one decimal
    pub fn percentage(&self, category: &str, total: usize) -> Option<f64> {
        percentage(self.count(category), total)
    }

    /// One line per category, with its share of `total`
    pub fn lines(&self, total: usize) -> Vec<CountLine> {
        self.iter()
            .map(|(category, count)| CountLine {
                label: category.to_string(),
                count,
                percent: percentage(count, total),
            })
            .collect()
    }
}

/// `count / total` in percent, rounded to one decimal place (ties go to the even digit, so 6.25 gives 6.2). `None` when `total` is zero
pub fn percentage(count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let scaled = count as f64 / total as f64 * 100.0 * 10.0;
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        scaled.round()
    };
    Some(rounded / 10.0)
}

/// A category, its count, and its share of a total
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountLine {
    pub label: String,
    pub count: usize,
    pub percent: Option<f64>,
}

impl Display for CountLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.percent {
            Some(percent) => write!(f, "- {}: {} ({:.1}%)", self.label, self.count, percent),
            None => write!(f, "- {}: {}", self.label, self.count),
        }
    }
}

/// Count `rows` by the value of `column`.
///
/// Blank values are not counted.
/// Fails when there are no rows, or when none of the rows has such a column.
pub fn distribution<T: Tabular>(rows: &[T], column: &str) -> Result<Distribution, DistributionError> {
    if rows.is_empty() {
        return Err(DistributionError::EmptyRows);
    }

    let mut column_seen = false;
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, usize)> = Vec::new();

    for value in rows.iter().filter_map(|row| row.category(column)) {
        column_seen = true;
        if value.trim().is_empty() {
            continue;
        }
        match positions.get(&value) {
            Some(&pos) => buckets[pos].1 += 1,
            None => {
                positions.insert(value.clone(), buckets.len());
                buckets.push((value, 1));
            }
        }
    }

    if column_seen == false {
        return Err(DistributionError::UnknownColumn(column.to_string()));
    }

    // `sorted_by` is stable: ties keep their first-encountered order
    let buckets = buckets.into_iter()
        .sorted_by(|left, right| right.1.cmp(&left.1))
        .collect();

    Ok(Distribution {
        column: column.to_string(),
        buckets,
    })
}
