//! Immutable in-memory fact table.
//!
//! A [`Dataset`] is loaded once at startup and shared read-only between sessions.
//! Filtering never copies rows: it yields a [`DatasetView`] borrowing from the
//! dataset, and projections return distinct values in first-seen order so that
//! option lists follow the upstream row order.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use super::fact::{Dimension, FactRow};
use crate::db::checksum::dataset_fingerprint;

/// Distinct values of `key` over `rows`, in first-seen order.
fn distinct_in_order<'a, I, T, F>(rows: I, key: F) -> Vec<T>
where
    I: IntoIterator<Item = &'a FactRow>,
    T: Eq + Hash + Clone,
    F: Fn(&'a FactRow) -> T,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for row in rows {
        let value = key(row);
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

/// The denormalized fact rows, in upstream order.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Arc<[FactRow]>,
    fingerprint: String,
}

impl Dataset {
    pub fn new(rows: Vec<FactRow>) -> Self {
        let fingerprint = dataset_fingerprint(&rows);
        Self {
            rows: rows.into(),
            fingerprint,
        }
    }

    pub fn rows(&self) -> &[FactRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hex SHA-256 over the rows, stable for identical content and order.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// A view over every row.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            rows: self.rows.iter().collect(),
        }
    }

    /// Rows matching `predicate`, in dataset order.
    pub fn filter<P>(&self, predicate: P) -> DatasetView<'_>
    where
        P: Fn(&FactRow) -> bool,
    {
        DatasetView {
            rows: self.rows.iter().filter(|row| predicate(row)).collect(),
        }
    }

    /// Distinct values of an arbitrary key, in first-seen order.
    pub fn project<'a, T, F>(&'a self, key: F) -> Vec<T>
    where
        T: Eq + Hash + Clone,
        F: Fn(&'a FactRow) -> T,
    {
        distinct_in_order(self.rows.iter(), key)
    }

    /// Distinct descriptive names of `dimension`, in first-seen order.
    pub fn project_names(&self, dimension: Dimension) -> Vec<String> {
        distinct_in_order(self.rows.iter(), |row| dimension.name_of(row))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Distinct years, in first-seen order.
    pub fn years(&self) -> Vec<i32> {
        distinct_in_order(self.rows.iter(), |row| row.year)
    }
}

/// Borrowed subset of a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct DatasetView<'a> {
    rows: Vec<&'a FactRow>,
}

impl<'a> DatasetView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a FactRow> + '_ {
        self.rows.iter().copied()
    }

    /// Narrow this view further.
    pub fn filter<P>(&self, predicate: P) -> DatasetView<'a>
    where
        P: Fn(&FactRow) -> bool,
    {
        DatasetView {
            rows: self.rows.iter().copied().filter(|row| predicate(row)).collect(),
        }
    }

    pub fn project_names(&self, dimension: Dimension) -> Vec<String> {
        distinct_in_order(self.rows.iter().copied(), |row| dimension.name_of(row))
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn years(&self) -> Vec<i32> {
        distinct_in_order(self.rows.iter().copied(), |row| row.year)
    }
}
