/*!
 * Occurrence counting with a deterministic ranking.
 *
 * Entries keep the order in which each key was first seen. Ranking is a
 * stable sort on descending count, so equal counts stay in first-seen order.
 */

use std::collections::HashMap;

/// Occurrence counts keyed by word or phrase, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    positions: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `key`
    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        match self.positions.get(&key) {
            Some(&position) => self.entries[position].1 += 1,
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    /// Occurrences recorded for `key`
    pub fn count(&self, key: &str) -> usize {
        self.positions
            .get(key)
            .map_or(0, |&position| self.entries[position].1)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Entries in first-insertion order
    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    /// Top `limit` entries by descending count
    pub fn ranked(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}
