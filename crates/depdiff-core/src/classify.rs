//! Partition dependency-change records into added and removed buckets

use crate::types::{ChangeKind, DependencyChangeRecord};
use std::collections::HashMap;

/// Name-keyed records that remember the order names were first seen in
///
/// Re-inserting a name replaces its record (last write wins) but keeps the
/// name's original position.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    records: HashMap<String, DependencyChangeRecord>,
    order: Vec<String>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its name
    pub fn insert(&mut self, record: DependencyChangeRecord) {
        if !self.records.contains_key(&record.name) {
            self.order.push(record.name.clone());
        }
        self.records.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&DependencyChangeRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Names in first-insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Records in first-insertion order of their names
    pub fn iter(&self) -> impl Iterator<Item = &DependencyChangeRecord> {
        self.order.iter().filter_map(|name| self.records.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Output of [`classify`]
#[derive(Debug, Clone, Default)]
pub struct ClassifiedSet {
    pub added: Bucket,
    pub removed: Bucket,
}

impl ClassifiedSet {
    /// Whether a name was both added and removed, i.e. updated
    pub fn is_updated(&self, name: &str) -> bool {
        self.added.contains(name) && self.removed.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Partition records by change kind
///
/// `Added` and `Removed` records go to their buckets keyed by name. Records
/// tagged `Updated`, or with no change kind at all, are dropped: updates are
/// reconstructed later from names present in both buckets.
///
/// # Example
///
/// ```
/// use depdiff_core::{classify, ChangeKind, DependencyChangeRecord};
///
/// let records = vec![
///     DependencyChangeRecord::new("foo", ChangeKind::Added),
///     DependencyChangeRecord::new("foo", ChangeKind::Removed),
/// ];
/// let set = classify(&records);
/// assert!(set.is_updated("foo"));
/// ```
pub fn classify(records: &[DependencyChangeRecord]) -> ClassifiedSet {
    let mut set = ClassifiedSet::default();

    for record in records {
        match record.change_kind {
            Some(ChangeKind::Added) => set.added.insert(record.clone()),
            Some(ChangeKind::Removed) => set.removed.insert(record.clone()),
            Some(ChangeKind::Updated) => {
                tracing::debug!(dependency = %record.name, "dropping record tagged as updated");
            }
            None => {
                tracing::debug!(dependency = %record.name, "dropping record without change kind");
            }
        }
    }

    set
}
