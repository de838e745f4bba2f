//! Types exchanged while reconciling import failures with the submitted records.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Failing row positions grouped by error message, as reported by the import service.
///
/// Iteration follows the order in which messages were reported. Reporting a
/// message again replaces its positions but keeps its place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    entries: Vec<(String, Vec<usize>)>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, message: impl Into<String>, positions: Vec<usize>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(m, _)| *m == message) {
            Some((_, existing)) => *existing = positions,
            None => self.entries.push((message, positions)),
        }
    }

    /// Appends a single failing position to `message`.
    pub fn record(&mut self, message: &str, position: usize) {
        match self.entries.iter_mut().find(|(m, _)| m == message) {
            Some((_, positions)) => positions.push(position),
            None => self.entries.push((message.to_string(), vec![position])),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.entries
            .iter()
            .map(|(message, positions)| (message.as_str(), positions.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: Into<String>> FromIterator<(M, Vec<usize>)> for ErrorReport {
    fn from_iter<I: IntoIterator<Item = (M, Vec<usize>)>>(iter: I) -> Self {
        let mut report = ErrorReport::new();
        for (message, positions) in iter {
            report.insert(message, positions);
        }
        report
    }
}

impl Serialize for ErrorReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (message, positions) in &self.entries {
            map.serialize_entry(message, positions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ErrorReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = ErrorReport;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of error messages to failing row positions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ErrorReport, A::Error> {
                let mut report = ErrorReport::new();
                while let Some((message, positions)) = access.next_entry::<String, Vec<usize>>()? {
                    report.insert(message, positions);
                }
                Ok(report)
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}

/// Identity strings of the rows of one bulk, indexed by in-bulk position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityIndex {
    identities: Vec<String>,
}

impl IdentityIndex {
    pub(crate) fn new(identities: Vec<String>) -> Self {
        Self { identities }
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.identities.get(position).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identities.iter().map(String::as_str)
    }
}

/// Error message per failed record identity, accumulated over the bulks of a batch.
///
/// Inserting an identity twice overwrites its message in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailureReport {
    entries: Vec<(String, String)>,
    slots: HashMap<String, usize>,
}

impl FailureReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, message: impl Into<String>) {
        let identity = identity.into();
        let message = message.into();
        match self.slots.get(&identity) {
            Some(&slot) => self.entries[slot].1 = message,
            None => {
                self.slots.insert(identity.clone(), self.entries.len());
                self.entries.push((identity, message));
            }
        }
    }

    /// Unions `other` into `self`; entries of `other` win on identity collision.
    pub fn merge(&mut self, other: FailureReport) {
        for (identity, message) in other.entries {
            self.insert(identity, message);
        }
    }

    pub fn get(&self, identity: &str) -> Option<&str> {
        self.slots
            .get(identity)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(identity, message)| (identity.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: Into<String>, M: Into<String>> FromIterator<(I, M)> for FailureReport {
    fn from_iter<T: IntoIterator<Item = (I, M)>>(iter: T) -> Self {
        let mut report = FailureReport::new();
        for (identity, message) in iter {
            report.insert(identity, message);
        }
        report
    }
}
