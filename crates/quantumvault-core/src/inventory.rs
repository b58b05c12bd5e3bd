//! Ordered in-memory inventory of quantum objects.
//!
//! Insertion order is preserved and nothing is deduplicated. Lookup by id is
//! a linear scan returning the first match. Collapsed objects are not removed.

use crate::object::QuantumObject;
use crate::report::InventorySummary;

/// Ordered collection of objects, owned by one driver session.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    objects: Vec<QuantumObject>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an object and return it. Duplicate ids are accepted.
    pub fn add(&mut self, object: QuantumObject) -> &QuantumObject {
        log::debug!("inventory add {} ({})", object.id(), object.variant());
        self.objects.push(object);
        &self.objects[self.objects.len() - 1]
    }

    /// First object with this id.
    pub fn find(&self, id: &str) -> Option<&QuantumObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    /// First object with this id, mutably.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut QuantumObject> {
        self.objects.iter_mut().find(|o| o.id() == id)
    }

    /// Status reports in insertion order, or [`Listing::Empty`].
    pub fn list_all(&self) -> Listing<'_> {
        if self.objects.is_empty() {
            Listing::Empty
        } else {
            Listing::Reports(StatusReports {
                inner: self.objects.iter(),
            })
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuantumObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects supporting emergency cooldown.
    pub fn critical_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_critical()).count()
    }

    pub fn summary(&self) -> InventorySummary {
        InventorySummary {
            total: self.len(),
            critical: self.critical_count(),
        }
    }
}

/// Result of listing an inventory.
///
/// An empty inventory is its own signal rather than a zero-length sequence,
/// so drivers can show a single advisory line.
#[derive(Debug, Clone)]
pub enum Listing<'a> {
    Empty,
    Reports(StatusReports<'a>),
}

impl Listing<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Lazy sequence of status report lines. Clone it to restart.
#[derive(Debug, Clone)]
pub struct StatusReports<'a> {
    inner: std::slice::Iter<'a, QuantumObject>,
}

impl Iterator for StatusReports<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.inner.next().map(QuantumObject::status_report)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for StatusReports<'_> {}
