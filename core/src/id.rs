//! Identity for live data objects.

use crate::object::DataObject;
use std::fmt;

/// Identity of a live object, derived from its address.
///
/// Only meaningful while the object is alive; used to track which objects are
/// on the active traversal stack (validation, equality, display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Identity of the given object.
    pub fn of(object: &dyn DataObject) -> Self {
        Self(object as *const dyn DataObject as *const () as usize)
    }

    /// Get the raw value.
    pub fn raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:#x}", self.0)
    }
}
