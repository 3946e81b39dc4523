//! Data objects.
//!
//! Anything that can hand out its attributes by name and report its type
//! descriptor is a data object. Hand-written structs implement [`DataObject`]
//! with explicit field accessors; [`Record`] is a ready-made implementation
//! backed by a field map.

use crate::error::ObjectResult;
use crate::semantics::{self, Comparison};
use crate::types::ObjectType;
use crate::value::Value;
use crate::{display, ObjectId};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a data object, as stored in [`Value::Object`].
pub type ObjectRef = Arc<dyn DataObject>;

/// Attribute access for validated objects.
pub trait DataObject: Send + Sync {
    /// The type descriptor of this object.
    fn object_type(&self) -> &Arc<ObjectType>;

    /// Current value of an attribute, or `None` if the object has no such
    /// attribute. A present but empty attribute is `Some(Value::Null)`.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Names of every attribute the object holds.
    fn attribute_names(&self) -> Vec<String>;
}

/// Object-model operations available on every data object.
pub trait DataObjectExt {
    /// Identity of this object.
    fn object_id(&self) -> ObjectId;

    /// Equality per the object's kind: structural for value objects, identity
    /// otherwise.
    fn equals(&self, other: &dyn DataObject) -> ObjectResult<bool>;

    /// Field-priority comparison for ordered value objects.
    fn compare(&self, other: &dyn DataObject) -> ObjectResult<Comparison>;

    fn lt(&self, other: &dyn DataObject) -> ObjectResult<bool>;
    fn le(&self, other: &dyn DataObject) -> ObjectResult<bool>;
    /// Defined as `!le`.
    fn gt(&self, other: &dyn DataObject) -> ObjectResult<bool>;
    /// Defined as `!lt`.
    fn ge(&self, other: &dyn DataObject) -> ObjectResult<bool>;

    /// `TypeName: field=(value), ...` with fields in name order.
    fn to_display_string(&self) -> String;
}

impl<T: DataObject> DataObjectExt for T {
    fn object_id(&self) -> ObjectId {
        ObjectId::of(self)
    }

    fn equals(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::equals(self, other)
    }

    fn compare(&self, other: &dyn DataObject) -> ObjectResult<Comparison> {
        semantics::compare(self, other)
    }

    fn lt(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::lt(self, other)
    }

    fn le(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::le(self, other)
    }

    fn gt(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::gt(self, other)
    }

    fn ge(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::ge(self, other)
    }

    fn to_display_string(&self) -> String {
        display::render_object(self)
    }
}

impl DataObjectExt for dyn DataObject + '_ {
    fn object_id(&self) -> ObjectId {
        ObjectId::of(self)
    }

    fn equals(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::equals(self, other)
    }

    fn compare(&self, other: &dyn DataObject) -> ObjectResult<Comparison> {
        semantics::compare(self, other)
    }

    fn lt(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::lt(self, other)
    }

    fn le(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::le(self, other)
    }

    fn gt(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::gt(self, other)
    }

    fn ge(&self, other: &dyn DataObject) -> ObjectResult<bool> {
        semantics::ge(self, other)
    }

    fn to_display_string(&self) -> String {
        display::render_object(self)
    }
}

/// A data object with a dynamic set of fields.
///
/// Fields can be changed after construction, which is how object graphs with
/// cycles are wired up.
pub struct Record {
    object_type: Arc<ObjectType>,
    fields: RwLock<BTreeMap<String, Value>>,
}

impl Record {
    /// Create a record with no fields.
    pub fn new(object_type: &Arc<ObjectType>) -> Self {
        Self {
            object_type: Arc::clone(object_type),
            fields: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a record with initial fields.
    pub fn with_fields<K, V>(
        object_type: &Arc<ObjectType>,
        fields: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let record = Self::new(object_type);
        {
            let mut map = record.fields.write();
            for (name, value) in fields {
                map.insert(name.into(), value.into());
            }
        }
        record
    }

    /// Wrap into a shared handle.
    pub fn shared(self) -> ObjectRef {
        Arc::new(self)
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }

    /// Set a field value, adding the field if needed.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.write().insert(name.into(), value.into());
    }

    /// Remove a field.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.fields.write().remove(name)
    }
}

impl DataObject for Record {
    fn object_type(&self) -> &Arc<ObjectType> {
        &self.object_type
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name)
    }

    fn attribute_names(&self) -> Vec<String> {
        self.fields.read().keys().cloned().collect()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("type", &self.object_type.name())
            .field("fields", &self.attribute_names())
            .finish()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display::render_object(self))
    }
}
