//! Type descriptors.
//!
//! An [`ObjectType`] plays the role of a class: it names the type, fixes its
//! [`ObjectKind`], links to its parent and owns the constraint table that
//! validation reads.
//!
//! Tables are shared with the parent until the type makes its first own
//! declaration. At that point the parent's current table is copied and the
//! two evolve independently.

use crate::table::{ConstraintTable, Specs};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Structural semantics of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Plain validated data object, identity equality.
    Data,
    /// Entity: identity equality, identifiers left to the application.
    Entity,
    /// Value object: structural equality.
    Value,
    /// Value object with a field-priority ordering.
    OrderedValue,
}

impl ObjectKind {
    /// Returns true if equality is structural.
    pub fn is_value(&self) -> bool {
        matches!(self, ObjectKind::Value | ObjectKind::OrderedValue)
    }

    /// Returns true if instances can be ordered.
    pub fn is_ordered(&self) -> bool {
        matches!(self, ObjectKind::OrderedValue)
    }
}

/// A type descriptor.
#[derive(Debug)]
pub struct ObjectType {
    name: String,
    kind: ObjectKind,
    parent: Option<Arc<ObjectType>>,
    /// `None` while the table is still shared with the parent.
    own_table: RwLock<Option<Arc<ConstraintTable>>>,
    equals_fields: Option<Vec<String>>,
    priority_order: Option<Vec<String>>,
}

impl ObjectType {
    /// Start building a root type.
    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(name.into(), ObjectKind::Data, None)
    }

    /// Root plain data type.
    pub fn data(name: impl Into<String>) -> Arc<Self> {
        Self::builder(name).build()
    }

    /// Root entity type.
    pub fn entity(name: impl Into<String>) -> Arc<Self> {
        Self::builder(name).kind(ObjectKind::Entity).build()
    }

    /// Root value object type comparing every field.
    pub fn value_object(name: impl Into<String>) -> Arc<Self> {
        Self::builder(name).kind(ObjectKind::Value).build()
    }

    /// Root ordered value object type with the default priority order.
    pub fn ordered_value_object(name: impl Into<String>) -> Arc<Self> {
        Self::builder(name).kind(ObjectKind::OrderedValue).build()
    }

    /// Start building a subtype. The subtype inherits the kind, equality
    /// fields and priority order unless the builder overrides them.
    pub fn extend(self: &Arc<Self>, name: impl Into<String>) -> TypeBuilder {
        TypeBuilder::new(name.into(), self.kind, Some(Arc::clone(self)))
    }

    /// Get the type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the kind.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Get the parent type.
    pub fn parent(&self) -> Option<&Arc<ObjectType>> {
        self.parent.as_ref()
    }

    /// Check if this type is `other` or one of its descendants.
    pub fn is_subtype_of(&self, other: &ObjectType) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if std::ptr::eq(ty, other) {
                return true;
            }
            current = ty.parent.as_deref();
        }
        false
    }

    /// Fields compared by value-object equality, from this type or the
    /// nearest ancestor that sets them. `None` means every field.
    pub fn equals_fields(&self) -> Option<&[String]> {
        match &self.equals_fields {
            Some(fields) => Some(fields),
            None => self.parent.as_ref().and_then(|p| p.equals_fields()),
        }
    }

    /// Field priority for ordering, from this type or the nearest ancestor
    /// that sets it. `None` means lexicographic field-name order.
    pub fn priority_order(&self) -> Option<&[String]> {
        match &self.priority_order {
            Some(fields) => Some(fields),
            None => self.parent.as_ref().and_then(|p| p.priority_order()),
        }
    }

    /// The effective constraint table.
    ///
    /// While the type has made no declaration of its own this is the very
    /// same table its parent returns.
    pub fn table(&self) -> Arc<ConstraintTable> {
        if let Some(table) = self.own_table.read().as_ref() {
            return Arc::clone(table);
        }
        match &self.parent {
            Some(parent) => parent.table(),
            None => Arc::new(ConstraintTable::new()),
        }
    }

    /// Returns true once the type owns its table.
    pub fn owns_table(&self) -> bool {
        self.own_table.read().is_some()
    }

    /// Declare the constraints of an attribute.
    ///
    /// The first declaration on a subtype copies the inherited table; later
    /// changes to ancestors are no longer seen by this type.
    pub fn declare(&self, attribute: impl Into<String>, specs: impl Into<Specs>) {
        let attribute = attribute.into();
        let specs = specs.into();
        let mut own = self.own_table.write();
        let table = own.get_or_insert_with(|| {
            let inherited = self
                .parent
                .as_ref()
                .map(|parent| (*parent.table()).clone())
                .unwrap_or_default();
            debug!(
                type_name = %self.name,
                inherited = inherited.len(),
                "copied inherited constraint table on first declaration"
            );
            Arc::new(inherited)
        });
        debug!(
            type_name = %self.name,
            attribute = %attribute,
            constraints = specs.len(),
            "declared constraints"
        );
        Arc::make_mut(table).declare(attribute, specs);
    }
}

/// Builder for [`ObjectType`].
#[derive(Debug)]
pub struct TypeBuilder {
    name: String,
    kind: ObjectKind,
    parent: Option<Arc<ObjectType>>,
    equals_fields: Option<Vec<String>>,
    priority_order: Option<Vec<String>>,
}

impl TypeBuilder {
    fn new(name: String, kind: ObjectKind, parent: Option<Arc<ObjectType>>) -> Self {
        Self {
            name,
            kind,
            parent,
            equals_fields: None,
            priority_order: None,
        }
    }

    pub fn kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Restrict value-object equality to these fields. An empty set makes all
    /// instances of the type equal.
    pub fn equals_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.equals_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Fields compared, in order, by the ordering of ordered value objects.
    pub fn priority_order<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.priority_order = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Arc<ObjectType> {
        // Roots own their table from the start; subtypes share until first write.
        let own_table = match self.parent {
            Some(_) => None,
            None => Some(Arc::new(ConstraintTable::new())),
        };
        Arc::new(ObjectType {
            name: self.name,
            kind: self.kind,
            parent: self.parent,
            own_table: RwLock::new(own_table),
            equals_fields: self.equals_fields,
            priority_order: self.priority_order,
        })
    }
}
