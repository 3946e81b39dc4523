//! Constraint checking.

use dataobj_core::{DataObject, ObjectError, ObjectId, Value};
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::error::ConstraintResult;
use crate::registry::ConstraintRegistry;
use crate::violation::{Violation, Violations};

/// Validates objects against their type's constraint table.
///
/// Nested objects are validated recursively. Objects already on the active
/// validation stack are not entered again, so cyclic graphs terminate.
pub struct Validator<'r> {
    registry: &'r ConstraintRegistry,
}

impl<'r> Validator<'r> {
    /// Create a new validator over a registry.
    pub fn new(registry: &'r ConstraintRegistry) -> Self {
        Self { registry }
    }

    /// Validate an object and everything it references.
    pub fn validate(&self, object: &dyn DataObject) -> ConstraintResult<Violations> {
        let mut active = HashSet::new();
        let violations = self.check_object(object, &mut active)?;
        debug!(
            type_name = %object.object_type().name(),
            violations = violations.len(),
            "validated object"
        );
        Ok(violations)
    }

    fn check_object(
        &self,
        object: &dyn DataObject,
        active: &mut HashSet<ObjectId>,
    ) -> ConstraintResult<Violations> {
        let id = ObjectId::of(object);
        active.insert(id);
        let result = self.check_attributes(object, active);
        active.remove(&id);
        result
    }

    fn check_attributes(
        &self,
        object: &dyn DataObject,
        active: &mut HashSet<ObjectId>,
    ) -> ConstraintResult<Violations> {
        let object_type = object.object_type();
        let table = object_type.table();
        let mut violations = Violations::new();

        for (attribute, specs) in table.iter() {
            let actual = object
                .attribute(attribute)
                .ok_or_else(|| ObjectError::invalid_attribute(object_type.name(), attribute))?;

            if let Value::Object(nested) = &actual {
                if active.contains(&ObjectId::of(nested.as_ref())) {
                    trace!(attribute, "skipped object already being validated");
                } else {
                    violations.merge(self.check_object(nested.as_ref(), active)?);
                }
            }

            for spec in specs {
                let constraint =
                    self.registry
                        .resolve(&spec.kind, attribute, &spec.required, &actual)?;
                let valid = constraint.check()?;
                trace!(
                    attribute,
                    kind = %constraint.kind_name(),
                    valid,
                    "evaluated constraint"
                );
                if !valid {
                    violations.push(Violation::new(
                        constraint.kind_name(),
                        attribute,
                        constraint.message(),
                    ));
                }
            }
        }

        Ok(violations)
    }
}
