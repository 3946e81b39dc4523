//! DataObj Constraint
//!
//! Validate data objects against the constraints declared on their types.
//!
//! Responsibilities:
//! - Hold the registry of constraint kinds, built-in and user-defined
//! - Evaluate each declared constraint against the attribute's current value
//! - Recurse into nested objects without re-entering cycles
//! - Produce ordered, human-readable violation messages

mod builtin;
mod checker;
mod error;
mod kind;
mod registry;
mod violation;

pub use builtin::{
    builtin_kinds, Custom, Email, InList, Ip, Matches, Max, Min, Nullable, Scale, Site,
};
pub use checker::Validator;
pub use error::{ConstraintError, ConstraintResult};
pub use kind::{canonical_name, Constraint, ConstraintKind, Evaluation};
pub use registry::{global_registry, register_constraint, ConstraintRegistry};
pub use violation::{Violation, Violations};

use dataobj_core::DataObject;

/// Validation entry points on every data object, using the process-wide
/// registry.
///
/// Nothing is cached: every call validates again.
pub trait Validate {
    /// Full validation result.
    fn validate(&self) -> ConstraintResult<Violations>;

    /// Violation messages in order.
    fn errors(&self) -> ConstraintResult<Vec<String>> {
        Ok(self.validate()?.messages())
    }

    /// True when no constraint is violated.
    fn valid(&self) -> ConstraintResult<bool> {
        Ok(self.validate()?.is_empty())
    }

    fn has_errors(&self) -> ConstraintResult<bool> {
        Ok(!self.valid()?)
    }
}

impl<T: DataObject> Validate for T {
    fn validate(&self) -> ConstraintResult<Violations> {
        Validator::new(&global_registry()).validate(self)
    }
}

impl Validate for dyn DataObject + '_ {
    fn validate(&self) -> ConstraintResult<Violations> {
        Validator::new(&global_registry()).validate(self)
    }
}
