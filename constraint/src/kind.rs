//! The evaluator capability shared by every constraint kind.

use dataobj_core::{ObjectResult, Value};
use std::sync::Arc;

/// Suffix stripped from kind names to obtain the canonical name.
const NAME_SUFFIX: &str = "Constraint";

/// A named rule evaluated against one attribute value and a required parameter.
///
/// Kinds hold no per-check state; the same instance serves every attribute.
pub trait ConstraintKind: Send + Sync {
    /// Kind name. A trailing `Constraint` is dropped at registration.
    fn name(&self) -> &str;

    /// Whether `actual` satisfies the rule for `required`.
    fn is_valid(&self, required: &Value, actual: &Value) -> bool;

    /// Fallible form of [`is_valid`](Self::is_valid), used by validation.
    ///
    /// Kinds that compare values structurally override this so a failed field
    /// lookup surfaces as an error instead of a violation.
    fn check(&self, required: &Value, actual: &Value) -> ObjectResult<bool> {
        Ok(self.is_valid(required, actual))
    }

    /// Violation message for `attribute`.
    fn message(&self, attribute: &str, required: &Value, actual: &Value) -> String;

    /// Check and describe in one step.
    fn evaluate(&self, attribute: &str, required: &Value, actual: &Value) -> Evaluation {
        Evaluation {
            valid: self.is_valid(required, actual),
            message: self.message(attribute, required, actual),
        }
    }
}

/// Outcome of evaluating one constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub valid: bool,
    pub message: String,
}

/// Canonical form of a kind name: `MinConstraint` becomes `Min`.
pub fn canonical_name(name: &str) -> &str {
    name.strip_suffix(NAME_SUFFIX).unwrap_or(name)
}

/// A kind bound to one attribute, its required parameter and the actual value.
#[derive(Clone)]
pub struct Constraint<'a> {
    kind: Arc<dyn ConstraintKind>,
    attribute: &'a str,
    required: &'a Value,
    actual: &'a Value,
}

impl<'a> Constraint<'a> {
    pub(crate) fn new(
        kind: Arc<dyn ConstraintKind>,
        attribute: &'a str,
        required: &'a Value,
        actual: &'a Value,
    ) -> Self {
        Self {
            kind,
            attribute,
            required,
            actual,
        }
    }

    /// Canonical name of the bound kind.
    pub fn kind_name(&self) -> &str {
        canonical_name(self.kind.name())
    }

    pub fn attribute(&self) -> &str {
        self.attribute
    }

    pub fn required(&self) -> &Value {
        self.required
    }

    pub fn actual(&self) -> &Value {
        self.actual
    }

    pub fn valid(&self) -> bool {
        self.kind.is_valid(self.required, self.actual)
    }

    pub fn check(&self) -> ObjectResult<bool> {
        self.kind.check(self.required, self.actual)
    }

    pub fn message(&self) -> String {
        self.kind.message(self.attribute, self.required, self.actual)
    }

    pub fn evaluate(&self) -> Evaluation {
        self.kind.evaluate(self.attribute, self.required, self.actual)
    }
}

impl std::fmt::Debug for Constraint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constraint")
            .field("kind", &self.kind_name())
            .field("attribute", &self.attribute)
            .field("required", self.required)
            .field("actual", self.actual)
            .finish()
    }
}
