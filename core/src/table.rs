//! Constraint declarations attached to a type.

use crate::value::{Predicate, Value};

/// One constraint instance attached to one attribute: a kind name and the
/// parameter it is checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSpec {
    /// Canonical kind name (e.g. "Min").
    pub kind: String,
    /// Required parameter handed to the evaluator.
    pub required: Value,
}

impl ConstraintSpec {
    pub fn new(kind: impl Into<String>, required: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            required: required.into(),
        }
    }
}

/// Ordered set of constraint specs for one attribute, at most one per kind.
///
/// ```
/// use dataobj_core::Specs;
///
/// let specs = Specs::new().nullable(false).min(3).max(10);
/// assert_eq!(specs.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Specs {
    specs: Vec<ConstraintSpec>,
}

impl Specs {
    /// Create an empty spec set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint of any registered kind. A kind already present is
    /// replaced in place.
    pub fn with(mut self, kind: impl Into<String>, required: impl Into<Value>) -> Self {
        self.insert(ConstraintSpec::new(kind, required));
        self
    }

    /// Insert a spec, replacing an existing one of the same kind.
    pub fn insert(&mut self, spec: ConstraintSpec) {
        match self.specs.iter_mut().find(|s| s.kind == spec.kind) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    pub fn min(self, required: impl Into<Value>) -> Self {
        self.with("Min", required)
    }

    pub fn max(self, required: impl Into<Value>) -> Self {
        self.with("Max", required)
    }

    pub fn nullable(self, allowed: bool) -> Self {
        self.with("Nullable", allowed)
    }

    pub fn matches(self, pattern: impl Into<String>) -> Self {
        self.with("Matches", Value::String(pattern.into()))
    }

    pub fn in_list<T: Into<Value>>(self, items: impl IntoIterator<Item = T>) -> Self {
        self.with("InList", Value::list(items))
    }

    pub fn scale(self, decimals: i64) -> Self {
        self.with("Scale", decimals)
    }

    pub fn email(self, required: bool) -> Self {
        self.with("Email", required)
    }

    pub fn ip(self, required: bool) -> Self {
        self.with("IP", required)
    }

    pub fn site(self, required: bool) -> Self {
        self.with("Site", required)
    }

    pub fn custom(self, predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.with("Custom", Predicate::new(predicate))
    }

    /// Get the spec for a kind.
    pub fn get(&self, kind: &str) -> Option<&ConstraintSpec> {
        self.specs.iter().find(|s| s.kind == kind)
    }

    /// Iterate specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Specs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Specs::new(), |specs, (kind, required)| specs.with(kind, required))
    }
}

impl<'a> IntoIterator for &'a Specs {
    type Item = &'a ConstraintSpec;
    type IntoIter = std::slice::Iter<'a, ConstraintSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

/// Mapping from attribute name to its spec set, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintTable {
    entries: Vec<(String, Specs)>,
}

impl ConstraintTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the spec set of an attribute. Redeclaring an attribute replaces
    /// its specs but keeps its position.
    pub fn declare(&mut self, attribute: impl Into<String>, specs: Specs) {
        let attribute = attribute.into();
        match self.entries.iter_mut().find(|(name, _)| *name == attribute) {
            Some((_, existing)) => *existing = specs,
            None => self.entries.push((attribute, specs)),
        }
    }

    /// Get the specs declared for an attribute.
    pub fn get(&self, attribute: &str) -> Option<&Specs> {
        self.entries
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, specs)| specs)
    }

    /// Check if an attribute has a declaration.
    pub fn contains(&self, attribute: &str) -> bool {
        self.get(attribute).is_some()
    }

    /// Get all declared attribute names, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate (attribute, specs) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Specs)> {
        self.entries.iter().map(|(name, specs)| (name.as_str(), specs))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
