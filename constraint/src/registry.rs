//! Constraint kind registry.
//!
//! Kinds are looked up by canonical name when a declared spec is evaluated.
//! A process-wide registry pre-loaded with the built-in kinds backs the
//! [`crate::Validate`] extension methods; a [`ConstraintRegistry`] can also be
//! built and passed to a [`crate::Validator`] explicitly.

use crate::builtin::builtin_kinds;
use crate::error::{ConstraintError, ConstraintResult};
use crate::kind::{canonical_name, Constraint, ConstraintKind};
use dataobj_core::Value;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static GLOBAL: LazyLock<RwLock<Arc<ConstraintRegistry>>> =
    LazyLock::new(|| RwLock::new(Arc::new(ConstraintRegistry::with_builtins())));

/// Register a kind with the process-wide registry.
///
/// Validations already running keep the snapshot they started with.
pub fn register_constraint(kind: Arc<dyn ConstraintKind>) -> ConstraintResult<()> {
    let mut global = GLOBAL.write();
    Arc::make_mut(&mut *global).register_kind(kind)
}

/// Snapshot of the process-wide registry.
pub fn global_registry() -> Arc<ConstraintRegistry> {
    Arc::clone(&GLOBAL.read())
}

/// Kinds by canonical name.
#[derive(Clone, Default)]
pub struct ConstraintRegistry {
    kinds: BTreeMap<String, Arc<dyn ConstraintKind>>,
}

impl ConstraintRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in kinds.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for kind in builtin_kinds() {
            let name = canonical_name(kind.name()).to_string();
            registry.kinds.insert(name, kind);
        }
        registry
    }

    /// Register a kind, replacing any kind with the same canonical name.
    pub fn register<K: ConstraintKind + 'static>(&mut self, kind: K) -> ConstraintResult<()> {
        self.register_kind(Arc::new(kind))
    }

    /// Register a shared kind.
    pub fn register_kind(&mut self, kind: Arc<dyn ConstraintKind>) -> ConstraintResult<()> {
        let name = canonical_name(kind.name()).to_string();
        validate_name(kind.name(), &name)?;

        let replaced = self.kinds.insert(name.clone(), kind).is_some();
        debug!(kind = %name, replaced, "registered constraint kind");
        Ok(())
    }

    /// Check whether a kind is registered. Accepts suffixed names.
    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(canonical_name(name))
    }

    /// Get a kind by name. Accepts suffixed names.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ConstraintKind>> {
        self.kinds.get(canonical_name(name))
    }

    /// Bind a kind to an attribute, its required parameter and actual value.
    pub fn resolve<'a>(
        &self,
        name: &str,
        attribute: &'a str,
        required: &'a Value,
        actual: &'a Value,
    ) -> ConstraintResult<Constraint<'a>> {
        let kind = self
            .get(name)
            .ok_or_else(|| ConstraintError::unknown_constraint(name))?;
        Ok(Constraint::new(Arc::clone(kind), attribute, required, actual))
    }

    /// Canonical names of every registered kind, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl std::fmt::Debug for ConstraintRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintRegistry")
            .field("kinds", &self.kinds.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn validate_name(raw: &str, canonical: &str) -> ConstraintResult<()> {
    if canonical.is_empty() {
        return Err(ConstraintError::registration(raw, "empty kind name"));
    }
    if let Some(c) = canonical
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(ConstraintError::registration(
            raw,
            format!("invalid character {:?} in kind name", c),
        ));
    }
    Ok(())
}
