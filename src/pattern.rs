//! Constraint-based pattern matching over the atom store.
//!
//! A [`Pattern`] is a conjunction of optional filters: exact type and name
//! matches, truth/attention thresholds, positional variables, and arbitrary
//! [`Constraint`] predicates. The [`PatternMatcher`] is stateless — it holds
//! only a shared reference to an [`AtomStore`] and never mutates it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::atom::{Atom, AtomId};
use crate::store::AtomStore;

/// A predicate over an atom, with read access to the store for graph lookups.
///
/// Implemented for any `Fn(&Atom, &AtomStore) -> bool`, so closures slot in
/// directly; implement it on a named type when the predicate carries state.
pub trait Constraint {
    /// Whether the atom satisfies this constraint.
    fn check(&self, atom: &Atom, store: &AtomStore) -> bool;
}

impl<F> Constraint for F
where
    F: Fn(&Atom, &AtomStore) -> bool,
{
    fn check(&self, atom: &Atom, store: &AtomStore) -> bool {
        self(atom, store)
    }
}

/// Filter configuration for a query. All fields optional, AND-combined.
#[derive(Default)]
pub struct Pattern {
    /// Exact type tag to match.
    pub atom_type: Option<String>,
    /// Exact node name to match (links never match when set).
    pub name: Option<String>,
    /// Variable name → outgoing-position to bind in
    /// [`PatternMatcher::match_variables`].
    pub variables: Vec<(String, usize)>,
    /// Predicates applied last, in order.
    pub constraints: Vec<Box<dyn Constraint>>,
    /// Minimum truth-value strength.
    pub min_strength: Option<f32>,
    /// Minimum truth-value confidence.
    pub min_confidence: Option<f32>,
    /// Minimum short-term importance.
    pub min_sti: Option<f32>,
}

impl Pattern {
    /// An empty pattern: matches every atom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact type tag.
    pub fn with_type(mut self, atom_type: impl Into<String>) -> Self {
        self.atom_type = Some(atom_type.into());
        self
    }

    /// Require an exact node name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Bind `name` to the atom at `position` in matching links' outgoing
    /// lists.
    pub fn with_variable(mut self, name: impl Into<String>, position: usize) -> Self {
        self.variables.push((name.into(), position));
        self
    }

    /// Append a constraint predicate.
    pub fn with_constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Require truth-value strength of at least `min`.
    pub fn with_min_strength(mut self, min: f32) -> Self {
        self.min_strength = Some(min);
        self
    }

    /// Require truth-value confidence of at least `min`.
    pub fn with_min_confidence(mut self, min: f32) -> Self {
        self.min_confidence = Some(min);
        self
    }

    /// Require short-term importance of at least `min`.
    pub fn with_min_sti(mut self, min: f32) -> Self {
        self.min_sti = Some(min);
        self
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("atom_type", &self.atom_type)
            .field("name", &self.name)
            .field("variables", &self.variables)
            .field("constraints", &self.constraints.len())
            .field("min_strength", &self.min_strength)
            .field("min_confidence", &self.min_confidence)
            .field("min_sti", &self.min_sti)
            .finish()
    }
}

/// Variable assignments discovered for one matching link.
///
/// A variable whose position is out of range, or whose target id dangles, is
/// simply absent from `bindings`; the candidate itself is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableBinding {
    /// The link the variables were bound against.
    pub link: AtomId,
    /// Variable name → bound atom id.
    pub bindings: HashMap<String, AtomId>,
}

/// Stateless query engine over an [`AtomStore`].
#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher<'a> {
    store: &'a AtomStore,
}

impl<'a> PatternMatcher<'a> {
    /// Create a matcher reading from `store`.
    pub fn new(store: &'a AtomStore) -> Self {
        Self { store }
    }

    /// The store this matcher reads from.
    pub fn store(&self) -> &'a AtomStore {
        self.store
    }

    /// All atoms satisfying every filter in `pattern`.
    ///
    /// Candidates come from the type index when a type filter is set (O(k) in
    /// the matched set), otherwise from a full scan ordered by id. Remaining
    /// filters apply in sequence: name, strength, confidence, sti, then each
    /// constraint. Never errors; empty on no match.
    pub fn find(&self, pattern: &Pattern) -> Vec<&'a Atom> {
        let candidates: Vec<&'a Atom> = match &pattern.atom_type {
            Some(atom_type) => self.store.get_by_type(atom_type),
            None => {
                let mut all = self.store.atoms();
                all.sort_by_key(|atom| atom.id);
                all
            }
        };

        candidates
            .into_iter()
            .filter(|atom| self.matches(pattern, atom))
            .collect()
    }

    /// Bind the pattern's variables against every matching link.
    ///
    /// Candidates are the links satisfying `pattern` (non-links are
    /// discarded). For each `(name, position)` variable, the atom at
    /// `outgoing[position]` is bound when it resolves; otherwise that
    /// variable stays unbound for that link.
    pub fn match_variables(&self, pattern: &Pattern) -> Vec<VariableBinding> {
        self.find(pattern)
            .into_iter()
            .filter(|atom| atom.is_link())
            .map(|link| {
                let mut bindings = HashMap::new();
                for (name, position) in &pattern.variables {
                    let target = link
                        .outgoing()
                        .get(*position)
                        .filter(|id| self.store.get(**id).is_some());
                    if let Some(id) = target {
                        bindings.insert(name.clone(), *id);
                    }
                }
                VariableBinding {
                    link: link.id,
                    bindings,
                }
            })
            .collect()
    }

    fn matches(&self, pattern: &Pattern, atom: &Atom) -> bool {
        if let Some(name) = &pattern.name {
            if atom.name() != Some(name.as_str()) {
                return false;
            }
        }
        if let Some(min) = pattern.min_strength {
            if atom.tv.strength < min {
                return false;
            }
        }
        if let Some(min) = pattern.min_confidence {
            if atom.tv.confidence < min {
                return false;
            }
        }
        if let Some(min) = pattern.min_sti {
            if atom.av.sti < min {
                return false;
            }
        }
        pattern
            .constraints
            .iter()
            .all(|constraint| constraint.check(atom, self.store))
    }
}
