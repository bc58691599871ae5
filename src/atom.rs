//! Core atom types for the atomspace.
//!
//! Atoms are the uniform units of the hypergraph. Every concept and relation
//! is an [`Atom`], identified by an [`AtomId`] and carrying a probabilistic
//! [`TruthValue`] and a salience [`AttentionValue`]. The [`AtomIdAllocator`]
//! provides thread-safe, per-store ID generation.

use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Unique, niche-optimized identifier for an atom.
///
/// Uses `NonZeroU64` so that `Option<AtomId>` is the same size as `AtomId`
/// (the niche optimization lets the compiler use 0 as the `None` discriminant).
/// IDs are assigned in strictly increasing order and never reused, so a stale
/// id is detected as absent rather than silently resolving to a new atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct AtomId(NonZeroU64);

impl AtomId {
    /// Create an `AtomId` from a raw `u64`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(AtomId)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for AtomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "atom:{}", self.0)
    }
}

/// Probabilistic belief attached to an atom.
///
/// Both components live in `[0.0, 1.0]` and are clamped at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruthValue {
    /// How strongly the atom is believed to hold.
    pub strength: f32,
    /// How much evidence backs the strength estimate.
    pub confidence: f32,
}

impl TruthValue {
    /// Create a truth value, clamping both components to `[0.0, 1.0]`.
    pub fn new(strength: f32, confidence: f32) -> Self {
        Self {
            strength: strength.clamp(0.0, 1.0),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

impl Default for TruthValue {
    /// Full belief: `{strength: 1.0, confidence: 1.0}`.
    fn default() -> Self {
        Self {
            strength: 1.0,
            confidence: 1.0,
        }
    }
}

/// Salience of an atom over three time horizons.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttentionValue {
    /// Short-term importance.
    pub sti: f32,
    /// Long-term importance.
    pub lti: f32,
    /// Very-long-term importance.
    pub vlti: f32,
}

impl AttentionValue {
    /// Create an attention value from its three components.
    pub fn new(sti: f32, lti: f32, vlti: f32) -> Self {
        Self { sti, lti, vlti }
    }
}

/// The variant-specific payload of an atom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AtomKind {
    /// A named, non-relational concept or predicate.
    Node {
        /// Human-readable name. Duplicate names are legal; atoms stay
        /// independently addressable by id.
        name: String,
    },
    /// A relational atom connecting other atoms.
    Link {
        /// Ordered atom ids. Position carries semantic role (for an
        /// `InheritanceLink`, position 0 is the child, position 1 the parent).
        /// Ids are stored verbatim and may not resolve to a live atom.
        outgoing: Vec<AtomId>,
    },
}

/// A Node or Link in the hypergraph.
///
/// `id`, `atom_type`, and `kind` are fixed at creation. Truth and attention
/// values are replaced (never merged) through
/// [`AtomStore::set_truth_value`](crate::store::AtomStore::set_truth_value)
/// and
/// [`AtomStore::set_attention_value`](crate::store::AtomStore::set_attention_value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    /// Unique identifier, assigned by the owning store.
    pub id: AtomId,
    /// Type tag from an open string namespace (e.g. `ConceptNode`,
    /// `InheritanceLink`). Matching is always exact string equality; there is
    /// no built-in type hierarchy.
    pub atom_type: String,
    /// Probabilistic belief.
    pub tv: TruthValue,
    /// Salience.
    pub av: AttentionValue,
    /// Node or Link payload.
    pub kind: AtomKind,
}

impl Atom {
    /// The node name, or `None` for links.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            AtomKind::Node { name } => Some(name),
            AtomKind::Link { .. } => None,
        }
    }

    /// The ordered outgoing ids, or an empty slice for nodes.
    pub fn outgoing(&self) -> &[AtomId] {
        match &self.kind {
            AtomKind::Node { .. } => &[],
            AtomKind::Link { outgoing } => outgoing,
        }
    }

    /// Whether this atom is a node.
    pub fn is_node(&self) -> bool {
        matches!(self.kind, AtomKind::Node { .. })
    }

    /// Whether this atom is a link.
    pub fn is_link(&self) -> bool {
        matches!(self.kind, AtomKind::Link { .. })
    }
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            AtomKind::Node { name } => write!(f, "({} \"{}\" #{})", self.atom_type, name, self.id),
            AtomKind::Link { outgoing } => {
                write!(f, "({} #{} ->", self.atom_type, self.id)?;
                for target in outgoing {
                    write!(f, " {target}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Thread-safe atom ID allocator.
///
/// Produces monotonically increasing IDs starting from 1. Each [`AtomStore`]
/// owns its own allocator, so independent stores never collide. Safe to reach
/// through a shared reference when the store sits behind an external lock.
///
/// [`AtomStore`]: crate::store::AtomStore
#[derive(Debug)]
pub struct AtomIdAllocator {
    next: AtomicU64,
}

impl AtomIdAllocator {
    /// Create a new allocator that starts from ID 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Allocate the next atom ID.
    ///
    /// Returns an error if the ID space is exhausted (after 2^64 - 1
    /// allocations).
    pub fn next_id(&self) -> StoreResult<AtomId> {
        let raw = self.next.fetch_add(1, Ordering::Relaxed);
        AtomId::new(raw).ok_or(StoreError::IdSpaceExhausted)
    }

    /// Return the next ID that *would* be allocated, without consuming it.
    pub fn peek_next(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

impl Default for AtomIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atom_id_niche_optimization() {
        // Option<AtomId> should be the same size as AtomId thanks to NonZeroU64.
        assert_eq!(
            std::mem::size_of::<Option<AtomId>>(),
            std::mem::size_of::<AtomId>()
        );
    }

    #[test]
    fn atom_id_zero_is_none() {
        assert!(AtomId::new(0).is_none());
        assert!(AtomId::new(1).is_some());
        assert_eq!(AtomId::new(42).unwrap().get(), 42);
    }

    #[test]
    fn allocator_produces_sequential_ids() {
        let alloc = AtomIdAllocator::new();
        let a = alloc.next_id().unwrap();
        let b = alloc.next_id().unwrap();
        let c = alloc.next_id().unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(c.get(), 3);
    }

    #[test]
    fn truth_value_default_is_full_belief() {
        let tv = TruthValue::default();
        assert_eq!(tv.strength, 1.0);
        assert_eq!(tv.confidence, 1.0);
    }

    #[test]
    fn truth_value_clamps() {
        let tv = TruthValue::new(1.5, -0.2);
        assert_eq!(tv.strength, 1.0);
        assert_eq!(tv.confidence, 0.0);
    }

    #[test]
    fn attention_value_default_is_zero() {
        let av = AttentionValue::default();
        assert_eq!(av.sti, 0.0);
        assert_eq!(av.lti, 0.0);
        assert_eq!(av.vlti, 0.0);
    }

    #[test]
    fn node_accessors() {
        let atom = Atom {
            id: AtomId::new(1).unwrap(),
            atom_type: "ConceptNode".into(),
            tv: TruthValue::default(),
            av: AttentionValue::default(),
            kind: AtomKind::Node { name: "cat".into() },
        };
        assert!(atom.is_node());
        assert!(!atom.is_link());
        assert_eq!(atom.name(), Some("cat"));
        assert!(atom.outgoing().is_empty());
    }

    #[test]
    fn link_accessors() {
        let targets = vec![AtomId::new(1).unwrap(), AtomId::new(2).unwrap()];
        let atom = Atom {
            id: AtomId::new(3).unwrap(),
            atom_type: "InheritanceLink".into(),
            tv: TruthValue::default(),
            av: AttentionValue::default(),
            kind: AtomKind::Link {
                outgoing: targets.clone(),
            },
        };
        assert!(atom.is_link());
        assert_eq!(atom.name(), None);
        assert_eq!(atom.outgoing(), targets.as_slice());
    }

    #[test]
    fn atom_id_display() {
        let id = AtomId::new(42).unwrap();
        assert_eq!(id.to_string(), "atom:42");
    }

    #[test]
    fn atom_id_ordering_matches_allocation_order() {
        let alloc = AtomIdAllocator::new();
        let a = alloc.next_id().unwrap();
        let b = alloc.next_id().unwrap();
        assert!(a < b);
    }
}
