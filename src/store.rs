//! In-memory hypergraph store with synchronized secondary indices.
//!
//! The [`AtomStore`] owns every [`Atom`] in a primary id-keyed map and keeps
//! three derived indices in lockstep: name → ids (nodes only), type → ids,
//! and the incoming index (id → links that mention it). All cross-atom
//! relations are id lookups through the store, so no atom ever holds a
//! reference to another — the arena-plus-index pattern.
//!
//! The store is single-owner: mutation takes `&mut self` and completes before
//! returning. Hosts that share a store across threads wrap it in one external
//! lock around each public operation; there is no internal fine-grained
//! locking.

use std::collections::{BTreeSet, HashMap};

use crate::atom::{Atom, AtomId, AtomIdAllocator, AtomKind, AttentionValue, TruthValue};
use crate::error::{StoreError, StoreResult};

/// Owning store for atoms, with name, type, and incoming indices.
///
/// Index sets are `BTreeSet`s, so every index-derived result is ordered by
/// ascending id — which is creation order, since ids are monotonic. That
/// order is stable across calls absent mutation.
pub struct AtomStore {
    /// Primary map: id → Atom (source of truth, canonical lifetime anchor).
    atoms: HashMap<AtomId, Atom>,
    /// Node name → ids of nodes carrying that name.
    name_index: HashMap<String, BTreeSet<AtomId>>,
    /// Type tag → ids of atoms with that type.
    type_index: HashMap<String, BTreeSet<AtomId>>,
    /// Id → ids of live links whose outgoing list mentions it.
    incoming: HashMap<AtomId, BTreeSet<AtomId>>,
    /// Per-store id allocator; independent stores never collide.
    allocator: AtomIdAllocator,
}

impl AtomStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            atoms: HashMap::new(),
            name_index: HashMap::new(),
            type_index: HashMap::new(),
            incoming: HashMap::new(),
            allocator: AtomIdAllocator::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Add a node with default truth and attention values.
    ///
    /// There is no uniqueness constraint on (type, name): duplicates are
    /// legal and independently addressable by id.
    pub fn add_node(
        &mut self,
        atom_type: impl Into<String>,
        name: impl Into<String>,
    ) -> StoreResult<Atom> {
        self.add_node_with(
            atom_type,
            name,
            TruthValue::default(),
            AttentionValue::default(),
        )
    }

    /// Add a node with explicit truth and attention values.
    ///
    /// Returns a clone of the inserted atom; the store keeps ownership.
    pub fn add_node_with(
        &mut self,
        atom_type: impl Into<String>,
        name: impl Into<String>,
        tv: TruthValue,
        av: AttentionValue,
    ) -> StoreResult<Atom> {
        let atom_type = atom_type.into();
        let name = name.into();
        let id = self.allocator.next_id()?;

        let atom = Atom {
            id,
            atom_type: atom_type.clone(),
            tv,
            av,
            kind: AtomKind::Node { name: name.clone() },
        };

        self.name_index.entry(name).or_default().insert(id);
        self.type_index.entry(atom_type).or_default().insert(id);
        self.atoms.insert(id, atom.clone());

        tracing::debug!(%id, atom_type = %atom.atom_type, "added node");
        Ok(atom)
    }

    /// Add a link with default truth and attention values.
    ///
    /// The outgoing list is stored verbatim: referenced ids are not required
    /// to resolve at creation time, so forward references are allowed. Use
    /// [`add_link_checked`](Self::add_link_checked) to reject them instead.
    pub fn add_link(
        &mut self,
        atom_type: impl Into<String>,
        outgoing: Vec<AtomId>,
    ) -> StoreResult<Atom> {
        self.add_link_with(
            atom_type,
            outgoing,
            TruthValue::default(),
            AttentionValue::default(),
        )
    }

    /// Add a link with explicit truth and attention values.
    pub fn add_link_with(
        &mut self,
        atom_type: impl Into<String>,
        outgoing: Vec<AtomId>,
        tv: TruthValue,
        av: AttentionValue,
    ) -> StoreResult<Atom> {
        let atom_type = atom_type.into();
        let id = self.allocator.next_id()?;

        for &target in &outgoing {
            self.incoming.entry(target).or_default().insert(id);
        }

        let atom = Atom {
            id,
            atom_type: atom_type.clone(),
            tv,
            av,
            kind: AtomKind::Link { outgoing },
        };

        self.type_index.entry(atom_type).or_default().insert(id);
        self.atoms.insert(id, atom.clone());

        tracing::debug!(%id, atom_type = %atom.atom_type, arity = atom.outgoing().len(), "added link");
        Ok(atom)
    }

    /// Add a link, rejecting outgoing ids that do not resolve to a live atom.
    ///
    /// Strict counterpart of [`add_link`](Self::add_link). Errors with
    /// [`StoreError::DanglingReference`] naming the first offending position;
    /// nothing is inserted on failure.
    pub fn add_link_checked(
        &mut self,
        atom_type: impl Into<String>,
        outgoing: Vec<AtomId>,
        tv: TruthValue,
        av: AttentionValue,
    ) -> StoreResult<Atom> {
        for (position, &target) in outgoing.iter().enumerate() {
            if !self.atoms.contains_key(&target) {
                return Err(StoreError::DanglingReference {
                    id: target.get(),
                    position,
                });
            }
        }
        self.add_link_with(atom_type, outgoing, tv, av)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Look up an atom by id. O(1).
    pub fn get(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(&id)
    }

    /// All nodes carrying the given name, ordered by id.
    pub fn get_by_name(&self, name: &str) -> Vec<&Atom> {
        self.resolve_set(self.name_index.get(name))
    }

    /// All atoms of the given type, ordered by id.
    pub fn get_by_type(&self, atom_type: &str) -> Vec<&Atom> {
        self.resolve_set(self.type_index.get(atom_type))
    }

    /// Resolve a link's outgoing list in positional order.
    ///
    /// Ids that no longer resolve to a live atom are silently omitted (their
    /// positions collapse). Empty if `id` is absent or not a link.
    pub fn outgoing(&self, id: AtomId) -> Vec<&Atom> {
        let Some(link) = self.atoms.get(&id) else {
            return vec![];
        };
        link.outgoing()
            .iter()
            .filter_map(|target| self.atoms.get(target))
            .collect()
    }

    /// All live links whose outgoing list mentions `id`, ordered by link id.
    pub fn incoming(&self, id: AtomId) -> Vec<&Atom> {
        self.resolve_set(self.incoming.get(&id))
    }

    fn resolve_set(&self, ids: Option<&BTreeSet<AtomId>>) -> Vec<&Atom> {
        ids.map(|set| {
            set.iter()
                .filter_map(|id| self.atoms.get(id))
                .collect()
        })
        .unwrap_or_default()
    }

    /// Number of live atoms. O(1).
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the store holds no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Snapshot of all live atoms (no order guarantee).
    pub fn atoms(&self) -> Vec<&Atom> {
        self.atoms.values().collect()
    }

    // -----------------------------------------------------------------------
    // Updates
    // -----------------------------------------------------------------------

    /// Replace an atom's truth value. Full replacement, not a merge.
    ///
    /// Returns `false` if `id` is absent; never panics.
    pub fn set_truth_value(&mut self, id: AtomId, tv: TruthValue) -> bool {
        match self.atoms.get_mut(&id) {
            Some(atom) => {
                atom.tv = tv;
                true
            }
            None => false,
        }
    }

    /// Replace an atom's attention value. Same contract as
    /// [`set_truth_value`](Self::set_truth_value).
    pub fn set_attention_value(&mut self, id: AtomId, av: AttentionValue) -> bool {
        match self.atoms.get_mut(&id) {
            Some(atom) => {
                atom.av = av;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Removal
    // -----------------------------------------------------------------------

    /// Remove an atom, returning `false` if `id` is absent.
    ///
    /// A removed link withdraws its incoming-index contributions. Links that
    /// mention the removed atom are left untouched: their outgoing lists now
    /// dangle, and resolution omits the missing position at read time. No
    /// cascade in either direction.
    pub fn remove(&mut self, id: AtomId) -> bool {
        let Some(atom) = self.atoms.remove(&id) else {
            return false;
        };

        if let Some(ids) = self.type_index.get_mut(&atom.atom_type) {
            ids.remove(&id);
            if ids.is_empty() {
                self.type_index.remove(&atom.atom_type);
            }
        }

        match &atom.kind {
            AtomKind::Node { name } => {
                if let Some(ids) = self.name_index.get_mut(name) {
                    ids.remove(&id);
                    if ids.is_empty() {
                        self.name_index.remove(name);
                    }
                }
            }
            AtomKind::Link { outgoing } => {
                for target in outgoing {
                    if let Some(links) = self.incoming.get_mut(target) {
                        links.remove(&id);
                        if links.is_empty() {
                            self.incoming.remove(target);
                        }
                    }
                }
            }
        }

        // The removed atom's own incoming entry goes too; links that pointed
        // at it keep their outgoing lists and dangle.
        self.incoming.remove(&id);

        tracing::debug!(%id, atom_type = %atom.atom_type, "removed atom");
        true
    }

    /// Empty the store and all indices. Idempotent; the id counter is not
    /// reset, so ids from before the clear stay unused.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.name_index.clear();
        self.type_index.clear();
        self.incoming.clear();
        tracing::debug!("cleared store");
    }
}

impl Default for AtomStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AtomStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomStore")
            .field("atoms", &self.atoms.len())
            .field("names", &self.name_index.len())
            .field("types", &self.type_index.len())
            .finish()
    }
}
