//! # atomspace
//!
//! A typed, attention-weighted hypergraph knowledge store with a
//! constraint-based pattern-matching query engine.
//!
//! ## Architecture
//!
//! - **Atoms** (`atom`): uniform hypergraph units — named Nodes and ordered
//!   Links — carrying probabilistic truth values and attention values
//! - **Store** (`store`): single owning arena keyed by id, with name, type,
//!   and incoming indices kept in lockstep
//! - **Queries** (`pattern`, `traverse`): index-probed filter conjunctions,
//!   positional variable binding, and bounded cycle-safe transitive closure
//!
//! All cross-atom relations are plain id handles resolved through the store,
//! so the graph carries no reference cycles. The store is in-memory and
//! single-owner; mutation is synchronous and queries only read.
//!
//! ## Library usage
//!
//! ```
//! use atomspace::pattern::{Pattern, PatternMatcher};
//! use atomspace::store::AtomStore;
//!
//! let mut store = AtomStore::new();
//! let cat = store.add_node("ConceptNode", "cat").unwrap();
//! let mammal = store.add_node("ConceptNode", "mammal").unwrap();
//! store.add_link("InheritanceLink", vec![cat.id, mammal.id]).unwrap();
//!
//! let matcher = PatternMatcher::new(&store);
//! let parents = matcher.find_transitive("InheritanceLink", cat.id, 3);
//! assert_eq!(parents[0].id, mammal.id);
//! ```

pub mod atom;
pub mod error;
pub mod pattern;
pub mod store;
pub mod traverse;
