//! Bounded transitive closure over typed links.
//!
//! BFS from a start atom following links of one type, treating
//! `outgoing[0]` as the source role and `outgoing[1]` as the target role
//! (the `InheritanceLink`/`ImplicationLink` convention). A visited-id set
//! makes the walk cycle-safe and guarantees termination.

use std::collections::{HashSet, VecDeque};

use crate::atom::{Atom, AtomId};
use crate::pattern::PatternMatcher;

impl<'a> PatternMatcher<'a> {
    /// Atoms reachable from `start` through links of `link_type`, up to
    /// `max_depth` hops, in breadth order by hop count.
    ///
    /// A hop follows a link whose `outgoing[0]` is the current atom to the
    /// atom at `outgoing[1]`. Links of other types, links where the current
    /// atom sits in a different position, nullary/unary links, and hops whose
    /// target id dangles are all skipped. An atom reached by multiple paths
    /// appears once. The start atom itself is not part of the result; empty
    /// when no `link_type` link originates at `start`.
    pub fn find_transitive(
        &self,
        link_type: &str,
        start: AtomId,
        max_depth: usize,
    ) -> Vec<&'a Atom> {
        let store = self.store();
        let mut visited: HashSet<AtomId> = HashSet::new();
        let mut reached: Vec<&'a Atom> = Vec::new();
        let mut queue: VecDeque<(AtomId, usize)> = VecDeque::new();

        visited.insert(start);
        queue.push_back((start, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }

            // The incoming index holds every link mentioning `current`;
            // narrow to typed links where it fills the source role.
            for link in store.incoming(current) {
                if link.atom_type != link_type {
                    continue;
                }
                let out = link.outgoing();
                if out.first() != Some(&current) {
                    continue;
                }
                let Some(&next) = out.get(1) else {
                    continue;
                };
                let Some(target) = store.get(next) else {
                    continue;
                };
                if visited.insert(next) {
                    reached.push(target);
                    queue.push_back((next, depth + 1));
                }
            }
        }

        reached
    }
}

#[cfg(test)]
mod tests {
    use crate::atom::AtomId;
    use crate::pattern::PatternMatcher;
    use crate::store::AtomStore;

    fn chain_store() -> (AtomStore, Vec<AtomId>) {
        // a --ImplicationLink--> b --ImplicationLink--> c --ImplicationLink--> d
        let mut store = AtomStore::new();
        let ids: Vec<AtomId> = ["a", "b", "c", "d"]
            .iter()
            .map(|name| store.add_node("ConceptNode", *name).unwrap().id)
            .collect();
        for pair in ids.windows(2) {
            store
                .add_link("ImplicationLink", vec![pair[0], pair[1]])
                .unwrap();
        }
        (store, ids)
    }

    #[test]
    fn single_hop() {
        let (store, ids) = chain_store();
        let matcher = PatternMatcher::new(&store);

        let reached = matcher.find_transitive("ImplicationLink", ids[0], 1);
        assert_eq!(reached.len(), 1);
        assert_eq!(reached[0].id, ids[1]);
    }

    #[test]
    fn full_chain_in_breadth_order() {
        let (store, ids) = chain_store();
        let matcher = PatternMatcher::new(&store);

        let reached = matcher.find_transitive("ImplicationLink", ids[0], 10);
        let reached_ids: Vec<AtomId> = reached.iter().map(|a| a.id).collect();
        assert_eq!(reached_ids, vec![ids[1], ids[2], ids[3]]);
    }

    #[test]
    fn depth_bound_cuts_the_walk() {
        let (store, ids) = chain_store();
        let matcher = PatternMatcher::new(&store);

        let reached = matcher.find_transitive("ImplicationLink", ids[0], 2);
        assert_eq!(reached.len(), 2);
    }

    #[test]
    fn cycle_terminates() {
        let (mut store, ids) = chain_store();
        // Close the loop: b --> a.
        store
            .add_link("ImplicationLink", vec![ids[1], ids[0]])
            .unwrap();

        let matcher = PatternMatcher::new(&store);
        let reached = matcher.find_transitive("ImplicationLink", ids[0], 100);
        // a is the start and never re-reported; b, c, d each appear once.
        assert_eq!(reached.len(), 3);
    }

    #[test]
    fn no_origin_link_means_empty() {
        let (store, ids) = chain_store();
        let matcher = PatternMatcher::new(&store);

        // d has only an incoming edge.
        assert!(matcher
            .find_transitive("ImplicationLink", ids[3], 5)
            .is_empty());
        // Wrong type.
        assert!(matcher
            .find_transitive("InheritanceLink", ids[0], 5)
            .is_empty());
        // Absent start.
        assert!(matcher
            .find_transitive("ImplicationLink", AtomId::new(9999).unwrap(), 5)
            .is_empty());
    }

    #[test]
    fn other_positions_do_not_count_as_origin() {
        let mut store = AtomStore::new();
        let a = store.add_node("ConceptNode", "a").unwrap();
        let b = store.add_node("ConceptNode", "b").unwrap();
        // a appears at position 1, not 0: no hop originates at a.
        store
            .add_link("ImplicationLink", vec![b.id, a.id])
            .unwrap();

        let matcher = PatternMatcher::new(&store);
        assert!(matcher.find_transitive("ImplicationLink", a.id, 3).is_empty());
        assert_eq!(matcher.find_transitive("ImplicationLink", b.id, 3).len(), 1);
    }

    #[test]
    fn dangling_hop_target_is_skipped() {
        let mut store = AtomStore::new();
        let a = store.add_node("ConceptNode", "a").unwrap();
        let b = store.add_node("ConceptNode", "b").unwrap();
        store
            .add_link("ImplicationLink", vec![a.id, b.id])
            .unwrap();
        store.remove(b.id);

        let matcher = PatternMatcher::new(&store);
        assert!(matcher.find_transitive("ImplicationLink", a.id, 3).is_empty());
    }

    #[test]
    fn zero_depth_reaches_nothing() {
        let (store, ids) = chain_store();
        let matcher = PatternMatcher::new(&store);
        assert!(matcher.find_transitive("ImplicationLink", ids[0], 0).is_empty());
    }
}
