use fxhash::FxBuildHasher;
/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// which additionally can report every expanded node together with the final
/// cost it was expanded at, as needed for post-search heuristic updates.
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

/// Frontier entry: the node itself lives in the arena at `index`, only the
/// ordering keys are duplicated here so the node type stays free of search
/// policy.
struct FrontierEntry<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for FrontierEntry<K> {}

impl<K: PartialEq> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<K: Ord> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-order on estimated total cost f; on equal f the entry with the
        // larger realized cost g wins, so nodes deeper along their path are
        // expanded first. Grids are full of equal-cost alternatives and this
        // cuts down on re-expansions.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Best-first search from `start` until `success` holds, returning the path
/// and its total cost.
pub(crate) fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    successors: FN,
    heuristic: FH,
    success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    astar_with_expansions(start, successors, heuristic, success).map(|(path, cost, _)| (path, cost))
}

/// Like [`astar`], but on success also yields every node that was expanded
/// (popped from the frontier and not discarded as stale), paired with the
/// cost it had been reached at. With a consistent heuristic each node shows
/// up at most once and its recorded cost is final.
pub(crate) fn astar_with_expansions<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C, Vec<(N, C)>)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
    });
    // Arena of discovered nodes: position -> (parent arena index, best g).
    // Parent links form a tree rooted at the start, whose parent index is
    // the out-of-band usize::MAX.
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut expanded: Vec<(N, C)> = Vec::new();
    while let Some(FrontierEntry { cost, index, .. }) = frontier.pop() {
        let successors = {
            let (node, &(_, c)) = parents.get_index(index).unwrap();
            if success(node) {
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost, expanded));
            }
            // A node may sit in the frontier several times if a better way
            // to it was found after an earlier insertion. Only the entry
            // carrying the best known cost gets expanded.
            if cost > c {
                continue;
            }
            expanded.push((node.clone(), c));

            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            frontier.push(FrontierEntry {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    warn!("Reachable goal could not be pathed to, is reachable graph correct?");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // Line graph 0 - 1 - 2 - 3 with unit edges.
    fn line_successors(n: &i32) -> Vec<(i32, i32)> {
        [*n - 1, *n + 1]
            .into_iter()
            .filter(|m| (0..4).contains(m))
            .map(|m| (m, 1))
            .collect()
    }

    #[test]
    fn finds_path_on_line_graph() {
        let (path, cost) = astar(&0, line_successors, |n| 3 - *n, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(cost, 3);
    }

    #[test]
    fn reports_none_when_frontier_exhausts() {
        let result = astar(&0, line_successors, |_| 0, |n| *n == 42);
        assert!(result.is_none());
    }

    #[test]
    fn expansions_carry_final_costs() {
        let (_, cost, expanded) =
            astar_with_expansions(&0, line_successors, |n| 3 - *n, |n| *n == 3).unwrap();
        assert_eq!(cost, 3);
        // The goal is never part of the expansion record.
        assert!(expanded.iter().all(|(n, _)| *n != 3));
        for (n, g) in expanded {
            assert_eq!(g, n);
        }
    }
}
