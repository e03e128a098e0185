use std::collections::{BTreeSet, HashMap};

use quickcheck_macros::quickcheck;
use recmemo::{CycleDetected, Memo, Options, Resolver, Rule, Slot};

const NODES: u8 = 8;

type Graph = HashMap<u8, Vec<u8>>;

/// Computes all nodes reachable from a node.
struct Reach<'a>(&'a Graph);

impl Rule<u8, BTreeSet<u8>> for Reach<'_> {
    fn compute(
        &self,
        node: &u8,
        memo: &mut Resolver<u8, BTreeSet<u8>>,
    ) -> Result<BTreeSet<u8>, CycleDetected<u8>> {
        let mut reach = BTreeSet::new();
        for &next in &self.0[node] {
            reach.insert(next);
            if let Slot::Resolved(transitive) = memo.lookup(next)? {
                reach.extend(transitive);
            }
        }
        Ok(reach)
    }
}

#[quickcheck]
fn test_acyclic_matches_search(pairs: Vec<(u8, u8)>) -> bool {
    let graph = graph(&pairs, true);
    let mut memo = Memo::new(Reach(&graph));
    (0..NODES).all(|node| memo.get(node) == Ok(search(&graph, node)))
}

#[quickcheck]
fn test_strict_fails_on_reachable_cycle(pairs: Vec<(u8, u8)>) -> bool {
    let graph = graph(&pairs, false);
    (0..NODES).all(|node| {
        let mut memo = Memo::new(Reach(&graph));
        let cyclic = std::iter::once(node)
            .chain(search(&graph, node))
            .any(|m| search(&graph, m).contains(&m));
        memo.get(node).is_err() == cyclic
    })
}

#[quickcheck]
fn test_tolerant_never_fails(pairs: Vec<(u8, u8)>) -> bool {
    let graph = graph(&pairs, false);
    let options = Options::new().permit_cycles(true);
    let Ok(memo) = Memo::with_keys(Reach(&graph), 0..NODES, options) else {
        return false;
    };

    memo.len() == usize::from(NODES)
        && memo.resolved().all(|(node, reach)| {
            reach.is_subset(&search(&graph, *node))
                && graph[node].iter().all(|next| reach.contains(next))
        })
}

/// Build a graph over `NODES` nodes. If `acyclic`, only keep edges that point
/// to a larger node.
fn graph(pairs: &[(u8, u8)], acyclic: bool) -> Graph {
    let mut graph: Graph = (0..NODES).map(|node| (node, vec![])).collect();
    for &(from, to) in pairs {
        let (from, to) = (from % NODES, to % NODES);
        if acyclic && from >= to {
            continue;
        }
        graph.entry(from).or_default().push(to);
    }
    graph
}

/// Plain depth-first search without memoization.
fn search(graph: &Graph, start: u8) -> BTreeSet<u8> {
    let mut seen = BTreeSet::new();
    let mut stack = graph[&start].clone();
    while let Some(node) = stack.pop() {
        if seen.insert(node) {
            stack.extend(&graph[&node]);
        }
    }
    seen
}
