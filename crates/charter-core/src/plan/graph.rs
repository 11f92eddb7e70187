//! Dependency graph cycle detection.
//!
//! Answers one question: does the directed graph admit a topological order?
//! The traversal is an explicit-stack depth-first search rather than a
//! recursive one, so adversarially deep dependency chains cannot blow the
//! call stack.

use std::collections::HashMap;

/// Per-node traversal state. `Active` means the node is on the current
/// DFS path; an edge into an `Active` node is a back edge, i.e. a cycle.
/// `Done` nodes are fully explored and never revisited.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Return `true` iff the directed graph over `nodes` with `edges` contains
/// at least one cycle.
///
/// `nodes` is the full node set, isolated nodes included. Edges whose
/// endpoints are not in `nodes` are ignored; callers are expected to have
/// filtered them already. Self-loops count as cycles. Runs in
/// O(nodes + edges); the verdict does not depend on iteration order.
pub fn has_cycle(nodes: &[&str], edges: &[(&str, &str)]) -> bool {
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i))
        .collect();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (from, to) in edges {
        if let (Some(&f), Some(&t)) = (index.get(from), index.get(to)) {
            adjacency[f].push(t);
        }
    }

    let mut marks = vec![Mark::Unvisited; nodes.len()];

    for start in 0..nodes.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        // Each frame is (node, next neighbor index to examine). A node is
        // Active from the moment it is pushed until its frame is popped.
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        marks[start] = Mark::Active;

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            if next < adjacency[node].len() {
                frame.1 += 1;
                let neighbor = adjacency[node][next];
                match marks[neighbor] {
                    Mark::Active => return true,
                    Mark::Unvisited => {
                        marks[neighbor] = Mark::Active;
                        stack.push((neighbor, 0));
                    }
                    Mark::Done => {}
                }
            } else {
                marks[node] = Mark::Done;
                stack.pop();
            }
        }
    }

    false
}
