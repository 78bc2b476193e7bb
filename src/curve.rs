//! S6: curve stitching (spec §4.7).
//!
//! Partitions the visible-edge set into maximal chains by walking
//! degree-2 nodes. Grounded in `examples/original_source/main.cpp`'s
//! `extractCurves`, with two corrections spec.md §9 calls for:
//!
//! 1. The source only ever inserts the seed edge of each walk into its
//!    `used` set, so a chain already emitted from one seed can be
//!    re-discovered (and re-emitted) starting from any of its interior
//!    edges. Here every edge crossed during both the forward and reverse
//!    walks is marked used, guaranteeing P6 (each visible edge ends up in
//!    exactly one curve).
//! 2. The source's reverse walk checks only `node_edges.count(point) == 2`
//!    and drops the forward walk's "has not returned to the start" guard,
//!    so a reverse walk that loops back around never stops. Both walks
//!    here share one `visited` set seeded with the curve's first two
//!    points; either walk halts the moment its next candidate vertex is
//!    already in that set, closing the curve if the vertex is the start
//!    and terminating in place otherwise.

use std::collections::{HashSet, VecDeque};

use crate::edges::{canonical_edge, Edge, NodeEdges, Point, VisibleEdges};

/// An open or closed polyline in the 4x-magnified coordinate system. Closed
/// curves repeat the start point as the last vertex (spec §4.7).
pub type Curve = Vec<Point>;

fn degree(node_edges: &NodeEdges, node: Point) -> usize {
    node_edges.get(&node).map_or(0, Vec::len)
}

fn other_end(node_edges: &NodeEdges, node: Point, came_from: Point) -> Option<Point> {
    node_edges
        .get(&node)?
        .iter()
        .find(|&&(_, to)| to != came_from)
        .map(|&(_, to)| to)
}

/// S6: stitches the visible-edge set into curves.
pub fn stitch_curves(visible: &VisibleEdges) -> Vec<Curve> {
    let mut used: HashSet<Edge> = HashSet::new();
    let mut curves = Vec::new();

    for &(a, b) in &visible.edges {
        if used.contains(&(a, b)) {
            continue;
        }
        used.insert((a, b));

        let mut chain: VecDeque<Point> = VecDeque::new();
        chain.push_back(a);
        chain.push_back(b);

        let mut visited: HashSet<Point> = HashSet::new();
        visited.insert(a);
        visited.insert(b);

        let mut closed = false;

        // Forward: walk away from `b`, extending the back of the chain.
        let mut prev = a;
        let mut current = b;
        while degree(&visible.node_edges, current) == 2 {
            let Some(next) = other_end(&visible.node_edges, current, prev) else {
                break;
            };
            used.insert(canonical_edge(current, next));

            if next == a {
                chain.push_back(next);
                closed = true;
                break;
            }
            if visited.contains(&next) {
                break;
            }

            chain.push_back(next);
            visited.insert(next);
            prev = current;
            current = next;
        }

        // Reverse: if the forward walk didn't close the curve, walk away
        // from `a` in the other direction, extending the front.
        if !closed {
            let mut prev = b;
            let mut current = a;
            while degree(&visible.node_edges, current) == 2 {
                let Some(next) = other_end(&visible.node_edges, current, prev) else {
                    break;
                };
                used.insert(canonical_edge(current, next));

                if visited.contains(&next) {
                    break;
                }

                chain.push_front(next);
                visited.insert(next);
                prev = current;
                current = next;
            }
        }

        curves.push(chain.into_iter().collect());
    }

    curves
}

/// Degree of every node touched by the visible-edge set; handy for tests
/// asserting junction/endpoint placement.
pub fn node_degrees(node_edges: &NodeEdges) -> std::collections::BTreeMap<Point, usize> {
    node_edges.iter().map(|(&p, edges)| (p, edges.len())).collect()
}
