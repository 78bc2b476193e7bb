//! S5: visible-edge extraction (spec §4.6).
//!
//! Walks every cell boundary, canonicalizing each edge and tallying which
//! colors touch it. An edge becomes visible when it separates two
//! differently-colored cells, or sits on the image's outer boundary.
//! Grounded in `examples/original_source/main.cpp`'s `extractVisibleEdges`
//! — that function also builds a `nodesColors` map alongside `edgesColors`,
//! but never reads it for anything besides a debug print, so it's dropped
//! here.

use std::collections::{BTreeMap, BTreeSet};

use crate::color::Rgb;
use crate::config::MAGNIFICATION;
use crate::voronoi::VoronoiGraph;

/// A vertex in the 4x-magnified coordinate system.
pub type Point = (i32, i32);

/// An edge with endpoints in lexicographic order — the canonical form used
/// as a map key throughout S5/S6 (spec §3).
pub type Edge = (Point, Point);

pub fn canonical_edge(a: Point, b: Point) -> Edge {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Maps each vertex to the visible edges incident on it, each edge stored
/// with that vertex as the first element (spec §4.6 / §9 design note).
pub type NodeEdges = BTreeMap<Point, Vec<Edge>>;

pub struct VisibleEdges {
    pub edges: BTreeSet<Edge>,
    pub node_edges: NodeEdges,
}

/// S5: extracts the visible-edge set and per-node incidence map from the
/// reshaped Voronoi graph.
pub fn extract_visible_edges(voronoi: &VoronoiGraph, rgb: &[Rgb]) -> VisibleEdges {
    let mut edge_colors: BTreeMap<Edge, BTreeSet<Rgb>> = BTreeMap::new();

    for (x, y, cell) in voronoi.iter() {
        if cell.len() < 2 {
            continue;
        }
        let color = rgb[(y * voronoi.width + x) as usize];

        for i in 0..cell.len() {
            let a = cell[i];
            let b = cell[(i + 1) % cell.len()];
            let edge = canonical_edge(a, b);
            edge_colors.entry(edge).or_default().insert(color);
        }
    }

    let width_x4 = voronoi.width as i32 * MAGNIFICATION;
    let height_x4 = voronoi.height as i32 * MAGNIFICATION;

    let mut edges = BTreeSet::new();
    for (&(a, b), colors) in &edge_colors {
        let on_outer_boundary = (a.0 == 0 && b.0 == 0)
            || (a.1 == 0 && b.1 == 0)
            || (a.0 == width_x4 && b.0 == width_x4)
            || (a.1 == height_x4 && b.1 == height_x4);

        if colors.len() > 1 || on_outer_boundary {
            edges.insert((a, b));
        }
    }

    let mut node_edges: NodeEdges = BTreeMap::new();
    for &(a, b) in &edges {
        node_edges.entry(a).or_default().push((a, b));
        node_edges.entry(b).or_default().push((b, a));
    }

    VisibleEdges { edges, node_edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb_to_yuv;
    use crate::config::HqxThresholds;
    use crate::similarity::build_similarity_grid;
    use crate::simplify::{block_simplify, disambiguate_crossings};
    use crate::voronoi::reshape_voronoi;

    fn pipeline_to_edges(rgb: &[Rgb], width: u32, height: u32) -> VisibleEdges {
        let yuv: Vec<_> = rgb.iter().map(|&c| rgb_to_yuv(c)).collect();
        let mut grid = build_similarity_grid(&yuv, width, height, &HqxThresholds::default());
        block_simplify(&mut grid);
        disambiguate_crossings(&mut grid, &HqxThresholds::default());
        let voronoi = reshape_voronoi(&grid);
        extract_visible_edges(&voronoi, rgb)
    }

    #[test]
    fn single_pixel_has_four_boundary_edges() {
        let v = pipeline_to_edges(&[0x123456], 1, 1);
        assert_eq!(v.edges.len(), 4);
        for &(a, b) in &v.edges {
            assert!(
                (a.0 == 0 && b.0 == 0) || (a.1 == 0 && b.1 == 0) || (a.0 == 4 && b.0 == 4) || (a.1 == 4 && b.1 == 4)
            );
        }
    }

    #[test]
    fn two_different_colors_side_by_side_have_seven_visible_edges() {
        // spec §8 scenario 2
        let v = pipeline_to_edges(&[0xFF0000, 0x00FF00], 2, 1);
        assert_eq!(v.edges.len(), 7);
        assert!(v.edges.contains(&((4, 0), (4, 4))));
    }

    #[test]
    fn solid_block_has_only_outer_boundary_edges() {
        let v = pipeline_to_edges(&[0x808080; 4], 2, 2);
        for &(a, b) in &v.edges {
            let on_boundary =
                (a.0 == 0 && b.0 == 0) || (a.1 == 0 && b.1 == 0) || (a.0 == 8 && b.0 == 8) || (a.1 == 8 && b.1 == 8);
            assert!(on_boundary, "interior edge leaked through: {a:?}-{b:?}");
        }
    }

    #[test]
    fn node_edges_are_symmetric() {
        let v = pipeline_to_edges(&[0xFF0000, 0x00FF00], 2, 1);
        for &(a, b) in &v.edges {
            assert!(v.node_edges[&a].contains(&(a, b)));
            assert!(v.node_edges[&b].contains(&(b, a)));
        }
    }
}
