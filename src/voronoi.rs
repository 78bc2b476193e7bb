//! S4: Voronoi cell reshaping (spec §4.5).
//!
//! Each pixel owns a quadrilateral-ish cell in a 4x-magnified integer
//! coordinate system (pixel `(x, y)` nominally owns `[4x, 4x+4] x [4y,
//! 4y+4]`, [`crate::config::MAGNIFICATION`]). Where a diagonal similarity
//! edge crosses a 2x2 corner, the cell "bites" into the neighbor's square
//! instead of stopping at the shared midpoint — this is what turns
//! staircased diagonal runs into straight ones. The per-corner case split
//! below walks the same four sides (top, right, bottom, left) that
//! `examples/original_source/main.cpp`'s `extractVoronoiGraph` does, in the
//! same order, and only reads each neighbor's pattern plus the cell's own —
//! the original also computes NW/NE/SW/SE diagonal neighbor patterns per
//! pixel but never reads them in this function, so they're left out here.

use crate::config::MAGNIFICATION;
use crate::similarity::{SimilarityGrid, NE, NW, SE, SW};

/// A pixel's Voronoi cell boundary, as a closed polyline in magnified
/// integer coordinates (no explicit closing edge: last point connects back
/// to the first).
pub type Cell = Vec<(i32, i32)>;

/// One [`Cell`] per pixel, row-major (spec §3: Voronoi graph).
#[derive(Debug, Clone)]
pub struct VoronoiGraph {
    pub width: u32,
    pub height: u32,
    cells: Vec<Cell>,
}

impl VoronoiGraph {
    pub fn cell(&self, x: i32, y: i32) -> &Cell {
        &self.cells[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i as u32 % width, i as u32 / width, cell))
    }
}

/// Removes consecutive duplicate vertices, including the wraparound
/// last-to-first pair, guaranteeing invariant V1. The per-side branches
/// below already avoid most duplication (mirroring the original's ad hoc
/// `if previous != candidate` guards), but a couple of branches push
/// unconditionally; this pass makes V1 hold regardless of which branches
/// fired.
fn dedup_cyclic(points: &mut Vec<(i32, i32)>) {
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
}

struct LocalBuilder {
    points: Vec<(i32, i32)>,
}

impl LocalBuilder {
    fn new() -> Self {
        Self { points: Vec::with_capacity(8) }
    }

    fn push(&mut self, p: (i32, i32)) {
        self.points.push(p);
    }

    fn push_if_new(&mut self, p: (i32, i32)) {
        if self.points.last() != Some(&p) {
            self.points.push(p);
        }
    }

    fn push_if_new_front(&mut self, p: (i32, i32)) {
        if self.points.first() != Some(&p) {
            self.points.push(p);
        }
    }
}

/// Builds one pixel's cell boundary in local coordinates (roughly `[-1,
/// 5] x [-1, 5]`, the 4-unit home square plus however far a diagonal bite
/// extends into a neighbor).
fn cell_local(grid: &SimilarityGrid, x: i32, y: i32) -> Vec<(i32, i32)> {
    let here = grid.get(x, y);
    let mut b = LocalBuilder::new();

    // Top edge.
    if y > 0 {
        let north = grid.get(x, y - 1);
        if north & SW != 0 {
            b.push((1, 1));
        } else if here & NW != 0 {
            b.push((1, -1));
        } else {
            b.push((0, 0));
        }

        if north & SE != 0 {
            b.push((3, 1));
        } else if here & NE != 0 {
            b.push((3, -1));
        } else {
            b.push((4, 0));
        }
    } else {
        b.push((0, 0));
        b.push((4, 0));
    }

    // Right edge.
    if x < grid.width as i32 - 1 {
        let east = grid.get(x + 1, y);
        if east & NW != 0 {
            b.push_if_new((3, 1));
        } else if here & NE != 0 {
            b.push((5, 1));
        } else {
            b.push_if_new((4, 0));
        }

        if east & SW != 0 {
            b.push((3, 3));
        } else if here & SE != 0 {
            b.push((5, 3));
        } else {
            b.push((4, 4));
        }
    } else {
        b.push_if_new((4, 0));
        b.push_if_new((4, 4));
    }

    // Bottom edge.
    if y < grid.height as i32 - 1 {
        let south = grid.get(x, y + 1);
        if south & NE != 0 {
            b.push_if_new((3, 3));
        } else if here & SE != 0 {
            b.push((3, 5));
        } else {
            b.push_if_new((4, 4));
        }

        if south & NW != 0 {
            b.push((1, 3));
        } else if here & SW != 0 {
            b.push((1, 5));
        } else {
            b.push((0, 4));
        }
    } else {
        b.push_if_new((4, 4));
        b.push_if_new((0, 4));
    }

    // Left edge.
    if x > 0 {
        let west = grid.get(x - 1, y);
        if west & SE != 0 {
            b.push_if_new((1, 3));
        } else if here & SW != 0 {
            b.push((-1, 3));
        } else {
            b.push_if_new((0, 4));
        }

        if west & NE != 0 {
            b.push_if_new_front((1, 1));
        } else if here & NW != 0 {
            b.push((-1, 1));
        } else {
            b.push_if_new_front((0, 0));
        }
    } else {
        b.push_if_new((0, 4));
        b.push_if_new_front((0, 0));
    }

    b.points
}

/// S4: reshapes every pixel's square footprint into its bitten Voronoi
/// cell, reading the final (post-S3b) similarity grid.
///
/// Per-pixel work only reads `grid` and writes its own cell, so rows run in
/// parallel over `rayon::par_chunks_mut`, the same pattern
/// `build_similarity_grid` uses for S2.
pub fn reshape_voronoi(grid: &SimilarityGrid) -> VoronoiGraph {
    use rayon::prelude::*;

    let (width, height) = (grid.width, grid.height);
    let mut cells: Vec<Cell> = vec![Vec::new(); (width * height) as usize];

    cells.par_chunks_mut(width as usize).enumerate().for_each(|(y, row)| {
        let y = y as i32;
        for (x, cell) in row.iter_mut().enumerate() {
            let x = x as i32;
            let mut local = cell_local(grid, x, y);
            dedup_cyclic(&mut local);
            *cell = local
                .into_iter()
                .map(|(lx, ly)| (x * MAGNIFICATION + lx, y * MAGNIFICATION + ly))
                .collect();
        }
    });

    VoronoiGraph { width, height, cells }
}

/// V1: no cell has a duplicate consecutive vertex, including the
/// wraparound last-to-first pair.
pub fn check_no_duplicate_vertices(voronoi: &VoronoiGraph) -> bool {
    voronoi
        .cells
        .iter()
        .all(|cell| cell.windows(2).all(|w| w[0] != w[1]) && (cell.len() < 2 || cell.first() != cell.last()))
}

/// V2: every cell is a non-degenerate polygon that stays within the bite
/// range of its own pixel's home square. A cheap necessary condition for
/// full tiling coverage — the exhaustive point-coverage check lives in this
/// module's own tests, not at runtime.
pub fn check_tiling_shape(voronoi: &VoronoiGraph) -> bool {
    voronoi.iter().all(|(x, y, cell)| {
        if cell.len() < 3 {
            return false;
        }
        let (gx, gy) = (x as i32 * MAGNIFICATION, y as i32 * MAGNIFICATION);
        cell.iter()
            .all(|&(px, py)| (gx - 1..=gx + 5).contains(&px) && (gy - 1..=gy + 5).contains(&py))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb_to_yuv;
    use crate::config::HqxThresholds;
    use crate::similarity::build_similarity_grid;

    #[test]
    fn single_pixel_cell_is_its_full_square() {
        let yuv = vec![rgb_to_yuv(0x123456)];
        let grid = build_similarity_grid(&yuv, 1, 1, &HqxThresholds::default());
        let voronoi = reshape_voronoi(&grid);
        let cell = voronoi.cell(0, 0);
        assert_eq!(cell, &vec![(0, 0), (4, 0), (4, 4), (0, 4)]);
    }

    #[test]
    fn solid_block_cells_are_plain_squares_no_biting() {
        let yuv = vec![rgb_to_yuv(0x808080); 4];
        let mut grid = build_similarity_grid(&yuv, 2, 2, &HqxThresholds::default());
        crate::simplify::block_simplify(&mut grid);
        let voronoi = reshape_voronoi(&grid);
        for (x, y, cell) in voronoi.iter() {
            let (gx, gy) = (x as i32 * MAGNIFICATION, y as i32 * MAGNIFICATION);
            assert_eq!(
                cell,
                &vec![(gx, gy), (gx + 4, gy), (gx + 4, gy + 4), (gx, gy + 4)],
                "unexpected bite at ({x},{y})"
            );
        }
    }

    #[test]
    fn diagonal_stroke_bites_into_neighbor_territory() {
        // 2x2 with only the main diagonal similar: TL<->BR connected,
        // TR/BL isolated from them. S2 alone (no simplification stages run)
        // is enough to produce a crossing, so the TL cell should bite past
        // its home square toward BR.
        let a = rgb_to_yuv(0x000000);
        let b = rgb_to_yuv(0xFFFFFF);
        let yuv = vec![a, b, b, a];
        let grid = build_similarity_grid(&yuv, 2, 2, &HqxThresholds::default());
        let voronoi = reshape_voronoi(&grid);
        let tl = voronoi.cell(0, 0);
        // with SE set on TL, the right-edge bottom corner extends to (5, 3)
        assert!(tl.contains(&(5, 3)) || tl.contains(&(5, 1)));
    }

    #[test]
    fn no_consecutive_duplicate_vertices_holds_v1() {
        let colors = [0xFF0000u32, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, 0x808080, 0x202020, 0xEEEEEE];
        let yuv: Vec<_> = colors.iter().map(|&c| rgb_to_yuv(c)).collect();
        let grid = build_similarity_grid(&yuv, 3, 3, &HqxThresholds::default());
        let voronoi = reshape_voronoi(&grid);
        for (x, y, cell) in voronoi.iter() {
            for w in cell.windows(2) {
                assert_ne!(w[0], w[1], "duplicate consecutive vertex at ({x},{y})");
            }
            if cell.len() > 1 {
                assert_ne!(cell.first(), cell.last(), "wraparound duplicate at ({x},{y})");
            }
        }
    }

    #[test]
    fn check_invariants_hold_on_a_mixed_grid() {
        let colors = [0xFF0000u32, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, 0x808080, 0x202020, 0xEEEEEE];
        let yuv: Vec<_> = colors.iter().map(|&c| rgb_to_yuv(c)).collect();
        let grid = build_similarity_grid(&yuv, 3, 3, &HqxThresholds::default());
        let voronoi = reshape_voronoi(&grid);
        assert!(check_no_duplicate_vertices(&voronoi));
        assert!(check_tiling_shape(&voronoi));
    }

    #[test]
    fn check_no_duplicate_vertices_catches_an_injected_repeat() {
        let yuv = vec![rgb_to_yuv(0x123456)];
        let grid = build_similarity_grid(&yuv, 1, 1, &HqxThresholds::default());
        let mut voronoi = reshape_voronoi(&grid);
        voronoi.cells[0].push((0, 0));
        assert!(!check_no_duplicate_vertices(&voronoi));
    }

    #[test]
    fn check_tiling_shape_catches_a_degenerate_cell() {
        let yuv = vec![rgb_to_yuv(0x123456)];
        let grid = build_similarity_grid(&yuv, 1, 1, &HqxThresholds::default());
        let mut voronoi = reshape_voronoi(&grid);
        voronoi.cells[0] = vec![(0, 0), (4, 0)];
        assert!(!check_tiling_shape(&voronoi));
    }
}
