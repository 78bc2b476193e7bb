//! Depixelizes pixel art into resolution-independent polyline curves,
//! following the Kopf–Lischinski similarity-graph approach.
//!
//! The pipeline runs six stages in sequence — see each module's docs for
//! the stage it implements:
//!
//! 1. [`color`] — sRGB → YUV (S1)
//! 2. [`similarity`] — similarity graph construction (S2)
//! 3. [`simplify`] — block simplification and crossing disambiguation (S3a/S3b)
//! 4. [`voronoi`] — Voronoi cell reshaping (S4)
//! 5. [`edges`] — visible-edge extraction (S5)
//! 6. [`curve`] — curve stitching (S6)
//!
//! Each stage is also exposed as a standalone public function, so callers
//! and tests can drive the pipeline one stage at a time.

pub mod color;
pub mod config;
pub mod curve;
pub mod edges;
mod error;
pub mod raster;
pub mod simplify;
pub mod similarity;
pub mod voronoi;

pub use color::{rgb_to_yuv, Rgb, Yuv};
pub use config::HqxThresholds;
pub use curve::{stitch_curves, Curve};
pub use edges::extract_visible_edges;
pub use error::{Result, VectorizeError};
pub use raster::{PixelSource, RasterImage};
pub use simplify::{block_simplify, disambiguate_crossings};
pub use similarity::build_similarity_grid;
pub use voronoi::reshape_voronoi;

use error::check_invariant;

/// Runs the full pipeline over an image, returning its curve set.
///
/// Either the full curve set is produced or an error is reported (spec
/// §7) — the pipeline never returns partial results.
pub fn vectorize(image: &impl PixelSource) -> Result<Vec<Curve>> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(VectorizeError::InvalidDimensions { width, height });
    }
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(VectorizeError::InvalidDimensions { width, height })?;

    log::debug!("S1: rgb_to_yuv over {width}x{height} pixels");
    let mut rgb: Vec<Rgb> = Vec::new();
    rgb.try_reserve_exact(pixel_count)
        .map_err(|e| VectorizeError::Stage("S1", e.to_string()))?;
    rgb.extend((0..height).flat_map(|y| (0..width).map(move |x| (x, y))).map(|(x, y)| image.rgb_at(x, y)));
    let yuv = color::rgb_raster_to_yuv(&rgb);

    log::debug!("S2: build_similarity_grid");
    let thresholds = HqxThresholds::default();
    let mut grid = build_similarity_grid(&yuv, width, height, &thresholds);
    check_invariant(similarity::check_symmetry(&grid), "A1: adjacency bit symmetry")?;
    check_invariant(similarity::check_border_masking(&grid), "A2: border masking")?;

    log::debug!("S3a: block_simplify");
    block_simplify(&mut grid);

    log::debug!("S3b: disambiguate_crossings");
    disambiguate_crossings(&mut grid, &thresholds);
    check_invariant(similarity::check_symmetry(&grid), "A1: adjacency bit symmetry after S3b")?;
    check_invariant(similarity::check_border_masking(&grid), "A2: border masking after S3b")?;

    log::debug!("S4: reshape_voronoi");
    let voronoi = reshape_voronoi(&grid);
    check_invariant(voronoi::check_no_duplicate_vertices(&voronoi), "V1: no duplicate Voronoi vertices")?;
    check_invariant(voronoi::check_tiling_shape(&voronoi), "V2: Voronoi cells tile the plane")?;

    log::debug!("S5: extract_visible_edges");
    let visible = extract_visible_edges(&voronoi, &rgb);
    log::trace!("{} visible edges", visible.edges.len());

    log::debug!("S6: stitch_curves");
    let curves = stitch_curves(&visible);
    log::trace!("{} curves emitted", curves.len());

    Ok(curves)
}
