//! Pipeline configuration.
//!
//! spec.md §6 fixes the HQX similarity thresholds, the H3 island bonus, the
//! H2 BFS window side, and the 4x magnification factor as a "compile-time
//! constant set" defined by the published algorithm. [`HqxThresholds`] is
//! still broken out as its own `Default`-able struct, in the style of this
//! crate's sibling settings structs (`ProcessorSettings`, `DownscalerSettings`),
//! so a test can lock in a specific threshold combination (e.g. to pin the
//! H2 sign per spec.md §9's Open Question) without touching the rest of the
//! pipeline. The remaining constants are not meaningfully independent knobs
//! — they size fixed local coordinate systems and windows — so they stay as
//! `const` items next to the code that uses them.

use serde::{Deserialize, Serialize};

/// HQX-style YUV similarity thresholds (spec §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HqxThresholds {
    /// Maximum |ΔY| for two pixels to be considered similar (default: 48).
    pub y: i32,
    /// Maximum |ΔU| for two pixels to be considered similar (default: 7).
    pub u: i32,
    /// Maximum |ΔV| for two pixels to be considered similar (default: 6).
    pub v: i32,
}

impl Default for HqxThresholds {
    fn default() -> Self {
        Self { y: 48, u: 7, v: 6 }
    }
}

/// H3's island bonus: added to the weight favoring a diagonal that connects
/// an otherwise-isolated (valence-1) pixel (spec §4.4).
pub const ISLAND_BONUS: u32 = 5;

/// Side length of the H2 sparse-component BFS window, in pixels (spec §4.4).
pub const SPARSE_WINDOW_SIDE: usize = 8;

/// Magnification factor between pixel space and Voronoi vertex space
/// (spec §3, §6): pixel (x, y) owns the square [4x, 4x+4] x [4y, 4y+4].
pub const MAGNIFICATION: i32 = 4;
