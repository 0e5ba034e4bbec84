//! The particle-to-cell binning engine.

use crate::error::DecompError;
use corral_core::{checked_volume, coord_to_lin, CellIndex, NeighborSet, Periodicity, Vector3f};
use corral_lattice::stencil;
use rayon::prelude::*;

/// Linearized cell identifier for a particle's owning cell.
pub type CellHash = u32;

/// Sentinel hash for particles with no owning cell (outside the box
/// on a non-periodic axis). Sorts after every valid hash and is
/// excluded from per-cell ranges.
pub const CELL_EMPTY: CellHash = CellHash::MAX;

/// Particle position: 3 single-precision components.
pub type Position = Vector3f;

/// Half-open range `[start, end)` over the sorted particle order.
///
/// Cells with no particles keep `start == end`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// First slot of the cell's particles in the sorted order.
    pub start: u32,
    /// One past the last slot.
    pub end: u32,
}

impl CellRange {
    /// Number of particles in the cell.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the cell holds no particles.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where the per-axis cell counts come from.
#[derive(Clone, Copy, Debug, PartialEq)]
enum CellSource {
    /// Derived from a target interaction cutoff.
    Cutoff(f32),
    /// Supplied explicitly by the caller.
    Explicit([u32; 3]),
}

/// Spatial decomposition of a particle population into grid cells.
///
/// Configuration is staged: [`set_box`](Self::set_box), a cell source
/// ([`set_cutoff`](Self::set_cutoff) or
/// [`set_cell_counts`](Self::set_cell_counts)), and
/// [`set_n_part`](Self::set_n_part) must each be called at least once
/// before [`build`](Self::build) succeeds; until then
/// [`ready`](Self::ready) is `false` and `build` fails with
/// [`DecompError::NotConfigured`].
///
/// Each `build` recomputes, for every particle: its per-axis cell
/// coordinate (positions wrapped on periodic axes, the empty sentinel
/// on bounded axes when outside the box), its cell hash (the same
/// mixed-radix linearization the lattice crate uses), and its slot in
/// the sorted order. The engine exclusively owns its hash, order,
/// cell-range, and sorted-position buffers; reconfiguration resizes
/// them atomically, reusing capacity when counts shrink.
///
/// The build is deterministic for a fixed input: the particle order
/// is sorted by `(hash, original index)`, so particles sharing a cell
/// keep ascending original-index order.
pub struct DomainDecomposition {
    periodic: Periodicity,
    box_l: Option<Position>,
    source: Option<CellSource>,
    n_part: Option<usize>,

    n_cells: [u32; 3],
    total_cells: usize,

    hashes: Vec<CellHash>,
    order: Vec<u32>,
    rank: Vec<u32>,
    cells: Vec<CellRange>,
    xyz_sorted: Vec<Position>,
    n_out_of_box: usize,
    built: bool,
}

impl DomainDecomposition {
    /// Largest usable total cell count: one hash value is reserved as
    /// [`CELL_EMPTY`].
    pub const MAX_CELLS: u64 = CELL_EMPTY as u64;

    /// Largest supported particle count (slots are 32-bit).
    pub const MAX_PART: usize = u32::MAX as usize;

    /// Create an unconfigured engine with the given per-axis
    /// periodicity.
    pub fn new(periodic: Periodicity) -> Self {
        Self {
            periodic,
            box_l: None,
            source: None,
            n_part: None,
            n_cells: [0; 3],
            total_cells: 0,
            hashes: Vec::new(),
            order: Vec::new(),
            rank: Vec::new(),
            cells: Vec::new(),
            xyz_sorted: Vec::new(),
            n_out_of_box: 0,
            built: false,
        }
    }

    /// Stage the box dimensions. Every axis must be positive and
    /// finite. Re-derives the cell table if a cell source is already
    /// staged.
    pub fn set_box(&mut self, box_l: Position) -> Result<(), DecompError> {
        for a in 0..3 {
            let l = box_l[a];
            if !l.is_finite() || l <= 0.0 {
                return Err(DecompError::InvalidParameter {
                    param: "box",
                    reason: format!("axis {a} must be positive and finite, got {l}"),
                });
            }
        }
        self.box_l = Some(box_l);
        self.built = false;
        self.update_cells_from_cutoff_and_box()
    }

    /// Stage a target interaction cutoff as the cell source. Cell
    /// counts become `floor(box / cutoff)` per axis, clamped to at
    /// least 1: a box axis shorter than the cutoff collapses to a
    /// single cell on that axis (neighbor search degrades to brute
    /// force there, which is not an error).
    pub fn set_cutoff(&mut self, cutoff: f32) -> Result<(), DecompError> {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(DecompError::InvalidParameter {
                param: "cutoff",
                reason: format!("must be positive and finite, got {cutoff}"),
            });
        }
        self.source = Some(CellSource::Cutoff(cutoff));
        self.built = false;
        self.update_cells_from_cutoff_and_box()
    }

    /// Stage explicit per-axis cell counts as the cell source,
    /// overriding any staged cutoff. Every count must be at least 1.
    pub fn set_cell_counts(&mut self, n_cells: [u32; 3]) -> Result<(), DecompError> {
        for (a, &n) in n_cells.iter().enumerate() {
            if n == 0 {
                return Err(DecompError::InvalidParameter {
                    param: "n_cells",
                    reason: format!("axis {a} has zero cells"),
                });
            }
        }
        self.source = Some(CellSource::Explicit(n_cells));
        self.built = false;
        self.update_cells_from_cutoff_and_box()
    }

    /// Stage the particle count and size the per-particle buffers.
    /// Growth reallocates; shrinking reuses existing capacity.
    pub fn set_n_part(&mut self, n_part: usize) -> Result<(), DecompError> {
        if n_part > Self::MAX_PART {
            return Err(DecompError::InvalidParameter {
                param: "n_part",
                reason: format!("{n_part} exceeds the 32-bit slot width"),
            });
        }
        self.n_part = Some(n_part);
        self.built = false;
        self.hashes.resize(n_part, CELL_EMPTY);
        self.order.resize(n_part, 0);
        self.rank.resize(n_part, 0);
        self.xyz_sorted.resize(n_part, Position::default());
        Ok(())
    }

    /// Recompute the per-axis cell counts from the staged box and
    /// cell source and resize the cell table.
    ///
    /// A failure (oversized grid) leaves the engine not ready with no
    /// stale cell table reachable; the box and source stay staged so
    /// the caller can correct one of them and retry.
    fn update_cells_from_cutoff_and_box(&mut self) -> Result<(), DecompError> {
        self.total_cells = 0;
        let (Some(box_l), Some(source)) = (self.box_l, self.source) else {
            // Still staging; nothing to derive yet.
            return Ok(());
        };
        let n_cells = match source {
            CellSource::Explicit(n) => n,
            CellSource::Cutoff(cutoff) => {
                let mut n = [1u32; 3];
                for a in 0..3 {
                    let per_axis = (box_l[a] / cutoff).floor();
                    n[a] = if per_axis >= u32::MAX as f32 {
                        u32::MAX
                    } else if per_axis >= 1.0 {
                        per_axis as u32
                    } else {
                        1
                    };
                }
                n
            }
        };
        let volume = [n_cells[0] as u64, n_cells[1] as u64, n_cells[2] as u64];
        let total = checked_volume(&volume)
            .filter(|&t| t < Self::MAX_CELLS)
            .ok_or_else(|| DecompError::GridTooLarge {
                cells: volume.iter().map(|&n| n as u128).product(),
                max: Self::MAX_CELLS - 1,
            })?;

        if total as usize > self.cells.len() {
            log::debug!(
                "cell table grows from {} to {} cells ({}x{}x{})",
                self.cells.len(),
                total,
                n_cells[0],
                n_cells[1],
                n_cells[2],
            );
        }
        self.n_cells = n_cells;
        self.total_cells = total as usize;
        self.cells.resize(self.total_cells, CellRange::default());
        Ok(())
    }

    /// Whether all required configuration has been staged.
    pub fn ready(&self) -> bool {
        self.n_part.is_some() && self.total_cells > 0
    }

    /// Rebuild the decomposition for the given positions.
    ///
    /// One blocking, bulk-parallel pass: hash every particle, sort the
    /// particle order by `(hash, index)`, scan for cell boundaries,
    /// and gather the sorted position array and the inverse
    /// permutation. `xyz` must hold exactly the staged particle count.
    pub fn build(&mut self, xyz: &[Position]) -> Result<(), DecompError> {
        let box_l = self.box_l.ok_or(DecompError::NotConfigured {
            missing: "box not set",
        })?;
        if self.source.is_none() {
            return Err(DecompError::NotConfigured {
                missing: "no cutoff or cell counts",
            });
        }
        let n_part = self.n_part.ok_or(DecompError::NotConfigured {
            missing: "n_part not set",
        })?;
        if self.total_cells == 0 {
            // A staged source whose last derivation failed (oversized
            // grid) leaves no usable cell table.
            return Err(DecompError::NotConfigured {
                missing: "no usable cell table",
            });
        }
        if xyz.len() != n_part {
            return Err(DecompError::InvalidParameter {
                param: "xyz",
                reason: format!("expected {n_part} positions, got {}", xyz.len()),
            });
        }

        let n_cells = self.n_cells;
        let periodic = self.periodic;

        // Every particle's hash is independent of every other's.
        xyz.par_iter()
            .map(|p| cell_hash(p, box_l, n_cells, periodic))
            .collect_into_vec(&mut self.hashes);

        // Deterministic order: the key (hash, original index) is a
        // total order, so equal-hash particles keep ascending index
        // regardless of sort stability or thread scheduling.
        self.order.clear();
        self.order.extend(0..n_part as u32);
        let hashes = &self.hashes;
        self.order
            .par_sort_unstable_by_key(|&i| (hashes[i as usize], i));

        // Cell ranges from the boundaries between distinct hashes.
        self.cells.fill(CellRange::default());
        let mut n_out_of_box = 0usize;
        for k in 0..n_part {
            let h = self.hashes[self.order[k] as usize];
            if h == CELL_EMPTY {
                // The sentinel sorts last; everything from here out is
                // outside the box.
                n_out_of_box = n_part - k;
                break;
            }
            if k == 0 || self.hashes[self.order[k - 1] as usize] != h {
                self.cells[h as usize].start = k as u32;
            }
            self.cells[h as usize].end = k as u32 + 1;
        }
        self.n_out_of_box = n_out_of_box;

        // Contiguous per-cell position access for the force pass.
        let order = &self.order;
        order
            .par_iter()
            .map(|&i| xyz[i as usize])
            .collect_into_vec(&mut self.xyz_sorted);
        for (k, &i) in self.order.iter().enumerate() {
            self.rank[i as usize] = k as u32;
        }

        self.built = true;
        log::trace!(
            "decomposition rebuilt: {} particles over {} cells, {} outside the box",
            n_part,
            self.total_cells,
            n_out_of_box,
        );
        Ok(())
    }

    /// Per-cell `[start, end)` ranges over the sorted particle order.
    /// Valid after a successful [`build`](Self::build).
    pub fn cells(&self) -> &[CellRange] {
        &self.cells
    }

    /// The position array in sorted (cell-contiguous) order. Valid
    /// after a successful [`build`](Self::build).
    pub fn sorted_positions(&self) -> &[Position] {
        &self.xyz_sorted
    }

    /// Reorder a per-particle attribute array from natural into
    /// sorted order.
    pub fn sort<A: Copy + Send + Sync>(&self, src: &[A]) -> Result<Vec<A>, DecompError> {
        self.check_query(src.len())?;
        Ok(self.order.par_iter().map(|&i| src[i as usize]).collect())
    }

    /// Reorder a per-particle attribute array from sorted back into
    /// natural order. Inverse of [`sort`](Self::sort).
    pub fn unsort<A: Copy + Send + Sync>(&self, src: &[A]) -> Result<Vec<A>, DecompError> {
        self.check_query(src.len())?;
        Ok(self.rank.par_iter().map(|&k| src[k as usize]).collect())
    }

    fn check_query(&self, len: usize) -> Result<(), DecompError> {
        if !self.built {
            return Err(DecompError::NotConfigured {
                missing: "no completed build",
            });
        }
        if len != self.order.len() {
            return Err(DecompError::InvalidParameter {
                param: "src",
                reason: format!("expected {} elements, got {len}", self.order.len()),
            });
        }
        Ok(())
    }

    /// Total number of cells in the decomposition grid.
    pub fn size(&self) -> CellIndex {
        self.total_cells as CellIndex
    }

    /// Cell counts per axis.
    pub fn n_cells(&self) -> [u32; 3] {
        self.n_cells
    }

    /// Staged particle count (0 before [`set_n_part`](Self::set_n_part)).
    pub fn n_part(&self) -> usize {
        self.n_part.unwrap_or(0)
    }

    /// Particles that fell outside the box on a bounded axis during
    /// the last build. They belong to no cell range.
    pub fn n_out_of_box(&self) -> usize {
        self.n_out_of_box
    }

    /// Fixed neighbor-slot count of the cell grid's stencil.
    pub fn n_neighbors(&self) -> usize {
        6
    }

    /// Axis-aligned neighbors of decomposition cell `i`, in the same
    /// slot order and with the same per-axis wrap rules as the
    /// lattice crate's regular grid. Empty before the cell table is
    /// configured.
    pub fn element_neighbors(&self, i: CellIndex) -> NeighborSet {
        if self.total_cells == 0 {
            return NeighborSet::new();
        }
        debug_assert!(i < self.size(), "cell {i} out of range");
        let size = [
            self.n_cells[0] as CellIndex,
            self.n_cells[1] as CellIndex,
            self.n_cells[2] as CellIndex,
        ];
        stencil::axis_neighbors(i, size, self.periodic)
    }
}

/// Hash a position to its owning cell, or [`CELL_EMPTY`] when a
/// bounded axis puts it outside the box.
fn cell_hash(p: &Position, box_l: Position, n_cells: [u32; 3], periodic: Periodicity) -> CellHash {
    let mut coord = [0u64; 3];
    for a in 0..3 {
        let l = box_l[a];
        let n = n_cells[a];
        let mut x = p[a];
        if periodic.is_periodic(a) {
            // Wrap into [0, l); a position exactly on the far face
            // lands on coordinate 0.
            x -= (x / l).floor() * l;
            if x >= l || !x.is_finite() {
                x = 0.0;
            }
        } else if !(0.0..l).contains(&x) {
            return CELL_EMPTY;
        }
        let cell = ((x / l) * n as f32) as i64;
        // Float round-up at the upper edge must not escape the grid.
        coord[a] = cell.clamp(0, n as i64 - 1) as u64;
    }
    let size = [n_cells[0] as u64, n_cells[1] as u64, n_cells[2] as u64];
    coord_to_lin(coord, size) as CellHash
}
