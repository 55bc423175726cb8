//! Neighbor queries
//!
//! Two interchangeable strategies behind [`NeighborQuery`]: a full scan and a
//! uniform hash grid. Both report every particle strictly within the radius,
//! excluding the query particle itself, so a model can swap one for the other
//! without changing its results. Only the visiting order differs.

use glam::Vec2;
use particle_physics::PAIR_GRID_FACTOR;
use std::collections::HashMap;
use std::ops::ControlFlow;

/// A particle found within range of the query particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    /// Vector from the query particle to this neighbor
    pub delta: Vec2,
    pub distance_sq: f32,
}

pub trait NeighborQuery {
    /// Index the current positions. Must be called before querying a tick.
    fn rebuild(&mut self, positions: &[Vec2], radius: f32);

    /// Visit every index that may lie within the indexed radius of `point`
    fn for_each_candidate(
        &self,
        point: Vec2,
        visit: &mut dyn FnMut(usize) -> ControlFlow<()>,
    ) -> ControlFlow<()>;

    /// Visit every particle within `radius` of `positions[index]`, excluding itself
    ///
    /// Squared distances are compared first; no square root is taken. Returning
    /// `ControlFlow::Break` from `visit` stops the search.
    fn for_each_within(
        &self,
        positions: &[Vec2],
        index: usize,
        radius: f32,
        visit: &mut dyn FnMut(Neighbor) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let origin = positions[index];
        let radius_sq = radius * radius;
        self.for_each_candidate(origin, &mut |other| {
            if other == index {
                return ControlFlow::Continue(());
            }
            let Some(&position) = positions.get(other) else {
                return ControlFlow::Continue(());
            };
            let delta = position - origin;
            let distance_sq = delta.length_squared();
            if distance_sq < radius_sq {
                visit(Neighbor {
                    index: other,
                    delta,
                    distance_sq,
                })
            } else {
                ControlFlow::Continue(())
            }
        })
    }

    /// Collect the neighbor set of `positions[index]`
    fn neighbors_of(&self, positions: &[Vec2], index: usize, radius: f32) -> Vec<Neighbor> {
        let mut found = Vec::new();
        let _ = self.for_each_within(positions, index, radius, &mut |n| {
            found.push(n);
            ControlFlow::Continue(())
        });
        found
    }
}

/// O(n²) scan over every indexed particle
#[derive(Clone, Debug, Default)]
pub struct NaiveScan {
    count: usize,
}

impl NeighborQuery for NaiveScan {
    fn rebuild(&mut self, positions: &[Vec2], _radius: f32) {
        self.count = positions.len();
    }

    fn for_each_candidate(
        &self,
        _point: Vec2,
        visit: &mut dyn FnMut(usize) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        for index in 0..self.count {
            visit(index)?;
        }
        ControlFlow::Continue(())
    }
}

/// Uniform hash grid of square cells
///
/// Cells have side `cell_factor * radius`. A query visits the 3x3 block around
/// the point's cell, column by column, so the factor must be at least 1.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_factor: f32,
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<usize>>,
}

impl Default for SpatialGrid {
    fn default() -> Self {
        Self::new(PAIR_GRID_FACTOR)
    }
}

impl SpatialGrid {
    pub fn new(cell_factor: f32) -> Self {
        Self {
            cell_factor: cell_factor.max(1.0),
            cell_size: 1.0,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn cell_of(&self, point: Vec2) -> (i32, i32) {
        (
            (point.x / self.cell_size).floor() as i32,
            (point.y / self.cell_size).floor() as i32,
        )
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

impl NeighborQuery for SpatialGrid {
    fn rebuild(&mut self, positions: &[Vec2], radius: f32) {
        let size = radius * self.cell_factor;
        self.cell_size = if size.is_finite() && size > 0.0 { size } else { 1.0 };
        self.cells.clear();
        for (index, &position) in positions.iter().enumerate() {
            let key = self.cell_of(position);
            self.cells.entry(key).or_default().push(index);
        }
    }

    fn for_each_candidate(
        &self,
        point: Vec2,
        visit: &mut dyn FnMut(usize) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let (cx, cy) = self.cell_of(point);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.cells.get(&(cx.saturating_add(dx), cy.saturating_add(dy))) else {
                    continue;
                };
                for &index in bucket {
                    visit(index)?;
                }
            }
        }
        ControlFlow::Continue(())
    }
}
