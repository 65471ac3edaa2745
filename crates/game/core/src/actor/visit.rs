//! Per-floor record of the tiles an actor has seen.

use std::collections::BTreeMap;

use crate::env::FloorId;
use crate::geometry::{MapDimensions, Position};

/// Tiles of one floor the actor has had in sight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitArea {
    dims: MapDimensions,
    seen: Vec<bool>,
    seen_count: usize,
}

impl VisitArea {
    pub fn new(dims: MapDimensions) -> Self {
        Self {
            dims,
            seen: vec![false; dims.area()],
            seen_count: 0,
        }
    }

    pub fn dims(&self) -> MapDimensions {
        self.dims
    }

    pub fn is_seen(&self, position: Position) -> bool {
        self.seen[self.index(position)]
    }

    /// Marks every tile within `radius` (Chebyshev, wrapped) of `center`.
    pub fn see_around(&mut self, center: Position, radius: u32) {
        let reach_x = radius.min(self.dims.width) as i32;
        let reach_y = radius.min(self.dims.height) as i32;
        for dy in -reach_y..=reach_y {
            for dx in -reach_x..=reach_x {
                self.mark(Position::new(center.x + dx, center.y + dy));
            }
        }
    }

    /// Marks the whole floor as seen.
    pub fn reveal_all(&mut self) {
        self.seen.fill(true);
        self.seen_count = self.seen.len();
    }

    /// Fraction of the floor seen so far, in `[0, 1]`.
    pub fn complete_rate(&self) -> f64 {
        self.seen_count as f64 / self.seen.len() as f64
    }

    fn mark(&mut self, position: Position) {
        let index = self.index(position);
        if !self.seen[index] {
            self.seen[index] = true;
            self.seen_count += 1;
        }
    }

    fn index(&self, position: Position) -> usize {
        let p = self.dims.wrap(position);
        p.y as usize * self.dims.width as usize + p.x as usize
    }
}

/// Visit areas of every floor an actor has been on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FloorVisits {
    areas: BTreeMap<FloorId, VisitArea>,
}

impl FloorVisits {
    pub fn get(&self, floor: FloorId) -> Option<&VisitArea> {
        self.areas.get(&floor)
    }

    /// The area for `floor`, created empty on first use.
    ///
    /// An existing area recorded with other dimensions is replaced.
    pub fn area_mut(&mut self, floor: FloorId, dims: MapDimensions) -> &mut VisitArea {
        let area = self
            .areas
            .entry(floor)
            .or_insert_with(|| VisitArea::new(dims));
        if area.dims != dims {
            *area = VisitArea::new(dims);
        }
        area
    }

    pub fn get_mut(&mut self, floor: FloorId) -> Option<&mut VisitArea> {
        self.areas.get_mut(&floor)
    }

    /// Completion of `floor`; 0 for floors never visited.
    pub fn complete_rate(&self, floor: FloorId) -> f64 {
        self.areas.get(&floor).map_or(0.0, VisitArea::complete_rate)
    }

    /// Drops everything known about `floor`.
    pub fn forget(&mut self, floor: FloorId) -> bool {
        self.areas.remove(&floor).is_some()
    }
}
