use crate::cell::{Cell, Coord, Material};
use crate::scene::RenderHandle;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `space(delta)` moves the stored spacing by this multiple of `delta`
pub const SPACE_DELTA_FACTOR: f32 = 2.0;

/// Axis of a cross-section plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Fixes the `j` index, spans `i` and `k`
    Row,
    /// Fixes the `k` index, spans `i` and `j`
    Col,
}

impl Axis {
    /// Whether `coord` lies in plane `index` of this axis
    pub fn contains(self, index: usize, coord: Coord) -> bool {
        match self {
            Axis::Row => coord.j == index,
            Axis::Col => coord.k == index,
        }
    }
}

/// Centre of a cell for the given layout parameters
pub fn position_of(coord: Coord, dimension: usize, cell_size: f32, spacing: f32) -> Vec3 {
    let increment = cell_size + spacing;
    let offset = (dimension as f32 - 1.0) / 2.0;
    Vec3::new(
        (coord.i as f32 - offset) * increment,
        (coord.j as f32 - offset) * increment,
        (coord.k as f32 - offset) * increment,
    )
}

/// The N×N×N arrangement of cells.
///
/// Cells live in one flat vector; `offset = (i * N + j) * N + k`, so walking
/// the vector front to back is the (i, j, k) nesting order.
#[derive(Debug, Clone)]
pub struct Grid {
    dimension: usize,
    cell_size: f32,
    spacing: f32,
    cells: Vec<Cell>,

    /// Renderable identity back to the cell it draws
    handles: HashMap<RenderHandle, Coord>,
}

impl Grid {
    /// Build all N³ cells, off, with `off_material`.
    ///
    /// `spawn` is called once per cell in (i, j, k) order with the cell's
    /// position, scale and material and must return its renderable.
    pub fn new(
        dimension: usize,
        cell_size: f32,
        spacing: f32,
        off_material: Material,
        mut spawn: impl FnMut(Coord, Vec3, f32, Material) -> RenderHandle,
    ) -> Self {
        assert!(dimension > 0, "grid dimension must be at least 1");

        let mut cells = Vec::with_capacity(dimension * dimension * dimension);
        let mut handles = HashMap::with_capacity(cells.capacity());

        for i in 0..dimension {
            for j in 0..dimension {
                for k in 0..dimension {
                    let coord = Coord::new(i, j, k);
                    let position = position_of(coord, dimension, cell_size, spacing);
                    let handle = spawn(coord, position, cell_size, off_material);
                    handles.insert(handle, coord);
                    cells.push(Cell::new(coord, position, cell_size, off_material, handle));
                }
            }
        }

        Self {
            dimension,
            cell_size,
            spacing,
            cells,
            handles,
        }
    }

    // ========== Addressing ==========

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Number of cells (N³)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat offset of a coordinate. Panics outside the grid.
    pub fn offset_of(&self, coord: Coord) -> usize {
        let n = self.dimension;
        assert!(
            coord.i < n && coord.j < n && coord.k < n,
            "coordinate {} outside {}x{}x{} grid",
            coord,
            n,
            n,
            n
        );
        (coord.i * n + coord.j) * n + coord.k
    }

    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.offset_of(coord)]
    }

    pub fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let offset = self.offset_of(coord);
        &mut self.cells[offset]
    }

    /// Coordinate drawn by a renderable, if it belongs to this grid
    pub fn coord_of(&self, handle: RenderHandle) -> Option<Coord> {
        self.handles.get(&handle).copied()
    }

    // ========== Traversal ==========

    /// All cells in (i, j, k) nesting order
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn for_each_cell(&self, mut visit: impl FnMut(&Cell)) {
        for cell in &self.cells {
            visit(cell);
        }
    }

    pub fn for_each_cell_mut(&mut self, mut visit: impl FnMut(&mut Cell)) {
        for cell in &mut self.cells {
            visit(cell);
        }
    }

    /// Every cell's renderable: the default pick candidate set
    pub fn all_cell_handles(&self) -> Vec<RenderHandle> {
        self.cells.iter().map(Cell::handle).collect()
    }

    /// Number of cells currently on
    pub fn count_on(&self) -> usize {
        self.cells.iter().filter(|c| c.is_on()).count()
    }

    // ========== Planes ==========

    /// Coordinates of plane `index` along `axis`, outer axis first.
    /// Panics when `index >= N`.
    pub fn plane(&self, axis: Axis, index: usize) -> Vec<Coord> {
        let n = self.dimension;
        assert!(index < n, "{:?} index {} outside 0..{}", axis, index, n);

        let mut coords = Vec::with_capacity(n * n);
        for outer in 0..n {
            for inner in 0..n {
                coords.push(match axis {
                    Axis::Row => Coord::new(outer, index, inner),
                    Axis::Col => Coord::new(outer, inner, index),
                });
            }
        }
        coords
    }

    /// The N² cells with `j == r`
    pub fn row(&self, r: usize) -> Vec<&Cell> {
        self.plane(Axis::Row, r).into_iter().map(|c| self.cell(c)).collect()
    }

    /// The N² cells with `k == c`
    pub fn col(&self, c: usize) -> Vec<&Cell> {
        self.plane(Axis::Col, c).into_iter().map(|coord| self.cell(coord)).collect()
    }

    /// On/off pattern of a plane in traversal order
    pub fn plane_states(&self, axis: Axis, index: usize) -> Vec<bool> {
        self.plane(axis, index)
            .into_iter()
            .map(|c| self.cell(c).is_on())
            .collect()
    }

    // ========== Layout ==========

    /// Grow the spacing by `SPACE_DELTA_FACTOR * delta` and lay every cell
    /// out again.
    pub fn space(&mut self, delta: f32) {
        self.spacing += delta * SPACE_DELTA_FACTOR;

        let (n, size, spacing) = (self.dimension, self.cell_size, self.spacing);
        for cell in &mut self.cells {
            let position = position_of(cell.coord(), n, size, spacing);
            cell.set_layout(position, size);
        }
    }
}
