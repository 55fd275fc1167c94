//! Row-major grid of optional components.
//!
//! The grid owns its children in an arena and addresses them by
//! [`ComponentId`]; each cell is either empty or holds one id.

use std::fmt;

use trellis_core::{Bounds, LayoutError, Size};

use crate::aggregate::{aggregate_fixedness, aggregate_minimum};
use crate::component::{Component, SpaceRequest};
use crate::solver::{self, gaps, GridAllocation, SolverOptions};

/// Handle to a component owned by a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub usize);

/// A 2-D arrangement of components with per-row and per-column weights.
pub struct Grid {
    /// Cells, row-major; every row has `col_weights.len()` entries
    rows: Vec<Vec<Option<ComponentId>>>,
    /// Arena of owned children
    components: Vec<Box<dyn Component>>,
    /// Last bounds each child was laid out at
    placements: Vec<Option<Bounds>>,
    row_weights: Vec<Option<f64>>,
    col_weights: Vec<Option<f64>>,
    row_padding: f64,
    col_padding: f64,
    /// Set once the grid has been laid out; structure is frozen afterwards
    attached: bool,
    options: SolverOptions,
    bounds: Option<Bounds>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("row_weights", &self.row_weights)
            .field("col_weights", &self.col_weights)
            .field("row_padding", &self.row_padding)
            .field("col_padding", &self.col_padding)
            .field("attached", &self.attached)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::with_options(SolverOptions::default())
    }

    /// Create an empty grid with custom solver options.
    pub fn with_options(options: SolverOptions) -> Self {
        Self {
            rows: Vec::new(),
            components: Vec::new(),
            placements: Vec::new(),
            row_weights: Vec::new(),
            col_weights: Vec::new(),
            row_padding: 0.0,
            col_padding: 0.0,
            attached: false,
            options,
            bounds: None,
        }
    }

    /// Create a grid from an initial arrangement. Short rows are padded with
    /// empty cells.
    pub fn from_rows(rows: Vec<Vec<Option<Box<dyn Component>>>>) -> Self {
        let mut grid = Self::new();
        let n_cols = rows.iter().map(Vec::len).max().unwrap_or(0);

        for row in rows {
            let mut cells = Vec::with_capacity(n_cols);
            for component in row {
                cells.push(component.map(|c| grid.push_component(c)));
            }
            cells.resize(n_cols, None);
            grid.rows.push(cells);
            grid.row_weights.push(None);
        }
        grid.col_weights = vec![None; n_cols];

        grid
    }

    fn push_component(&mut self, component: Box<dyn Component>) -> ComponentId {
        let id = ComponentId(self.components.len());
        self.components.push(component);
        self.placements.push(None);
        id
    }

    /// Place `component` at (`row`, `col`), growing the grid to include that
    /// cell. New rows and columns start empty with inferred weights.
    pub fn add_component<C>(&mut self, row: usize, col: usize, component: C) -> Result<ComponentId, LayoutError>
    where
        C: Component + 'static,
    {
        if self.attached {
            return Err(LayoutError::Attached);
        }
        if let Some(Some(_)) = self.rows.get(row).and_then(|cells| cells.get(col)) {
            return Err(LayoutError::CellOccupied { row, col });
        }

        if col >= self.col_count() {
            for cells in &mut self.rows {
                cells.resize(col + 1, None);
            }
            self.col_weights.resize(col + 1, None);
        }
        while self.rows.len() <= row {
            self.rows.push(vec![None; self.col_weights.len()]);
            self.row_weights.push(None);
        }

        let id = self.push_component(Box::new(component));
        self.rows[row][col] = Some(id);

        tracing::debug!(
            row,
            col,
            rows = self.row_count(),
            cols = self.col_count(),
            "added component to grid"
        );

        Ok(id)
    }

    /// Override the weight of row `index`; `None` goes back to inferring it.
    pub fn set_row_weight(&mut self, index: usize, weight: Option<f64>) -> Result<(), LayoutError> {
        validate_weight(weight)?;
        let count = self.row_count();
        let slot = self
            .row_weights
            .get_mut(index)
            .ok_or(LayoutError::RowOutOfBounds { index, count })?;
        *slot = weight;
        Ok(())
    }

    /// Override the weight of column `index`; `None` goes back to inferring it.
    pub fn set_col_weight(&mut self, index: usize, weight: Option<f64>) -> Result<(), LayoutError> {
        validate_weight(weight)?;
        let count = self.col_count();
        let slot = self
            .col_weights
            .get_mut(index)
            .ok_or(LayoutError::ColumnOutOfBounds { index, count })?;
        *slot = weight;
        Ok(())
    }

    /// Set the gaps between adjacent rows and adjacent columns. Gaps are never
    /// applied at the outer edges.
    pub fn set_padding(&mut self, row_padding: f64, col_padding: f64) {
        self.row_padding = row_padding.max(0.0);
        self.col_padding = col_padding.max(0.0);
    }

    /// Builder form of [`Grid::set_padding`].
    pub fn with_padding(mut self, row_padding: f64, col_padding: f64) -> Self {
        self.set_padding(row_padding, col_padding);
        self
    }

    /// `(row_padding, col_padding)`
    pub fn padding(&self) -> (f64, f64) {
        (self.row_padding, self.col_padding)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_weights.len()
    }

    pub fn row_weight(&self, index: usize) -> Option<f64> {
        self.row_weights.get(index).copied().flatten()
    }

    pub fn col_weight(&self, index: usize) -> Option<f64> {
        self.col_weights.get(index).copied().flatten()
    }

    pub fn row_weights(&self) -> &[Option<f64>] {
        &self.row_weights
    }

    pub fn col_weights(&self) -> &[Option<f64>] {
        &self.col_weights
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Whether the grid has been attached; see [`Grid::attach`].
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Freeze the grid's structure. Weights and padding stay adjustable.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Id of the component at (`row`, `col`), if any.
    pub fn id_at(&self, row: usize, col: usize) -> Option<ComponentId> {
        self.rows.get(row)?.get(col).copied().flatten()
    }

    /// Component at (`row`, `col`), if any.
    pub fn component_at(&self, row: usize, col: usize) -> Option<&dyn Component> {
        self.id_at(row, col).map(|id| self.components[id.0].as_ref())
    }

    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components.get(id.0).map(|c| c.as_ref())
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.components.get_mut(id.0).map(|c| c.as_mut())
    }

    /// Bounds the component was given by the most recent layout pass.
    pub fn bounds_of(&self, id: ComponentId) -> Option<Bounds> {
        self.placements.get(id.0).copied().flatten()
    }

    /// Bounds this grid was last laid out at.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Occupants of row `index`, left to right.
    pub fn row(&self, index: usize) -> impl Iterator<Item = Option<&dyn Component>> + '_ {
        self.rows
            .get(index)
            .into_iter()
            .flatten()
            .map(move |cell| cell.map(|id| self.components[id.0].as_ref()))
    }

    /// Occupants of column `index`, top to bottom.
    pub fn column(&self, index: usize) -> impl Iterator<Item = Option<&dyn Component>> + '_ {
        self.rows.iter().map(move |cells| {
            cells
                .get(index)
                .copied()
                .flatten()
                .map(|id| self.components[id.0].as_ref())
        })
    }

    /// Every occupied cell as `(row, col, component)`, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, &dyn Component)> + '_ {
        self.rows.iter().enumerate().flat_map(move |(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|id| (row, col, self.components[id.0].as_ref()))
            })
        })
    }

    /// Sum of per-column minimum widths plus column padding.
    pub fn minimum_width(&self) -> f64 {
        let columns: f64 = (0..self.col_count())
            .map(|j| aggregate_minimum(self.column(j), |c| c.minimum_width()))
            .sum();
        columns + self.col_padding * gaps(self.col_count())
    }

    /// Sum of per-row minimum heights plus row padding.
    pub fn minimum_height(&self) -> f64 {
        let rows: f64 = (0..self.row_count())
            .map(|i| aggregate_minimum(self.row(i), |c| c.minimum_height()))
            .sum();
        rows + self.row_padding * gaps(self.row_count())
    }

    /// True when every column holds only fixed-width components or empty cells.
    pub fn is_fixed_width(&self) -> bool {
        (0..self.col_count()).all(|j| aggregate_fixedness(self.column(j), |c| c.is_fixed_width()))
    }

    /// True when every row holds only fixed-height components or empty cells.
    pub fn is_fixed_height(&self) -> bool {
        (0..self.row_count()).all(|i| aggregate_fixedness(self.row(i), |c| c.is_fixed_height()))
    }

    /// Compute row and column sizes for the given outer size without placing
    /// anything.
    pub fn solve(&self, width: f64, height: f64) -> Result<GridAllocation, LayoutError> {
        solver::solve(self, Size::new(width, height))
    }

    /// Solve for `bounds` and place every child at its cell.
    ///
    /// This attaches the grid. Each occupied cell receives exactly one
    /// `apply_layout` call. Along a fixed axis a child is placed at the
    /// top-left of its cell with only the extent it requests; along a
    /// flexible axis it fills the cell.
    ///
    /// Recorded placements and [`Grid::bounds`] change only when every child
    /// accepts its bounds. On error they keep the previous pass's values.
    pub fn compute_layout(&mut self, bounds: Bounds) -> Result<GridAllocation, LayoutError> {
        self.attached = true;
        let allocation = self.solve(bounds.width, bounds.height)?;

        let widths = allocation.column_widths();
        let heights = allocation.row_heights();
        let xs = track_offsets(bounds.x, &widths, self.col_padding);
        let ys = track_offsets(bounds.y, &heights, self.row_padding);

        let mut placed = Vec::with_capacity(self.components.len());
        for (row, cells) in self.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let Some(id) = *cell else { continue };
                let cell_bounds = Bounds::new(xs[col], ys[row], widths[col], heights[row]);
                let child_bounds = fit_to_cell(self.components[id.0].as_ref(), cell_bounds)?;
                self.components[id.0].apply_layout(child_bounds)?;
                placed.push((id, child_bounds));
            }
        }

        for (id, child_bounds) in placed {
            self.placements[id.0] = Some(child_bounds);
        }
        self.bounds = Some(bounds);
        Ok(allocation)
    }
}

/// Bounds a child takes inside `cell`: its request along fixed axes, the
/// whole cell along flexible ones.
fn fit_to_cell(component: &dyn Component, cell: Bounds) -> Result<Bounds, LayoutError> {
    let request = component.requested_size(cell.size())?;
    let width = if component.is_fixed_width() {
        request.width.min(cell.width)
    } else {
        cell.width
    };
    let height = if component.is_fixed_height() {
        request.height.min(cell.height)
    } else {
        cell.height
    };
    Ok(cell.with_size(Size::new(width, height)))
}

fn validate_weight(weight: Option<f64>) -> Result<(), LayoutError> {
    match weight {
        Some(w) if !w.is_finite() || w < 0.0 => Err(LayoutError::InvalidWeight { weight: w }),
        _ => Ok(()),
    }
}

/// Start offset of each track when laid end to end with `gap` between them.
fn track_offsets(start: f64, sizes: &[f64], gap: f64) -> Vec<f64> {
    let mut positions = Vec::with_capacity(sizes.len());
    let mut current = start;

    for &size in sizes {
        positions.push(current);
        current += size + gap;
    }

    positions
}

/// A grid nests inside another grid like any other component.
impl Component for Grid {
    fn minimum_width(&self) -> f64 {
        Grid::minimum_width(self)
    }

    fn minimum_height(&self) -> f64 {
        Grid::minimum_height(self)
    }

    fn is_fixed_width(&self) -> bool {
        Grid::is_fixed_width(self)
    }

    fn is_fixed_height(&self) -> bool {
        Grid::is_fixed_height(self)
    }

    fn requested_size(&self, offered: Size) -> Result<SpaceRequest, LayoutError> {
        let allocation = self.solve(offered.width, offered.height)?;
        let width = allocation.col_guaranteed.iter().sum::<f64>() + self.col_padding * gaps(self.col_count());
        let height = allocation.row_guaranteed.iter().sum::<f64>() + self.row_padding * gaps(self.row_count());

        Ok(SpaceRequest::new(width.min(offered.width), height.min(offered.height))
            .with_wants(allocation.wants_width, allocation.wants_height))
    }

    fn apply_layout(&mut self, bounds: Bounds) -> Result<(), LayoutError> {
        self.compute_layout(bounds).map(|_| ())
    }
}
