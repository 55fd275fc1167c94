//! Iterative row/column allocation for a [`Grid`].
//!
//! Each round offers every occupied cell the space its row and column
//! currently hold, records what the occupant actually wants, and recomputes:
//!
//! - **Guaranteed** space: per group, the largest request seen (not a sum)
//! - **Proportional** space: the free remainder, split by weight
//!
//! Free space goes to unsatisfied groups first. A group is unsatisfied when
//! one of its fixed occupants is consuming everything it was offered and
//! still wants more. Once nothing is unsatisfied, the remainder is split by
//! the resolved weights. Groups whose occupants are all fixed never receive
//! a weight share after the first round.

use trellis_core::{Axis, LayoutError, Size};

use crate::aggregate::{aggregate_fixedness, proportional_space, resolve_weights, ZeroWeightPolicy};
use crate::grid::Grid;

/// Slack allowed when checking a request against its offer.
const CONTRACT_TOLERANCE: f64 = 1e-9;

/// Tuning knobs for the allocation loop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverOptions {
    /// Hard stop on the number of rounds
    pub max_iterations: usize,
    /// Rounds past this count are logged individually
    pub warn_after_iterations: usize,
    /// Free space (in pixels) small enough to call the layout converged
    pub slack_tolerance: f64,
    /// Stand-in weight for zero-weight groups when making the first offer
    pub bootstrap_weight: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            warn_after_iterations: 10,
            slack_tolerance: 1.0,
            bootstrap_weight: 0.5,
        }
    }
}

/// Result of one solve: per-column widths and per-row heights, each split
/// into a guaranteed part and a proportional part.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridAllocation {
    pub col_guaranteed: Vec<f64>,
    pub col_proportional: Vec<f64>,
    pub row_guaranteed: Vec<f64>,
    pub row_proportional: Vec<f64>,
    /// Some column still wanted more width when the loop stopped
    pub wants_width: bool,
    /// Some row still wanted more height when the loop stopped
    pub wants_height: bool,
    /// Rounds run
    pub iterations: usize,
    /// False when the iteration cap cut the loop short
    pub converged: bool,
}

impl GridAllocation {
    /// Final width of every column.
    pub fn column_widths(&self) -> Vec<f64> {
        sum_arrays(&self.col_guaranteed, &self.col_proportional)
    }

    /// Final height of every row.
    pub fn row_heights(&self) -> Vec<f64> {
        sum_arrays(&self.row_guaranteed, &self.row_proportional)
    }

    /// Width of all columns plus the gaps between them.
    pub fn total_width(&self, col_padding: f64) -> f64 {
        self.column_widths().iter().sum::<f64>() + col_padding * gaps(self.col_guaranteed.len())
    }

    /// Height of all rows plus the gaps between them.
    pub fn total_height(&self, row_padding: f64) -> f64 {
        self.row_heights().iter().sum::<f64>() + row_padding * gaps(self.row_guaranteed.len())
    }
}

/// What the occupants asked for in a single round.
struct Round {
    col_guaranteed: Vec<f64>,
    row_guaranteed: Vec<f64>,
    col_wants: Vec<bool>,
    row_wants: Vec<bool>,
}

/// Number of gaps between `count` adjacent groups.
pub(crate) fn gaps(count: usize) -> f64 {
    count.saturating_sub(1) as f64
}

fn sum_arrays(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

fn indicator(flags: &[bool]) -> Vec<f64> {
    flags.iter().map(|&f| if f { 1.0 } else { 0.0 }).collect()
}

/// Zero-weight groups get `stand_in` so the first offer reaches them.
fn bootstrap_weights(weights: &[f64], stand_in: f64) -> Vec<f64> {
    weights
        .iter()
        .map(|&w| if w == 0.0 { stand_in } else { w })
        .collect()
}

/// Weights used after the first round: all-fixed groups take no share.
fn flexible_weights(weights: &[f64], fixed: &[bool]) -> Vec<f64> {
    weights
        .iter()
        .zip(fixed)
        .map(|(&w, &fixed)| if fixed { 0.0 } else { w })
        .collect()
}

/// Next round's proportional split along one axis.
fn redistribute(wants: &[bool], weights: &[f64], free: f64) -> Vec<f64> {
    if wants.iter().any(|&w| w) {
        proportional_space(&indicator(wants), free, ZeroWeightPolicy::Withhold)
    } else {
        proportional_space(weights, free, ZeroWeightPolicy::Withhold)
    }
}

/// Offer every occupied cell its current share and collect the answers.
fn negotiate(grid: &Grid, offered_widths: &[f64], offered_heights: &[f64]) -> Result<Round, LayoutError> {
    let mut round = Round {
        col_guaranteed: vec![0.0; offered_widths.len()],
        row_guaranteed: vec![0.0; offered_heights.len()],
        col_wants: vec![false; offered_widths.len()],
        row_wants: vec![false; offered_heights.len()],
    };

    for (row, col, component) in grid.occupied_cells() {
        let offered = Size::new(offered_widths[col], offered_heights[row]);
        let request = component.requested_size(offered)?;

        if request.width > offered.width + CONTRACT_TOLERANCE {
            return Err(LayoutError::ContractViolation {
                row,
                col,
                axis: Axis::Horizontal,
                requested: request.width,
                offered: offered.width,
            });
        }
        if request.height > offered.height + CONTRACT_TOLERANCE {
            return Err(LayoutError::ContractViolation {
                row,
                col,
                axis: Axis::Vertical,
                requested: request.height,
                offered: offered.height,
            });
        }

        round.col_guaranteed[col] = round.col_guaranteed[col].max(request.width);
        round.row_guaranteed[row] = round.row_guaranteed[row].max(request.height);
        round.col_wants[col] |= request.wants_width;
        round.row_wants[row] |= request.wants_height;
    }

    Ok(round)
}

/// Compute row and column allocations for `grid` inside `available` space.
///
/// Padding between rows and columns is subtracted here; `available` is the
/// grid's full outer size.
pub fn solve(grid: &Grid, available: Size) -> Result<GridAllocation, LayoutError> {
    let options = grid.options();
    let n_rows = grid.row_count();
    let n_cols = grid.col_count();
    let (row_padding, col_padding) = grid.padding();

    let space_x = (available.width - col_padding * gaps(n_cols)).max(0.0);
    let space_y = (available.height - row_padding * gaps(n_rows)).max(0.0);

    let col_fixed: Vec<bool> = (0..n_cols)
        .map(|j| aggregate_fixedness(grid.column(j), |c| c.is_fixed_width()))
        .collect();
    let row_fixed: Vec<bool> = (0..n_rows)
        .map(|i| aggregate_fixedness(grid.row(i), |c| c.is_fixed_height()))
        .collect();

    let col_weights = resolve_weights(grid.col_weights(), &col_fixed);
    let row_weights = resolve_weights(grid.row_weights(), &row_fixed);
    let col_flex = flexible_weights(&col_weights, &col_fixed);
    let row_flex = flexible_weights(&row_weights, &row_fixed);

    let mut allocation = GridAllocation {
        col_guaranteed: vec![0.0; n_cols],
        col_proportional: proportional_space(
            &bootstrap_weights(&col_weights, options.bootstrap_weight),
            space_x,
            ZeroWeightPolicy::SplitEvenly,
        ),
        row_guaranteed: vec![0.0; n_rows],
        row_proportional: proportional_space(
            &bootstrap_weights(&row_weights, options.bootstrap_weight),
            space_y,
            ZeroWeightPolicy::SplitEvenly,
        ),
        ..Default::default()
    };

    tracing::debug!(
        rows = n_rows,
        cols = n_cols,
        width = available.width,
        height = available.height,
        "solving grid layout"
    );

    loop {
        let offered_widths = allocation.column_widths();
        let offered_heights = allocation.row_heights();

        let round = negotiate(grid, &offered_widths, &offered_heights)?;
        allocation.iterations += 1;

        let free_x = space_x - round.col_guaranteed.iter().sum::<f64>();
        let free_y = space_y - round.row_guaranteed.iter().sum::<f64>();

        allocation.col_proportional = redistribute(&round.col_wants, &col_flex, free_x);
        allocation.row_proportional = redistribute(&round.row_wants, &row_flex, free_y);
        allocation.wants_width = round.col_wants.iter().any(|&w| w);
        allocation.wants_height = round.row_wants.iter().any(|&w| w);
        allocation.col_guaranteed = round.col_guaranteed;
        allocation.row_guaranteed = round.row_guaranteed;

        tracing::trace!(
            iteration = allocation.iterations,
            free_x,
            free_y,
            wants_width = allocation.wants_width,
            wants_height = allocation.wants_height,
            "layout round"
        );

        let settled = free_x <= options.slack_tolerance
            && free_y <= options.slack_tolerance
            && !allocation.wants_width
            && !allocation.wants_height;
        // Same offer as this round means every later round repeats it.
        let fixed_point = allocation.column_widths() == offered_widths
            && allocation.row_heights() == offered_heights;

        if settled || fixed_point {
            allocation.converged = true;
            break;
        }

        if allocation.iterations >= options.max_iterations {
            tracing::warn!(
                iterations = allocation.iterations,
                free_x,
                free_y,
                wants_width = allocation.wants_width,
                wants_height = allocation.wants_height,
                "grid layout hit the iteration cap without converging"
            );
            break;
        }

        if allocation.iterations >= options.warn_after_iterations {
            tracing::debug!(
                iteration = allocation.iterations,
                free_x,
                free_y,
                "grid layout still settling"
            );
        }
    }

    tracing::debug!(
        iterations = allocation.iterations,
        converged = allocation.converged,
        "grid layout solved"
    );

    Ok(allocation)
}
