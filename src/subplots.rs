//! Subplot assembly: place whole figures into a planned grid.
//!
//! [`assemble_with`] is the full entry point; [`assemble`] and
//! [`assemble_shaped`] are conveniences with default options. Also here:
//! [`merge_layouts`] (settings union over many figures) and [`strip_figures`]
//! (split a figure into one figure per trace).

use crate::error::{Error, Result};
use crate::grid::{CellAxes, GridOptions, GridShape, plan_grid};
use crate::models::{AxisId, Figure, Layout};
use crate::themes::{ThemeProvider, ThemeRegistry};
use log::debug;
use std::collections::BTreeSet;

/// Union the layouts of `figures` into one. Later figures win on key
/// collisions; axis entries are replaced wholesale. An empty slice yields an
/// empty layout.
pub fn merge_layouts(figures: &[Figure]) -> Layout {
    let mut merged = Layout::new();
    for fig in figures {
        merged.merge(&fig.layout);
    }
    merged
}

/// Split a figure into one single-trace figure per trace, each carrying a
/// copy of the source layout. Trace order is preserved.
pub fn strip_figures(figure: &Figure) -> Vec<Figure> {
    figure
        .data
        .iter()
        .map(|trace| Figure::new(vec![trace.clone()], figure.layout.clone()))
        .collect()
}

/// Assemble figures into a derived grid with default options (pearl theme,
/// no shared axes).
pub fn assemble(figures: &[Figure]) -> Result<Figure> {
    assemble_with(figures, &GridOptions::default(), &ThemeRegistry::default())
}

/// Assemble figures into an explicit (rows, cols) grid, otherwise defaults.
pub fn assemble_shaped(figures: &[Figure], shape: GridShape) -> Result<Figure> {
    let opts = GridOptions {
        shape: Some(shape),
        ..GridOptions::default()
    };
    assemble_with(figures, &opts, &ThemeRegistry::default())
}

/// Assemble figures into one combined figure.
///
/// Plans the grid, walks its non-blank cells in traversal order handing one
/// cell to each figure, stamps every trace with its cell's axis bindings, and
/// finishes with the planned layout. Axis entries of grid cells that received
/// no figure (index beyond the figure count) are pruned; flat settings and
/// inset axes are left untouched.
pub fn assemble_with(
    figures: &[Figure],
    opts: &GridOptions,
    themes: &dyn ThemeProvider,
) -> Result<Figure> {
    let plan = plan_grid(figures.len(), opts, themes)?;

    let mut slots = plan.cell_axes();
    let mut data = Vec::new();
    for fig in figures {
        let cell = slots.next().ok_or(Error::GridExhausted {
            cells: plan.usable_cells(),
            figures: figures.len(),
        })?;
        for trace in &fig.data {
            let mut trace = trace.clone();
            match cell {
                CellAxes::Cartesian { x, y } => {
                    trace.xaxis = Some(x);
                    trace.yaxis = Some(y);
                }
                CellAxes::Scene(scene) => trace.scene = Some(scene),
            }
            data.push(trace);
        }
    }
    debug!(
        "assembled {} traces from {} figures into a {}x{} grid",
        data.len(),
        figures.len(),
        plan.shape.rows,
        plan.shape.cols
    );
    drop(slots);

    let n = figures.len();
    let grid_ids: BTreeSet<AxisId> = plan.grid_axis_ids().into_iter().collect();
    let mut layout = plan.layout;
    layout
        .axes
        .retain(|id, _| !(grid_ids.contains(id) && id.index > n));

    Ok(Figure::new(data, layout))
}
