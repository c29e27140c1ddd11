//! Scatter-plot matrix: one cell per ordered column pair, histograms on the
//! diagonal.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::figures::{FigureKind, FigureSpec, figure};
use crate::grid::{GridOptions, GridShape};
use crate::models::{AxisId, Figure};
use crate::subplots::assemble_with;
use crate::table::Table;
use crate::themes::{ThemeProvider, ThemeRegistry};

/// Options for the scatter-matrix builder.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixOptions {
    /// Theme name; falls back to the user configuration when `None`.
    pub theme: Option<String>,
    /// Histogram bucket count for the diagonal cells.
    pub bins: usize,
    /// Marker color of the off-diagonal scatters.
    pub color: String,
    /// Marker size of the off-diagonal scatters.
    pub size: u32,
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            theme: None,
            bins: 10,
            color: "grey".to_string(),
            size: 2,
        }
    }
}

/// Scatter matrix with default options and built-in themes.
pub fn scatter_matrix(table: &Table) -> Result<Figure> {
    scatter_matrix_with(table, &MatrixOptions::default(), &ThemeRegistry::default())
}

/// Build a scatter-plot matrix over every ordered pair of columns.
///
/// Cell (i, j) plots column j against column i; the diagonal shows a
/// histogram of the column instead. Figures are collected row-major (outer
/// loop = the y column) and handed to the subplot assembler on an n x n grid
/// with fixed spacing and the grid lines of the theme turned off.
pub fn scatter_matrix_with(
    table: &Table,
    opts: &MatrixOptions,
    themes: &dyn ThemeProvider,
) -> Result<Figure> {
    if table.n_columns() == 0 {
        return Err(Error::DegenerateInput);
    }
    let theme = opts
        .theme
        .clone()
        .unwrap_or_else(|| Config::load().theme);

    let mut figures = Vec::with_capacity(table.n_columns() * table.n_columns());
    for row_col in table.column_names() {
        for col_col in table.column_names() {
            let spec = if row_col == col_col {
                FigureSpec {
                    kind: FigureKind::Histogram,
                    keys: vec![row_col.to_string()],
                    bins: opts.bins,
                    ..FigureSpec::default()
                }
            } else {
                FigureSpec {
                    kind: FigureKind::Scatter,
                    x: Some(col_col.to_string()),
                    y: Some(row_col.to_string()),
                    color: Some(opts.color.clone()),
                    size: Some(opts.size),
                    ..FigureSpec::default()
                }
            };
            figures.push(figure(table, &spec)?);
        }
    }

    let mut base = themes.layout(&theme)?;
    base.axis_mut(AxisId::x(1)).set("showgrid", false);
    base.axis_mut(AxisId::y(1)).set("showgrid", false);

    let n = table.n_columns();
    let grid_opts = GridOptions {
        shape: Some(GridShape::new(n, n)),
        horizontal_spacing: Some(0.05),
        vertical_spacing: Some(0.07),
        base_layout: Some(base),
        ..GridOptions::default()
    };
    let mut combined = assemble_with(&figures, &grid_opts, themes)?;
    combined.layout.set("bargap", 0.02);
    combined.layout.set("showlegend", false);
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_column_table_is_rejected() {
        assert!(matches!(
            scatter_matrix(&Table::new()),
            Err(Error::DegenerateInput)
        ));
    }
}
