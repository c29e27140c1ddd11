//! plotgrid
//!
//! A lightweight Rust library for arranging pre-built chart figures into
//! subplot grids, merging their layout settings, and building scatter-plot
//! matrices. It manipulates the figure object model only; rendering is a
//! separate concern.
//!
//! ### Features
//! - Assemble many figures into one combined figure with per-cell axis slots
//! - Grid shapes derived from the figure count or given explicitly
//! - Shared axes per column/row, row/column spans, blank cells, 3d scenes,
//!   and inset axes
//! - Named layout themes (`pearl`, `white`, `solar`, `ggplot`) with x/y axis
//!   templates
//! - Figure construction from named numeric columns (CSV loadable), plus a
//!   scatter-plot matrix builder
//!
//! ### Example
//! ```
//! use plotgrid::{Figure, ScatterMode, Trace, assemble};
//!
//! let price = Figure::from_trace(Trace::scatter(
//!     vec![1.0, 2.0, 3.0],
//!     vec![3.0, 2.5, 2.9],
//!     ScatterMode::Lines,
//! ));
//! let volume = Figure::from_trace(Trace::bar(vec![1.0, 2.0, 3.0], vec![10.0, 12.0, 9.0]));
//! let combined = assemble(&[price, volume])?;
//! assert_eq!(combined.data.len(), 2);
//! # Ok::<(), plotgrid::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod figures;
pub mod grid;
pub mod matrix;
pub mod models;
pub mod subplots;
pub mod table;
pub mod themes;

pub use config::Config;
pub use error::{Error, Result};
pub use figures::{FigureKind, FigureSpec, build_figures, figure};
pub use grid::{
    CellAxes, CellSpec, GridOptions, GridPlan, GridShape, Inset, InsetExtent, SpecGrid, StartCell,
    plan_grid,
};
pub use matrix::{MatrixOptions, scatter_matrix, scatter_matrix_with};
pub use models::{
    AxisId, AxisKind, AxisStyle, Figure, Layout, Marker, ScatterMode, Trace, TraceKind,
};
pub use subplots::{assemble, assemble_shaped, assemble_with, merge_layouts, strip_figures};
pub use table::{Column, Table};
pub use themes::{DEFAULT_THEME, ThemeProvider, ThemeRegistry};
