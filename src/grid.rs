//! Grid planning: shapes, per-cell specs, axis allocation, and layout styling.
//!
//! [`plan_grid`] turns a figure count plus [`GridOptions`] into a [`GridPlan`]:
//! the resolved [`GridShape`], a grid of per-cell axis references, and a
//! combined [`Layout`] whose concrete axes carry the theme's template
//! settings. The subplot assembler walks the plan; nothing here touches trace
//! data.
//!
//! Cell geometry lives on the unit square: every axis domain is a `[0,1]`
//! fraction pair, with spacing subtracted between cells.

use crate::error::{Error, Result};
use crate::models::{AxisId, AxisKind, Layout};
use crate::themes::ThemeProvider;
use log::debug;
use serde_json::json;

/// Which corner the first grid cell occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartCell {
    #[default]
    TopLeft,
    BottomLeft,
}

/// Grid dimensions, both positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }
}

impl From<(usize, usize)> for GridShape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

/// Per-cell override: 3d scene, row/column spans, inner padding.
///
/// Paddings are fractions of the unit square. A `None` entry in the spec grid
/// (not a default `CellSpec`) marks a deliberate blank cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSpec {
    pub is_3d: bool,
    /// Columns this cell spans, >= 1. Spanned-over positions must be blank.
    pub colspan: usize,
    /// Rows this cell spans, >= 1. Spanned-over positions must be blank.
    pub rowspan: usize,
    pub l: f64,
    pub r: f64,
    pub t: f64,
    pub b: f64,
}

impl Default for CellSpec {
    fn default() -> Self {
        Self {
            is_3d: false,
            colspan: 1,
            rowspan: 1,
            l: 0.0,
            r: 0.0,
            t: 0.0,
            b: 0.0,
        }
    }
}

/// Extent of an inset along one dimension, as a fraction of the host cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InsetExtent {
    /// Reach to the far edge of the host cell.
    #[default]
    ToEnd,
    /// Fixed fraction of the host cell size.
    Fraction(f64),
}

/// An extra axis pair overlaid onto one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inset {
    /// 1-based (row, col) of the host cell, in traversal order.
    pub cell: (usize, usize),
    pub is_3d: bool,
    /// Left offset inside the host cell, fraction of cell width.
    pub l: f64,
    /// Bottom offset inside the host cell, fraction of cell height.
    pub b: f64,
    pub w: InsetExtent,
    pub h: InsetExtent,
}

impl Default for Inset {
    fn default() -> Self {
        Self {
            cell: (1, 1),
            is_3d: false,
            l: 0.0,
            b: 0.0,
            w: InsetExtent::ToEnd,
            h: InsetExtent::ToEnd,
        }
    }
}

/// Spec grid: one optional [`CellSpec`] per cell, indexed in traversal order
/// (`specs[0][0]` describes the start cell).
pub type SpecGrid = Vec<Vec<Option<CellSpec>>>;

/// Options for [`plan_grid`] and the subplot assembler.
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// Explicit (rows, cols); derived from the figure count when `None`.
    pub shape: Option<GridShape>,
    /// One shared x axis per grid column.
    pub shared_x: bool,
    /// One shared y axis per grid row.
    pub shared_y: bool,
    pub start_cell: StartCell,
    /// Theme name, resolved through the provider when `base_layout` is `None`.
    pub theme: String,
    /// Explicit base layout; wins over the theme lookup.
    pub base_layout: Option<Layout>,
    pub specs: Option<SpecGrid>,
    pub insets: Vec<Inset>,
    /// Space between columns, fraction of the unit square. Default `0.2/cols`.
    pub horizontal_spacing: Option<f64>,
    /// Space between rows, fraction of the unit square. Default `0.3/rows`.
    pub vertical_spacing: Option<f64>,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            shape: None,
            shared_x: false,
            shared_y: false,
            start_cell: StartCell::default(),
            theme: crate::themes::DEFAULT_THEME.to_string(),
            base_layout: None,
            specs: None,
            insets: Vec::new(),
            horizontal_spacing: None,
            vertical_spacing: None,
        }
    }
}

/// The axis slots assigned to one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAxes {
    Cartesian { x: AxisId, y: AxisId },
    Scene(AxisId),
}

impl CellAxes {
    /// Axis ids of this cell, for bookkeeping.
    pub fn ids(&self) -> Vec<AxisId> {
        match *self {
            CellAxes::Cartesian { x, y } => vec![x, y],
            CellAxes::Scene(s) => vec![s],
        }
    }
}

/// Output of [`plan_grid`]: shape, per-cell axis references, combined layout.
#[derive(Debug, Clone)]
pub struct GridPlan {
    pub shape: GridShape,
    /// Rows in traversal order; `None` marks a blank cell.
    pub grid_ref: Vec<Vec<Option<CellAxes>>>,
    pub layout: Layout,
}

impl GridPlan {
    /// Lazy walk over the axis slots of non-blank cells, in traversal order.
    /// Restarts from the first cell on every call.
    pub fn cell_axes(&self) -> impl Iterator<Item = CellAxes> + '_ {
        self.grid_ref.iter().flatten().filter_map(|cell| *cell)
    }

    /// Number of non-blank cells.
    pub fn usable_cells(&self) -> usize {
        self.cell_axes().count()
    }

    /// Every axis id allocated to a grid cell (insets excluded).
    pub fn grid_axis_ids(&self) -> Vec<AxisId> {
        self.cell_axes().flat_map(|cell| cell.ids()).collect()
    }
}

/// Resolve the grid shape for `n_figures`.
///
/// An explicit shape must hold all figures. A derived shape uses one cell for
/// a lone figure and two columns otherwise.
pub fn derive_shape(n_figures: usize, explicit: Option<GridShape>) -> Result<GridShape> {
    match explicit {
        Some(shape) => {
            if shape.cells() < n_figures {
                return Err(Error::InvalidShape {
                    rows: shape.rows,
                    cols: shape.cols,
                    figures: n_figures,
                });
            }
            Ok(shape)
        }
        None if n_figures <= 1 => Ok(GridShape::new(1, 1)),
        None => Ok(GridShape::new(n_figures.div_ceil(2), 2)),
    }
}

/// Plan a subplot grid for `n_figures`.
///
/// Builds the axis skeleton (domains, anchors, shared slots, scenes, insets),
/// then merges the base layout: flat settings are copied directly, and the
/// x/y templates of the base are applied to every concrete axis.
pub fn plan_grid(
    n_figures: usize,
    opts: &GridOptions,
    themes: &dyn ThemeProvider,
) -> Result<GridPlan> {
    let shape = derive_shape(n_figures, opts.shape)?;
    debug!(
        "planning {}x{} grid for {} figures (shared_x={}, shared_y={})",
        shape.rows, shape.cols, n_figures, opts.shared_x, opts.shared_y
    );

    let base = match &opts.base_layout {
        Some(layout) => layout.clone(),
        None => themes.layout(&opts.theme)?,
    };

    let (mut layout, grid_ref) = subplot_skeleton(shape, opts)?;

    // Flat base settings merge directly; axis entries of the base act only as
    // templates below.
    for (k, v) in &base.settings {
        layout.settings.insert(k.clone(), v.clone());
    }

    let x_template = base.axis(AxisId::x(1)).cloned();
    let y_template = base.axis(AxisId::y(1)).cloned();
    for (id, style) in layout.axes.iter_mut() {
        let template = match id.kind {
            AxisKind::X => x_template.as_ref(),
            AxisKind::Y => y_template.as_ref(),
            AxisKind::Scene => None,
        };
        if let Some(template) = template {
            style.apply_template(template);
        }
    }

    Ok(GridPlan {
        shape,
        grid_ref,
        layout,
    })
}

/// The subplot-grid primitive: allocate axis slots cell by cell and compute
/// their unit-square domains. Returns the skeleton layout (axes only) and the
/// grid reference.
fn subplot_skeleton(
    shape: GridShape,
    opts: &GridOptions,
) -> Result<(Layout, Vec<Vec<Option<CellAxes>>>)> {
    let GridShape { rows, cols } = shape;

    if let Some(specs) = &opts.specs {
        let spec_cols = specs.iter().map(Vec::len).max().unwrap_or(0);
        let uniform = specs.iter().all(|row| row.len() == cols);
        if specs.len() != rows || !uniform {
            return Err(Error::InvalidSpecs {
                rows,
                cols,
                spec_rows: specs.len(),
                spec_cols,
            });
        }
    }

    let h_spacing = opts.horizontal_spacing.unwrap_or(0.2 / cols as f64);
    let v_spacing = opts.vertical_spacing.unwrap_or(0.3 / rows as f64);
    let cell_w = (1.0 - h_spacing * (cols - 1) as f64) / cols as f64;
    let cell_h = (1.0 - v_spacing * (rows - 1) as f64) / rows as f64;

    let mut alloc = AxisAllocator::new(rows, cols);
    let mut layout = Layout::new();
    let mut grid_ref: Vec<Vec<Option<CellAxes>>> = Vec::with_capacity(rows);

    // ----------------------------
    // 1) Grid cells, traversal order
    // ----------------------------
    for r in 0..rows {
        let mut row_ref: Vec<Option<CellAxes>> = Vec::with_capacity(cols);
        for c in 0..cols {
            let spec = match &opts.specs {
                Some(specs) => match specs[r][c] {
                    Some(spec) => spec,
                    None => {
                        row_ref.push(None);
                        continue;
                    }
                },
                None => CellSpec::default(),
            };

            // spans are clamped to the grid edge
            let colspan = spec.colspan.max(1).min(cols - c);
            let rowspan = spec.rowspan.max(1).min(rows - r);

            let x0 = c as f64 * (cell_w + h_spacing);
            let width = colspan as f64 * cell_w + (colspan - 1) as f64 * h_spacing;
            let bottom = match opts.start_cell {
                StartCell::TopLeft => rows - (r + rowspan),
                StartCell::BottomLeft => r,
            };
            let y0 = bottom as f64 * (cell_h + v_spacing);
            let height = rowspan as f64 * cell_h + (rowspan - 1) as f64 * v_spacing;

            let x_domain = [x0 + spec.l, x0 + width - spec.r];
            let y_domain = [y0 + spec.b, y0 + height - spec.t];

            let cell = if spec.is_3d {
                let id = alloc.next_scene();
                layout
                    .axis_mut(id)
                    .set("domain", json!({ "x": x_domain, "y": y_domain }));
                CellAxes::Scene(id)
            } else {
                alloc.cartesian(&mut layout, r, c, opts, x_domain, y_domain)
            };
            row_ref.push(Some(cell));
        }
        grid_ref.push(row_ref);
    }

    // ----------------------------
    // 2) Insets, appended after the grid's axes
    // ----------------------------
    for inset in &opts.insets {
        let (row, col) = inset.cell;
        if row == 0 || col == 0 || row > rows || col > cols {
            return Err(Error::InvalidInset {
                row,
                col,
                rows,
                cols,
            });
        }
        let (r, c) = (row - 1, col - 1);
        let cx0 = c as f64 * (cell_w + h_spacing);
        let bottom = match opts.start_cell {
            StartCell::TopLeft => rows - 1 - r,
            StartCell::BottomLeft => r,
        };
        let cy0 = bottom as f64 * (cell_h + v_spacing);

        let ix0 = cx0 + inset.l * cell_w;
        let ix1 = match inset.w {
            InsetExtent::ToEnd => cx0 + cell_w,
            InsetExtent::Fraction(f) => ix0 + f * cell_w,
        };
        let iy0 = cy0 + inset.b * cell_h;
        let iy1 = match inset.h {
            InsetExtent::ToEnd => cy0 + cell_h,
            InsetExtent::Fraction(f) => iy0 + f * cell_h,
        };

        if inset.is_3d {
            let id = alloc.next_scene();
            layout
                .axis_mut(id)
                .set("domain", json!({ "x": [ix0, ix1], "y": [iy0, iy1] }));
        } else {
            let x_id = alloc.next_x();
            let y_id = alloc.next_y();
            let x_style = layout.axis_mut(x_id);
            x_style.domain = Some([ix0, ix1]);
            x_style.anchor = Some(y_id);
            let y_style = layout.axis_mut(y_id);
            y_style.domain = Some([iy0, iy1]);
            y_style.anchor = Some(x_id);
        }
    }

    Ok((layout, grid_ref))
}

/// Sequential axis numbering with per-column/per-row reuse for shared axes.
struct AxisAllocator {
    next_x: usize,
    next_y: usize,
    next_scene: usize,
    col_x: Vec<Option<AxisId>>,
    row_y: Vec<Option<AxisId>>,
}

impl AxisAllocator {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            next_x: 1,
            next_y: 1,
            next_scene: 1,
            col_x: vec![None; cols],
            row_y: vec![None; rows],
        }
    }

    fn next_x(&mut self) -> AxisId {
        let id = AxisId::x(self.next_x);
        self.next_x += 1;
        id
    }

    fn next_y(&mut self) -> AxisId {
        let id = AxisId::y(self.next_y);
        self.next_y += 1;
        id
    }

    fn next_scene(&mut self) -> AxisId {
        let id = AxisId::scene(self.next_scene);
        self.next_scene += 1;
        id
    }

    /// Allocate (or reuse, when shared) the x/y pair of cell (r, c) and write
    /// domains and anchors for any newly created axis.
    fn cartesian(
        &mut self,
        layout: &mut Layout,
        r: usize,
        c: usize,
        opts: &GridOptions,
        x_domain: [f64; 2],
        y_domain: [f64; 2],
    ) -> CellAxes {
        let (x_id, x_new) = if opts.shared_x {
            match self.col_x[c] {
                Some(id) => (id, false),
                None => {
                    let id = self.next_x();
                    self.col_x[c] = Some(id);
                    (id, true)
                }
            }
        } else {
            (self.next_x(), true)
        };
        let (y_id, y_new) = if opts.shared_y {
            match self.row_y[r] {
                Some(id) => (id, false),
                None => {
                    let id = self.next_y();
                    self.row_y[r] = Some(id);
                    (id, true)
                }
            }
        } else {
            (self.next_y(), true)
        };

        // Anchors are set where the axis is first allocated; shared reuses
        // keep the original pairing.
        if x_new {
            let style = layout.axis_mut(x_id);
            style.domain = Some(x_domain);
            style.anchor = Some(y_id);
        }
        if y_new {
            let style = layout.axis_mut(y_id);
            style.domain = Some(y_domain);
            style.anchor = Some(x_id);
        }
        CellAxes::Cartesian { x: x_id, y: y_id }
    }
}
